//! response-router CLI
//!
//! Loads declared routing rules from a TOML file, compiles them into a routing tree
//! and lets an operator check which rule a given status would hit.
//!
//! ```text
//! response-router --config routes.toml check --status 404
//! response-router --config routes.toml show
//! response-router retry-after "Sun, 24 Jun 2018 01:19:54 GMT"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use clap::{Parser, Subcommand};
use http::{Response, StatusCode};

use response_router::config::{load_config, RouterConfig};
use response_router::observability::logging::init_logging;
use response_router::resilience::{CompositeDelayParser, DelayParser};
use response_router::routing::declarative::compile;
use response_router::routing::{Dispatch, RouteError};
use response_router::MessageReader;

#[derive(Parser)]
#[command(name = "response-router")]
#[command(about = "Inspect declared response routes", long_about = None)]
struct Cli {
    /// Routing configuration (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a synthetic response with the given status
    Check {
        #[arg(short, long)]
        status: u16,
    },
    /// Print the compiled routing tree
    Show,
    /// Parse a Retry-After header value
    RetryAfter { value: String },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    init_logging(&config.observability)?;

    tracing::info!(
        config = ?cli.config,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Check { status } => check(&config, StatusCode::from_u16(status)?),
        Commands::Show => {
            let tree = compile(&config.routes, Arc::new(|_: &str| {}))?;
            println!("{tree:#?}");
            Ok(ExitCode::SUCCESS)
        }
        Commands::RetryAfter { value } => match CompositeDelayParser::default().parse(&value) {
            Some(delay) => {
                println!("{}s", delay.as_secs());
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("Unrecognized Retry-After value: {value}");
                Ok(ExitCode::from(2))
            }
        },
    }
}

fn check(config: &RouterConfig, status: StatusCode) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let matched: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let sink = matched.clone();
    let tree = compile(
        &config.routes,
        Arc::new(move |name: &str| {
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(name.to_string());
            }
        }),
    )?;

    let mut response = Response::builder().status(status).body(Bytes::new())?;
    let reader = MessageReader::new(config.reader.max_body_bytes);

    match tree.execute(&mut response, &reader) {
        Ok(()) => {
            let rule = matched.lock().ok().and_then(|slot| slot.clone());
            println!("{} -> {} (pass)", status.as_u16(), rule.unwrap_or_default());
            Ok(ExitCode::SUCCESS)
        }
        Err(RouteError::Rejected { rule, .. }) => {
            println!("{} -> {} (reject)", status.as_u16(), rule);
            Ok(ExitCode::SUCCESS)
        }
        Err(RouteError::NoRouteMatched(err)) => {
            println!("{} -> no route: {}", status.as_u16(), err);
            Ok(ExitCode::from(2))
        }
        Err(err) => Err(err.into()),
    }
}
