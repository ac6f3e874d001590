//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the router and its binary.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::http::reader::DEFAULT_MAX_BODY_BYTES;
use crate::routing::series::Series;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Response body reading.
    pub reader: ReaderConfig,

    /// Declared routing rules, in declaration order.
    pub routes: Vec<RouteRule>,
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Body reader configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Maximum body size in bytes a route may deserialize.
    pub max_body_bytes: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// What a declared rule does with the response it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Consume the response.
    #[default]
    Pass,
    /// Fail the exchange with `RouteError::Rejected`.
    Reject,
}

/// A declared routing rule.
///
/// Both keys absent: catch-all for every response no other rule matches, including
/// statuses not listed under a series that only has status rules.
/// Series only: any status of that series.
/// Status only: the series is inferred from the status.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteRule {
    /// Rule identifier for logging and diagnostics.
    pub name: String,

    /// Status class to match.
    #[serde(default)]
    pub series: Option<Series>,

    /// Exact status code to match.
    #[serde(default)]
    pub status: Option<u16>,

    #[serde(default)]
    pub outcome: Outcome,
}
