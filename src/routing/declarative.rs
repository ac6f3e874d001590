//! Routing trees compiled from declared rules.
//!
//! # Data Flow
//! ```text
//! RouteRule[] (validated)
//!     → one binding per rule on the series tree
//!         series + status → on(series).dispatch(status tree { on(status) })
//!         series only     → on(series).dispatch(status tree { wildcard })
//!         neither         → series wildcard
//!     → folded with merge: status trees under the same series combine
//!     → catch-all added as status wildcard under series that only have status rules
//!     → RoutingTree<SeriesNavigator>
//! ```
//!
//! # Design Decisions
//! - Conflicts are rejected by validation first; merge alone would let the last rule win
//! - Every terminal route reports the rule name to an observer

use std::sync::Arc;

use http::StatusCode;
use thiserror::Error;

use crate::config::schema::{Outcome, RouteRule};
use crate::config::validation::{validate_rules, ValidationError};
use crate::routing::binding::{any, any_status, on, Binding};
use crate::routing::error::{DuplicateBindingError, RouteError};
use crate::routing::navigator::{series, status, SeriesNavigator};
use crate::routing::route::Route;
use crate::routing::series::Series;
use crate::routing::tree::{Merge, RoutingTree};

/// Callback receiving the name of the rule that handled a response.
pub type RuleObserver = Arc<dyn Fn(&str) + Send + Sync>;

/// Failure while compiling declared rules.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("invalid routing rules: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Duplicate(#[from] DuplicateBindingError),

    #[error("rule `{rule}` has invalid status {status}")]
    InvalidStatus { rule: String, status: u16 },
}

/// Compile `rules` into a tree dispatching on the status series.
pub fn compile(
    rules: &[RouteRule],
    observer: RuleObserver,
) -> Result<RoutingTree<SeriesNavigator>, CompileError> {
    let errors = validate_rules(rules);
    if !errors.is_empty() {
        return Err(CompileError::Invalid(errors));
    }

    let mut tree = RoutingTree::dispatch(series(), [])?;
    let mut catch_all = None;
    let mut status_only = Vec::new();
    let mut series_wide = Vec::new();
    for rule in rules {
        let binding = rule_binding(rule, observer.clone())?;
        match (binding.attribute().copied(), rule.status) {
            (None, _) => catch_all = Some(binding.route().clone()),
            (Some(declared), None) => series_wide.push(declared),
            (Some(declared), Some(_)) => {
                if !status_only.contains(&declared) {
                    status_only.push(declared);
                }
            }
        }
        tree = tree.merge(binding);
    }

    // the catch-all also backs statuses left open under a series with status rules
    if let Some(route) = catch_all {
        for open in status_only.into_iter().filter(|s| !series_wide.contains(s)) {
            let fallback = RoutingTree::dispatch(status(), [any_status().call(route.clone())])?;
            tree = tree.merge(on(open).dispatch(fallback));
        }
    }

    tracing::debug!(rules = rules.len(), series = tree.len(), "Declared routes compiled");
    Ok(tree)
}

fn rule_binding(rule: &RouteRule, observer: RuleObserver) -> Result<Binding<Series>, CompileError> {
    let route = rule_route(rule, observer);

    let binding = match (rule.series, rule.status) {
        (None, None) => any().call(route),
        (declared, Some(code)) => {
            let invalid = || CompileError::InvalidStatus {
                rule: rule.name.clone(),
                status: code,
            };
            let code = StatusCode::from_u16(code).map_err(|_| invalid())?;
            let inferred = Series::of(code).ok_or_else(invalid)?;
            on(declared.unwrap_or(inferred))
                .dispatch(RoutingTree::dispatch(status(), [on(code).call(route)])?)
        }
        (Some(declared), None) => {
            on(declared).dispatch(RoutingTree::dispatch(status(), [any_status().call(route)])?)
        }
    };
    Ok(binding)
}

fn rule_route(rule: &RouteRule, observer: RuleObserver) -> Route {
    let name = rule.name.clone();
    let outcome = rule.outcome;

    Route::call(move |response, _reader| {
        tracing::debug!(rule = %name, outcome = ?outcome, "Declared rule matched");
        observer(&name);
        match outcome {
            Outcome::Pass => {
                response.take_body()?;
                Ok(())
            }
            Outcome::Reject => Err(RouteError::Rejected {
                rule: name.clone(),
                status: response.status()?,
            }),
        }
    })
}
