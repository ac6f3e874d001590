//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (status codes, body limit, log level)
//! - Detect conflicting routing rules
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;

use http::StatusCode;
use thiserror::Error;

use crate::config::schema::{RouteRule, RouterConfig};
use crate::routing::series::Series;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyRuleName { index: usize },

    #[error("route name `{0}` is declared more than once")]
    DuplicateRuleName(String),

    #[error("route `{rule}`: status {status} is outside 100-599")]
    InvalidStatus { rule: String, status: u16 },

    #[error("route `{rule}`: status {status} does not belong to series {series}")]
    SeriesMismatch {
        rule: String,
        status: u16,
        series: Series,
    },

    #[error("route `{rule}` matches the same responses as route `{previous}`")]
    DuplicateRule { rule: String, previous: String },

    #[error("unknown log level `{0}`")]
    InvalidLogLevel(String),

    #[error("reader.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Validate the whole configuration.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }
    if config.reader.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    errors.extend(validate_rules(&config.routes));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate routing rules on their own.
pub fn validate_rules(rules: &[RouteRule]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut names: HashMap<&str, usize> = HashMap::new();
    let mut keys: HashMap<(Option<Series>, Option<u16>), &str> = HashMap::new();

    for (index, rule) in rules.iter().enumerate() {
        if rule.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRuleName { index });
        } else if names.insert(rule.name.as_str(), index).is_some() {
            errors.push(ValidationError::DuplicateRuleName(rule.name.clone()));
        }

        let Some(key) = rule_key(rule, &mut errors) else {
            continue;
        };
        if let Some(previous) = keys.insert(key, rule.name.as_str()) {
            errors.push(ValidationError::DuplicateRule {
                rule: rule.name.clone(),
                previous: previous.to_string(),
            });
        }
    }

    errors
}

/// The (series, status) pair a rule is keyed by, with the series inferred from the status.
fn rule_key(
    rule: &RouteRule,
    errors: &mut Vec<ValidationError>,
) -> Option<(Option<Series>, Option<u16>)> {
    let Some(code) = rule.status else {
        return Some((rule.series, None));
    };

    let Some(series) = StatusCode::from_u16(code).ok().and_then(Series::of) else {
        errors.push(ValidationError::InvalidStatus {
            rule: rule.name.clone(),
            status: code,
        });
        return None;
    };

    match rule.series {
        Some(declared) if declared != series => {
            errors.push(ValidationError::SeriesMismatch {
                rule: rule.name.clone(),
                status: code,
                series: declared,
            });
            None
        }
        _ => Some((Some(series), Some(code))),
    }
}
