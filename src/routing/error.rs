//! Routing errors.
//!
//! # Design Decisions
//! - Construction errors (`DuplicateBindingError`) are separate from dispatch errors
//! - Transport failures are carried as the original `io::Error`, never re-wrapped
//! - Attribute values are rendered with `Debug` so the errors stay non-generic

use std::fmt;
use std::io;

use http::StatusCode;
use thiserror::Error;

/// Two bindings in one `dispatch` call share an attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate binding for {attribute}")]
pub struct DuplicateBindingError {
    /// Debug rendering of the conflicting value, or `wildcard`.
    pub attribute: String,
}

/// Neither an exact binding nor a wildcard applies to the observed attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct NoRouteMatchedError {
    /// Navigator that produced the attribute.
    pub navigator: String,
    /// The observed attribute value.
    pub attribute: String,
    /// Declared attribute values, in declaration order.
    pub declared: Vec<String>,
}

impl fmt::Display for NoRouteMatchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no route matched {} = {}, declared: [{}]",
            self.navigator,
            self.attribute,
            self.declared.join(", ")
        )
    }
}

/// Failure while executing a route.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    NoRouteMatched(#[from] NoRouteMatchedError),

    #[error("failed to deserialize response body: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("response body of {size} bytes exceeds limit of {limit} bytes")]
    BodyTooLarge { size: usize, limit: usize },

    #[error("response rejected by rule `{rule}` (status {status})")]
    Rejected { rule: String, status: StatusCode },
}

impl RouteError {
    /// The underlying transport error, if this is one.
    pub fn as_io(&self) -> Option<&io::Error> {
        match self {
            RouteError::Io(e) => Some(e),
            _ => None,
        }
    }
}
