//! Plugin subsystem: cross-cutting behavior around request execution.
//!
//! # Data Flow
//! ```text
//! transport execution
//!     → plugin.prepare(args, ·)   (serialization: attach the lazy entity)
//!     → plugin.apply(args, ·)     (decorate the whole exchange)
//!     → execution(args) → ClientResponse → routing
//! ```
//!
//! # Design Decisions
//! - Both hooks default to identity, a plugin overrides only what it needs
//! - Composition is pairwise (`CompoundPlugin`) and order-preserving: the right-hand
//!   plugin wraps the left-hand one, so it is the outermost

pub mod compound;
pub mod serialization;

use std::sync::Arc;

use crate::http::request::RequestArguments;
use crate::http::response::ClientResponse;
use crate::routing::error::RouteError;

pub use compound::{compose, CompoundPlugin};
pub use serialization::SerializationPlugin;

/// A deferred request: given arguments, produce a response.
pub type RequestExecution = Arc<
    dyn Fn(RequestArguments) -> Result<Box<dyn ClientResponse>, RouteError> + Send + Sync,
>;

/// Build a `RequestExecution` from a closure.
pub fn execution<F>(f: F) -> RequestExecution
where
    F: Fn(RequestArguments) -> Result<Box<dyn ClientResponse>, RouteError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Hooks around request preparation and execution.
pub trait Plugin: Send + Sync {
    /// Wrap the execution that serializes and sends the request.
    fn prepare(&self, _arguments: &RequestArguments, execution: RequestExecution) -> RequestExecution {
        execution
    }

    /// Wrap the whole execution.
    fn apply(&self, _arguments: &RequestArguments, execution: RequestExecution) -> RequestExecution {
        execution
    }
}

/// Plugin that changes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPlugin;

impl Plugin for NoopPlugin {}

impl<P: Plugin + ?Sized> Plugin for Arc<P> {
    fn prepare(&self, arguments: &RequestArguments, execution: RequestExecution) -> RequestExecution {
        (**self).prepare(arguments, execution)
    }

    fn apply(&self, arguments: &RequestArguments, execution: RequestExecution) -> RequestExecution {
        (**self).apply(arguments, execution)
    }
}
