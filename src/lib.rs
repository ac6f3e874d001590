//! Response routing engine.
//!
//! Selects and runs exactly one handler for an inbound HTTP response, based on
//! attributes read from it (status, series, headers), using immutable dispatch
//! trees that can be nested and merged.

pub mod config;
pub mod http;
pub mod observability;
pub mod plugin;
pub mod resilience;
pub mod routing;

pub use config::schema::RouterConfig;
pub use crate::http::{ClientResponse, Exchange, MessageReader};
pub use plugin::Plugin;
pub use routing::{dispatch, Merge, Route, RouteError, RoutingTree};
