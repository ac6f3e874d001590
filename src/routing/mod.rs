//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound response
//!     → tree.rs (navigator.rs extracts the attribute)
//!     → exact binding, else wildcard, else NoRouteMatched
//!     → route.rs (terminal action, nested tree, pass-through or composite)
//!
//! Declaration (at startup):
//!     dispatch(navigator, bindings) → validated, immutable RoutingTree
//!     tree.merge(...)               → new tree or composite route
//! ```
//!
//! # Design Decisions
//! - Trees are immutable; merges build new ones and leave operands untouched
//! - Deterministic: same response always selects the same route
//! - Explicit NoRouteMatched rather than silent default
//! - Transport errors pass through unchanged

pub mod binding;
pub mod declarative;
pub mod error;
pub mod navigator;
pub mod route;
pub mod series;
pub mod tree;

pub use binding::{
    any, any_content_type, any_series, any_status, any_status_code, on, Binding, PartialBinding,
};
pub use error::{DuplicateBindingError, NoRouteMatchedError, RouteError};
pub use navigator::{
    content_type, header, series, status, status_code, ContentTypeNavigator, HeaderNavigator,
    Navigator, SeriesNavigator, StatusCodeNavigator, StatusNavigator,
};
pub use route::{pass, Dispatch, Route};
pub use series::Series;
pub use tree::{dispatch, Merge, RoutingTree};
