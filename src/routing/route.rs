//! Route variants and the dispatch seam used for nesting.
//!
//! # Variants
//! - `Terminal`: runs a caller-supplied action
//! - `Nested`: a routing tree over another attribute
//! - `PassThrough`: consumes the body, nothing else
//! - `Composite`: a primary route plus a fallback for what the primary leaves unresolved
//!
//! # Design Decisions
//! - Nested trees are held behind the object-safe `Dispatch` trait so one route table can
//!   mix navigators of different attribute types
//! - Recursive merge eligibility is decided by `Dispatch::merge_dispatch`, which only accepts
//!   a tree of the same navigator type with an equal navigator

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::http::reader::MessageReader;
use crate::http::response::ClientResponse;
use crate::observability::metrics::{self, DispatchOutcome};
use crate::routing::error::RouteError;

/// Signature of a terminal action.
pub type Action =
    dyn Fn(&mut dyn ClientResponse, &MessageReader) -> Result<(), RouteError> + Send + Sync;

/// A routing tree with its attribute type erased.
pub trait Dispatch: fmt::Debug + Send + Sync + 'static {
    /// Navigate, look up and run the matching route.
    fn execute(
        &self,
        response: &mut dyn ClientResponse,
        reader: &MessageReader,
    ) -> Result<(), RouteError>;

    /// Navigate and look up without running anything. `None` means neither an exact
    /// binding nor a wildcard applies.
    fn resolve(
        &self,
        response: &dyn ClientResponse,
    ) -> Result<Option<(&Route, DispatchOutcome)>, RouteError>;

    /// Merge an arbitrary route into this tree.
    fn merge_route(&self, route: Route) -> Route;

    /// Merge `other` recursively if it is a tree over an equal navigator.
    fn merge_dispatch(&self, other: &dyn Dispatch) -> Option<Route>;

    fn as_any(&self) -> &dyn Any;
}

/// A response handler.
#[derive(Clone)]
pub enum Route {
    Terminal(Arc<Action>),
    Nested(Arc<dyn Dispatch>),
    PassThrough,
    Composite {
        primary: Box<Route>,
        fallback: Box<Route>,
    },
}

impl Route {
    /// Terminal route running `action`.
    pub fn call<F>(action: F) -> Self
    where
        F: Fn(&mut dyn ClientResponse, &MessageReader) -> Result<(), RouteError>
            + Send
            + Sync
            + 'static,
    {
        Route::Terminal(Arc::new(action))
    }

    /// Terminal route that deserializes the body into `T` and hands it to `consumer`.
    pub fn to<T, F>(consumer: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(T) -> Result<(), RouteError> + Send + Sync + 'static,
    {
        Route::call(move |response, reader| consumer(reader.read(response)?))
    }

    /// Run this route against `response`.
    pub fn execute(
        &self,
        response: &mut dyn ClientResponse,
        reader: &MessageReader,
    ) -> Result<(), RouteError> {
        match self {
            Route::Terminal(action) => action(response, reader),
            Route::Nested(tree) => tree.execute(response, reader),
            Route::PassThrough => {
                response.take_body()?;
                Ok(())
            }
            Route::Composite { primary, fallback } => match primary.select(&*response)? {
                Some((route, outcome)) => {
                    if let Some(outcome) = outcome {
                        tracing::trace!(outcome = outcome.as_str(), "Route selected by primary");
                        metrics::record_dispatch(outcome);
                    }
                    route.execute(response, reader)
                }
                None => {
                    tracing::debug!("Primary route left response unresolved, using fallback");
                    metrics::record_dispatch(DispatchOutcome::Fallback);
                    fallback.execute(response, reader)
                }
            },
        }
    }

    /// The route that would handle `response` at this level, if any.
    ///
    /// Terminal and pass-through routes resolve to themselves.
    pub fn resolve(&self, response: &dyn ClientResponse) -> Result<Option<&Route>, RouteError> {
        Ok(self.select(response)?.map(|(route, _)| route))
    }

    /// Like `resolve`, plus how a tree reached the decision. Terminal and pass-through
    /// routes select themselves without one.
    fn select(
        &self,
        response: &dyn ClientResponse,
    ) -> Result<Option<(&Route, Option<DispatchOutcome>)>, RouteError> {
        match self {
            Route::Nested(tree) => Ok(tree
                .resolve(response)?
                .map(|(route, outcome)| (route, Some(outcome)))),
            Route::Composite { primary, fallback } => match primary.select(response)? {
                Some(selected) => Ok(Some(selected)),
                None => fallback.select(response),
            },
            Route::Terminal(_) | Route::PassThrough => Ok(Some((self, None))),
        }
    }

    /// Combine with `other`. Trees delegate to their own merge; otherwise `other` only
    /// handles what this route leaves unresolved, so terminal routes absorb it.
    ///
    /// A composite first offers `other` to its primary for a recursive merge and only
    /// hands it to the fallback when the primary cannot take it.
    pub fn merge(&self, other: Route) -> Route {
        match self {
            Route::Nested(tree) => tree.merge_route(other),
            Route::Composite { primary, fallback } => {
                if let Some(merged) = primary.merge_nested(&other) {
                    return Route::Composite {
                        primary: Box::new(merged),
                        fallback: fallback.clone(),
                    };
                }
                Route::Composite {
                    primary: primary.clone(),
                    fallback: Box::new(fallback.merge(other)),
                }
            }
            Route::Terminal(_) | Route::PassThrough => self.clone(),
        }
    }

    /// Recursive merge of two trees over an equal navigator, reaching through composite
    /// primaries. `None` if `other` is not such a tree.
    fn merge_nested(&self, other: &Route) -> Option<Route> {
        match (self, other) {
            (Route::Nested(tree), Route::Nested(incoming)) => tree.merge_dispatch(&**incoming),
            (Route::Composite { primary, fallback }, _) => {
                primary.merge_nested(other).map(|merged| Route::Composite {
                    primary: Box::new(merged),
                    fallback: fallback.clone(),
                })
            }
            _ => None,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Route::Nested(_))
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Terminal(_) => f.write_str("Terminal"),
            Route::Nested(tree) => fmt::Debug::fmt(tree, f),
            Route::PassThrough => f.write_str("PassThrough"),
            Route::Composite { primary, fallback } => f
                .debug_struct("Composite")
                .field("primary", primary)
                .field("fallback", fallback)
                .finish(),
        }
    }
}

/// Route that consumes the response and does nothing else.
pub fn pass() -> Route {
    Route::PassThrough
}
