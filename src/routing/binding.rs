//! Attribute/route pairs and the small DSL that builds them.

use std::fmt::Debug;
use std::hash::Hash;

use http::StatusCode;

use crate::routing::navigator::Navigator;
use crate::routing::route::Route;
use crate::routing::series::Series;
use crate::routing::tree::RoutingTree;

/// One entry of a routing tree. A `None` attribute is the wildcard.
///
/// Equality looks at the attribute only: two bindings for the same value are duplicates
/// whatever their routes.
#[derive(Debug, Clone)]
pub struct Binding<A> {
    attribute: Option<A>,
    route: Route,
}

impl<A> Binding<A> {
    pub fn create(attribute: Option<A>, route: Route) -> Self {
        Self { attribute, route }
    }

    pub fn attribute(&self) -> Option<&A> {
        self.attribute.as_ref()
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn is_wildcard(&self) -> bool {
        self.attribute.is_none()
    }

    pub(crate) fn into_parts(self) -> (Option<A>, Route) {
        (self.attribute, self.route)
    }
}

impl<A: PartialEq> PartialEq for Binding<A> {
    fn eq(&self, other: &Self) -> bool {
        self.attribute == other.attribute
    }
}

impl<A: Eq> Eq for Binding<A> {}

/// Debug rendering of a binding key, used in diagnostics.
pub(crate) fn describe<A: Debug>(attribute: Option<&A>) -> String {
    match attribute {
        Some(a) => format!("{a:?}"),
        None => "wildcard".to_string(),
    }
}

/// An attribute waiting for its route.
#[derive(Debug, Clone)]
#[must_use = "a partial binding does nothing until a route is attached"]
pub struct PartialBinding<A> {
    attribute: Option<A>,
}

impl<A> PartialBinding<A>
where
    A: Debug + Clone + Eq + Hash + Send + Sync + 'static,
{
    pub fn call(self, route: impl Into<Route>) -> Binding<A> {
        Binding::create(self.attribute, route.into())
    }

    /// Bind a nested tree dispatching on another attribute.
    pub fn dispatch<N: Navigator>(self, tree: RoutingTree<N>) -> Binding<A> {
        Binding::create(self.attribute, Route::from(tree))
    }

    pub fn pass(self) -> Binding<A> {
        Binding::create(self.attribute, Route::PassThrough)
    }
}

/// Bind an exact attribute value.
pub fn on<A>(attribute: A) -> PartialBinding<A> {
    PartialBinding {
        attribute: Some(attribute),
    }
}

/// Bind the wildcard.
pub fn any<A>() -> PartialBinding<A> {
    PartialBinding { attribute: None }
}

pub fn any_status() -> PartialBinding<StatusCode> {
    any()
}

pub fn any_status_code() -> PartialBinding<u16> {
    any()
}

pub fn any_series() -> PartialBinding<Series> {
    any()
}

pub fn any_content_type() -> PartialBinding<Option<String>> {
    any()
}
