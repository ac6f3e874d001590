//! Attribute-keyed dispatch tables.
//!
//! # Responsibilities
//! - Build a tree from bindings, rejecting duplicate attribute values
//! - Dispatch a response: navigate, exact match, then wildcard, else `NoRouteMatched`
//! - Merge trees, bindings and foreign routes into new trees/routes
//!
//! # Merge Rules
//! ```text
//! key only on one side        → kept as is
//! key on both sides           → incoming route wins, unless both are trees over equal
//!                               navigators, then they merge recursively
//! wildcard                    → same rule, keyed by the wildcard sentinel
//! foreign route / other nav.  → Composite { primary: self, fallback: route }
//! ```
//!
//! # Design Decisions
//! - The table is behind an `Arc` and never mutated; every merge allocates a new one
//! - Lookup is by equality, declaration order is kept for diagnostics only

use std::any::Any;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::Arc;

use crate::http::reader::MessageReader;
use crate::http::response::ClientResponse;
use crate::observability::metrics::{self, DispatchOutcome, MergeKind};
use crate::routing::binding::{describe, Binding};
use crate::routing::error::{DuplicateBindingError, NoRouteMatchedError, RouteError};
use crate::routing::navigator::Navigator;
use crate::routing::route::{Dispatch, Route};

/// Bindings in declaration order plus lookup indexes.
#[derive(Clone)]
struct Table<A> {
    bindings: Vec<Binding<A>>,
    index: HashMap<A, usize>,
    wildcard: Option<usize>,
}

impl<A> Table<A>
where
    A: Debug + Clone + Eq + Hash,
{
    fn empty() -> Self {
        Self {
            bindings: Vec::new(),
            index: HashMap::new(),
            wildcard: None,
        }
    }

    /// Position of the binding for `attribute`, `None` being the wildcard key.
    fn slot(&self, attribute: Option<&A>) -> Option<usize> {
        match attribute {
            Some(a) => self.index.get(a).copied(),
            None => self.wildcard,
        }
    }

    fn push(&mut self, binding: Binding<A>) {
        let position = self.bindings.len();
        match binding.attribute() {
            Some(a) => {
                self.index.insert(a.clone(), position);
            }
            None => self.wildcard = Some(position),
        }
        self.bindings.push(binding);
    }

    fn strict(bindings: impl IntoIterator<Item = Binding<A>>) -> Result<Self, DuplicateBindingError> {
        let mut table = Self::empty();
        for binding in bindings {
            if table.slot(binding.attribute()).is_some() {
                return Err(DuplicateBindingError {
                    attribute: describe(binding.attribute()),
                });
            }
            table.push(binding);
        }
        Ok(table)
    }

    fn merged(&self, incoming: impl IntoIterator<Item = Binding<A>>) -> Self {
        let mut table = self.clone();
        for binding in incoming {
            match table.slot(binding.attribute()) {
                Some(position) => {
                    let (attribute, route) = binding.into_parts();
                    let route = merge_routes(table.bindings[position].route(), route);
                    table.bindings[position] = Binding::create(attribute, route);
                }
                None => table.push(binding),
            }
        }
        table
    }

    fn lookup(&self, attribute: &A) -> Option<(&Route, DispatchOutcome)> {
        if let Some(&position) = self.index.get(attribute) {
            return Some((self.bindings[position].route(), DispatchOutcome::Exact));
        }
        self.wildcard
            .map(|position| (self.bindings[position].route(), DispatchOutcome::Wildcard))
    }
}

/// Route for a key present on both sides of a merge.
fn merge_routes(existing: &Route, incoming: Route) -> Route {
    if let (Route::Nested(left), Route::Nested(right)) = (existing, &incoming) {
        if let Some(merged) = left.merge_dispatch(&**right) {
            return merged;
        }
    }
    incoming
}

/// Immutable dispatch table over one navigator.
#[derive(Clone)]
pub struct RoutingTree<N: Navigator> {
    navigator: N,
    table: Arc<Table<N::Attribute>>,
}

impl<N: Navigator> RoutingTree<N> {
    /// Build a tree. Two bindings with the same attribute, or two wildcards, are rejected.
    pub fn dispatch(
        navigator: N,
        bindings: impl IntoIterator<Item = Binding<N::Attribute>>,
    ) -> Result<Self, DuplicateBindingError> {
        let table = Table::strict(bindings)?;
        tracing::trace!(
            navigator = ?navigator,
            bindings = table.bindings.len(),
            "Routing tree built"
        );
        Ok(Self {
            navigator,
            table: Arc::new(table),
        })
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// All bindings, wildcard included, in declaration order.
    pub fn bindings(&self) -> &[Binding<N::Attribute>] {
        &self.table.bindings
    }

    /// Declared attribute values in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &N::Attribute> + '_ {
        self.table.bindings.iter().filter_map(Binding::attribute)
    }

    /// Route bound to exactly `attribute`, ignoring the wildcard.
    pub fn get(&self, attribute: &N::Attribute) -> Option<&Route> {
        self.table
            .index
            .get(attribute)
            .map(|&position| self.table.bindings[position].route())
    }

    pub fn wildcard(&self) -> Option<&Route> {
        self.table
            .wildcard
            .map(|position| self.table.bindings[position].route())
    }

    pub fn len(&self) -> usize {
        self.table.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.bindings.is_empty()
    }

    /// True if both handles share the same table, i.e. one is a clone of the other.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }

    /// New tree with `incoming` merged in. Later duplicates within `incoming` win.
    pub fn merge_bindings(&self, incoming: impl IntoIterator<Item = Binding<N::Attribute>>) -> Self {
        let table = self.table.merged(incoming);
        tracing::trace!(
            navigator = ?self.navigator,
            before = self.table.bindings.len(),
            after = table.bindings.len(),
            "Routing tree merged"
        );
        metrics::record_merge(MergeKind::Tree);
        Self {
            navigator: self.navigator.clone(),
            table: Arc::new(table),
        }
    }

    /// Merge another tree over an equal navigator. `None` if the navigators differ.
    pub fn try_merge_tree(&self, other: &Self) -> Option<Self> {
        if self.navigator != other.navigator {
            return None;
        }
        Some(self.merge_bindings(other.table.bindings.iter().cloned()))
    }

    fn no_route(&self, attribute: &N::Attribute) -> NoRouteMatchedError {
        NoRouteMatchedError {
            navigator: format!("{:?}", self.navigator),
            attribute: format!("{attribute:?}"),
            declared: self.keys().map(|k| format!("{k:?}")).collect(),
        }
    }
}

impl<N: Navigator> Dispatch for RoutingTree<N> {
    fn execute(
        &self,
        response: &mut dyn ClientResponse,
        reader: &MessageReader,
    ) -> Result<(), RouteError> {
        let attribute = self.navigator.navigate(&*response)?;
        match self.table.lookup(&attribute) {
            Some((route, outcome)) => {
                tracing::trace!(
                    navigator = ?self.navigator,
                    attribute = ?attribute,
                    outcome = outcome.as_str(),
                    "Route selected"
                );
                metrics::record_dispatch(outcome);
                route.execute(response, reader)
            }
            None => {
                let err = self.no_route(&attribute);
                tracing::warn!(
                    navigator = %err.navigator,
                    attribute = %err.attribute,
                    declared = ?err.declared,
                    "No route matched"
                );
                metrics::record_dispatch(DispatchOutcome::Unmatched);
                Err(err.into())
            }
        }
    }

    fn resolve(
        &self,
        response: &dyn ClientResponse,
    ) -> Result<Option<(&Route, DispatchOutcome)>, RouteError> {
        let attribute = self.navigator.navigate(response)?;
        Ok(self.table.lookup(&attribute))
    }

    fn merge_route(&self, route: Route) -> Route {
        self.merge(route)
    }

    fn merge_dispatch(&self, other: &dyn Dispatch) -> Option<Route> {
        let other = other.as_any().downcast_ref::<RoutingTree<N>>()?;
        self.try_merge_tree(other).map(Route::from)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<N: Navigator> Debug for RoutingTree<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Key(String);

        impl Debug for Key {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        write!(f, "{:?} ", self.navigator)?;
        f.debug_map()
            .entries(
                self.table
                    .bindings
                    .iter()
                    .map(|b| (Key(describe(b.attribute())), b.route())),
            )
            .finish()
    }
}

impl<N: Navigator> From<RoutingTree<N>> for Route {
    fn from(tree: RoutingTree<N>) -> Self {
        Route::Nested(Arc::new(tree))
    }
}

/// Merging into a routing tree. Never mutates either operand.
pub trait Merge<Rhs> {
    type Output;

    fn merge(&self, rhs: Rhs) -> Self::Output;
}

impl<N: Navigator> Merge<Binding<N::Attribute>> for RoutingTree<N> {
    type Output = RoutingTree<N>;

    fn merge(&self, binding: Binding<N::Attribute>) -> RoutingTree<N> {
        self.merge_bindings(std::iter::once(binding))
    }
}

impl<N: Navigator> Merge<Vec<Binding<N::Attribute>>> for RoutingTree<N> {
    type Output = RoutingTree<N>;

    fn merge(&self, bindings: Vec<Binding<N::Attribute>>) -> RoutingTree<N> {
        self.merge_bindings(bindings)
    }
}

impl<N: Navigator, M: Navigator> Merge<RoutingTree<M>> for RoutingTree<N> {
    type Output = Route;

    fn merge(&self, other: RoutingTree<M>) -> Route {
        self.merge(Route::from(other))
    }
}

impl<N: Navigator> Merge<Route> for RoutingTree<N> {
    type Output = Route;

    fn merge(&self, route: Route) -> Route {
        if let Route::Nested(other) = &route {
            if let Some(merged) = self.merge_dispatch(&**other) {
                return merged;
            }
        }
        tracing::debug!(
            navigator = ?self.navigator,
            fallback = ?route,
            "Route cannot merge recursively, keeping it as fallback"
        );
        metrics::record_merge(MergeKind::Fallback);
        Route::Composite {
            primary: Box::new(Route::from(self.clone())),
            fallback: Box::new(route),
        }
    }
}

/// Build a routing tree; see [`RoutingTree::dispatch`].
pub fn dispatch<N: Navigator>(
    navigator: N,
    bindings: impl IntoIterator<Item = Binding<N::Attribute>>,
) -> Result<RoutingTree<N>, DuplicateBindingError> {
    RoutingTree::dispatch(navigator, bindings)
}
