//! Dispatch and merge counters.
//!
//! # Metrics
//! - `routing_dispatch_total` (counter): dispatch decisions by `outcome`
//!   (`exact`, `wildcard`, `fallback`, `unmatched`)
//! - `routing_merge_total` (counter): merges by `kind` (`tree`, `fallback`)
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed recorder it is a no-op
//! - Label values are static strings, no per-attribute cardinality

use metrics::counter;

/// How a dispatch decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Exact,
    Wildcard,
    Fallback,
    Unmatched,
}

impl DispatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchOutcome::Exact => "exact",
            DispatchOutcome::Wildcard => "wildcard",
            DispatchOutcome::Fallback => "fallback",
            DispatchOutcome::Unmatched => "unmatched",
        }
    }
}

/// What a merge produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeKind {
    Tree,
    Fallback,
}

impl MergeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MergeKind::Tree => "tree",
            MergeKind::Fallback => "fallback",
        }
    }
}

pub fn record_dispatch(outcome: DispatchOutcome) {
    counter!("routing_dispatch_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_merge(kind: MergeKind) {
    counter!("routing_merge_total", "kind" => kind.as_str()).increment(1);
}
