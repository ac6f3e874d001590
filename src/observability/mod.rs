//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing (dispatch, merge)
//!     → tracing events (navigator, attribute, outcome)
//!     → metrics.rs (dispatch / merge counters)
//!
//! Binary startup:
//!     → logging.rs (subscriber from config + RUST_LOG)
//! ```
//!
//! # Design Decisions
//! - Structured fields instead of formatted messages
//! - Metrics are cheap (facade counters, no-op without a recorder)

pub mod logging;
pub mod metrics;
