//! Resilience helpers consumed by retry policies outside this crate.
//!
//! # Data Flow
//! ```text
//! Retry-After header value
//!     → delay.rs (delta-seconds or HTTP-date)
//!     → clock.rs (now, for HTTP-date)
//!     → Duration to wait, or None if unrecognized
//! ```
//!
//! # Design Decisions
//! - Retrying itself is not done here; only the delay is computed
//! - Time is injected through `Clock` so parsing is deterministic in tests

pub mod clock;
pub mod delay;

pub use clock::{Clock, FixedClock, SystemClock};
pub use delay::{CompositeDelayParser, DelayParser, HttpDateDelayParser, SecondsDelayParser};
