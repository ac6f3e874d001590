//! `Retry-After` delay parsing.
//!
//! # Responsibilities
//! - Turn a `Retry-After` header value into a delay
//! - Support both forms: delta-seconds and HTTP-date
//!
//! # Design Decisions
//! - Parsers return `None` for values they do not understand, so they can be chained
//! - Dates in the past yield a zero delay, never a negative one
//! - Only the RFC 1123 form of HTTP-date is accepted; ISO-8601 is not an HTTP-date

use std::time::Duration;

use chrono::DateTime;

use crate::resilience::clock::{Clock, SystemClock};

/// Parses a header value into a delay.
pub trait DelayParser: Send + Sync {
    fn parse(&self, value: &str) -> Option<Duration>;
}

/// Delta-seconds form, e.g. `120`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecondsDelayParser;

impl DelayParser for SecondsDelayParser {
    fn parse(&self, value: &str) -> Option<Duration> {
        value.trim().parse::<u64>().ok().map(Duration::from_secs)
    }
}

/// HTTP-date form, e.g. `Sun, 24 Jun 2018 01:19:54 GMT`, relative to a clock.
#[derive(Debug, Clone, Default)]
pub struct HttpDateDelayParser<C = SystemClock> {
    clock: C,
}

impl<C: Clock> HttpDateDelayParser<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> DelayParser for HttpDateDelayParser<C> {
    fn parse(&self, value: &str) -> Option<Duration> {
        let value = value.trim();
        if !value.ends_with("GMT") {
            return None;
        }
        let until = DateTime::parse_from_rfc2822(value).ok()?;
        let delay = until.signed_duration_since(self.clock.now());
        Some(delay.to_std().unwrap_or(Duration::ZERO))
    }
}

/// Tries each parser in order; the first result wins.
pub struct CompositeDelayParser {
    parsers: Vec<Box<dyn DelayParser>>,
}

impl CompositeDelayParser {
    pub fn new(parsers: Vec<Box<dyn DelayParser>>) -> Self {
        Self { parsers }
    }
}

impl Default for CompositeDelayParser {
    fn default() -> Self {
        Self::new(vec![
            Box::new(SecondsDelayParser),
            Box::new(HttpDateDelayParser::new(SystemClock)),
        ])
    }
}

impl DelayParser for CompositeDelayParser {
    fn parse(&self, value: &str) -> Option<Duration> {
        let delay = self.parsers.iter().find_map(|p| p.parse(value));
        if delay.is_none() {
            tracing::debug!(value = %value, "Unrecognized Retry-After value");
        }
        delay
    }
}
