//! HTTP protocol surface of the router.
//!
//! # Data Flow
//! ```text
//! RequestArguments (request.rs)
//!     → plugins prepare / apply (crate::plugin)
//!     → transport execution (caller supplied)
//!     → ClientResponse (response.rs)
//!     → routing, with MessageReader (reader.rs) for bodies
//! ```
//! exchange.rs wires these steps together.

pub mod exchange;
pub mod reader;
pub mod request;
pub mod response;

pub use exchange::Exchange;
pub use reader::MessageReader;
pub use request::{Entity, JsonWriter, MessageWriter, OutputMessage, RequestArguments};
pub use response::ClientResponse;
