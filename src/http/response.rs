//! Inbound response abstraction.
//!
//! # Responsibilities
//! - Expose the parts of a response the routing engine reads (status, headers, body)
//! - Surface transport failures as `io::Error` on every read
//!
//! # Design Decisions
//! - Object-safe trait so routes receive `&mut dyn ClientResponse`
//! - The body is taken, not borrowed: a route consumes it at most once

use std::io;

use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};

/// A response handed to the routing engine by the transport.
pub trait ClientResponse: Send {
    /// Read the status line.
    fn status(&self) -> io::Result<StatusCode>;

    /// Read the response headers.
    fn headers(&self) -> io::Result<&HeaderMap>;

    /// Take the buffered body, leaving an empty one behind.
    fn take_body(&mut self) -> io::Result<Bytes>;
}

impl ClientResponse for Response<Bytes> {
    fn status(&self) -> io::Result<StatusCode> {
        Ok(Response::status(self))
    }

    fn headers(&self) -> io::Result<&HeaderMap> {
        Ok(Response::headers(self))
    }

    fn take_body(&mut self) -> io::Result<Bytes> {
        Ok(std::mem::take(self.body_mut()))
    }
}

impl<R: ClientResponse + ?Sized> ClientResponse for Box<R> {
    fn status(&self) -> io::Result<StatusCode> {
        (**self).status()
    }

    fn headers(&self) -> io::Result<&HeaderMap> {
        (**self).headers()
    }

    fn take_body(&mut self) -> io::Result<Bytes> {
        (**self).take_body()
    }
}
