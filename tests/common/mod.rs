//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};

use response_router::http::ClientResponse;
use response_router::Route;

/// Response with `status` and an empty body.
pub fn response(status: StatusCode) -> Response<Bytes> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .unwrap()
}

/// Response with `status` and a JSON body.
pub fn json_response(status: StatusCode, body: &'static str) -> Response<Bytes> {
    Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(Bytes::from_static(body.as_bytes()))
        .unwrap()
}

/// Terminal route counting its invocations.
#[derive(Clone, Default)]
pub struct Recorder {
    hits: Arc<AtomicUsize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> Route {
        let hits = self.hits.clone();
        Route::call(move |response, _reader| {
            hits.fetch_add(1, Ordering::SeqCst);
            response.take_body()?;
            Ok(())
        })
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn was_called(&self) -> bool {
        self.hits() > 0
    }
}

/// Response whose every read fails, as a broken connection would.
pub struct BrokenResponse {
    pub kind: io::ErrorKind,
}

impl BrokenResponse {
    pub fn new(kind: io::ErrorKind) -> Self {
        Self { kind }
    }

    fn error(&self) -> io::Error {
        io::Error::new(self.kind, "connection reset by peer")
    }
}

impl ClientResponse for BrokenResponse {
    fn status(&self) -> io::Result<StatusCode> {
        Err(self.error())
    }

    fn headers(&self) -> io::Result<&HeaderMap> {
        Err(self.error())
    }

    fn take_body(&mut self) -> io::Result<Bytes> {
        Err(self.error())
    }
}

/// Route that fails with an `io::Error` of `kind`.
pub fn failing_route(kind: io::ErrorKind) -> Route {
    Route::call(move |_, _| Err(io::Error::new(kind, "route failed").into()))
}
