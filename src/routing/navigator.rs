//! Attribute extraction.
//!
//! # Responsibilities
//! - Read one attribute (status, series, header...) from a response
//! - Pass transport failures through untouched
//!
//! # Design Decisions
//! - Navigators are plain values compared with `PartialEq`; two trees are merge
//!   candidates only if their navigators have the same type and compare equal
//! - Extraction is deterministic: same response, same attribute

use std::fmt::Debug;
use std::hash::Hash;
use std::io;

use http::header::{HeaderName, CONTENT_TYPE};
use http::StatusCode;

use crate::http::response::ClientResponse;
use crate::routing::series::Series;

/// Extracts a dispatch attribute from a response.
pub trait Navigator: Debug + PartialEq + Clone + Send + Sync + 'static {
    type Attribute: Debug + Clone + Eq + Hash + Send + Sync + 'static;

    fn navigate(&self, response: &dyn ClientResponse) -> io::Result<Self::Attribute>;
}

/// Dispatches on the full status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusNavigator;

impl Navigator for StatusNavigator {
    type Attribute = StatusCode;

    fn navigate(&self, response: &dyn ClientResponse) -> io::Result<StatusCode> {
        response.status()
    }
}

/// Dispatches on the raw numeric status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCodeNavigator;

impl Navigator for StatusCodeNavigator {
    type Attribute = u16;

    fn navigate(&self, response: &dyn ClientResponse) -> io::Result<u16> {
        Ok(response.status()?.as_u16())
    }
}

/// Dispatches on the status class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesNavigator;

impl Navigator for SeriesNavigator {
    type Attribute = Series;

    fn navigate(&self, response: &dyn ClientResponse) -> io::Result<Series> {
        let status = response.status()?;
        Series::of(status).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("status {} has no series", status.as_u16()),
            )
        })
    }
}

/// Dispatches on the value of a single header. Absent or non-UTF-8 values map to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNavigator {
    name: HeaderName,
}

impl HeaderNavigator {
    pub fn new(name: HeaderName) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &HeaderName {
        &self.name
    }
}

impl Navigator for HeaderNavigator {
    type Attribute = Option<String>;

    fn navigate(&self, response: &dyn ClientResponse) -> io::Result<Option<String>> {
        Ok(response
            .headers()?
            .get(&self.name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned))
    }
}

/// Dispatches on the media type of the `Content-Type` header, without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentTypeNavigator;

impl Navigator for ContentTypeNavigator {
    type Attribute = Option<String>;

    fn navigate(&self, response: &dyn ClientResponse) -> io::Result<Option<String>> {
        Ok(response
            .headers()?
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|essence| essence.trim().to_ascii_lowercase())
            .filter(|essence| !essence.is_empty()))
    }
}

pub fn status() -> StatusNavigator {
    StatusNavigator
}

pub fn status_code() -> StatusCodeNavigator {
    StatusCodeNavigator
}

pub fn series() -> SeriesNavigator {
    SeriesNavigator
}

pub fn header(name: HeaderName) -> HeaderNavigator {
    HeaderNavigator::new(name)
}

pub fn content_type() -> ContentTypeNavigator {
    ContentTypeNavigator
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::Response;

    fn response(status: u16, content_type: Option<&str>) -> Response<Bytes> {
        let mut builder = Response::builder().status(status);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Bytes::new()).unwrap()
    }

    #[test]
    fn test_status_navigators() {
        let r = response(201, None);
        assert_eq!(status().navigate(&r).unwrap(), StatusCode::CREATED);
        assert_eq!(status_code().navigate(&r).unwrap(), 201);
        assert_eq!(series().navigate(&r).unwrap(), Series::Successful);
    }

    #[test]
    fn test_series_outside_known_classes() {
        let err = series().navigate(&response(799, None)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_content_type_strips_parameters() {
        let r = response(200, Some("Application/JSON; charset=utf-8"));
        assert_eq!(
            content_type().navigate(&r).unwrap().as_deref(),
            Some("application/json")
        );
        assert_eq!(content_type().navigate(&response(200, None)).unwrap(), None);
    }

    #[test]
    fn test_header_navigator_equality() {
        let etag = HeaderName::from_static("etag");
        let location = HeaderName::from_static("location");
        assert_eq!(header(etag.clone()), header(etag));
        assert_ne!(header(HeaderName::from_static("etag")), header(location));
    }
}
