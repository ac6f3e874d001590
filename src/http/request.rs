//! Outgoing request description shared by plugins and the transport.
//!
//! # Responsibilities
//! - Carry method, URI, headers and the (optional) model body of a request
//! - Carry the entity that will eventually produce the body bytes
//! - Define the writer contract that turns a model body into bytes
//!
//! # Design Decisions
//! - Arguments are values; plugins derive new ones with `with_*` instead of mutating
//! - The entity is shared (`Arc`) so cloned arguments stay cheap

use std::fmt;
use std::io;
use std::sync::Arc;

use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, Uri};
use serde_json::Value;

/// Buffer an entity writes its headers and body into.
#[derive(Debug, Default)]
pub struct OutputMessage {
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Lazily produced request body.
pub trait Entity: Send + Sync {
    fn write_to(&self, message: &mut OutputMessage) -> io::Result<()>;

    /// True if there is nothing to write.
    fn is_empty(&self) -> bool;
}

/// Turns the model body of a request into bytes.
pub trait MessageWriter: Send + Sync {
    fn write(&self, message: &mut OutputMessage, arguments: &RequestArguments) -> io::Result<()>;
}

/// Writes the model body as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl MessageWriter for JsonWriter {
    fn write(&self, message: &mut OutputMessage, arguments: &RequestArguments) -> io::Result<()> {
        let Some(body) = arguments.body() else {
            return Ok(());
        };
        if !message.headers.contains_key(CONTENT_TYPE) {
            message
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        serde_json::to_writer(&mut message.body, body)?;
        Ok(())
    }
}

/// Everything known about a request before it goes on the wire.
#[derive(Clone)]
pub struct RequestArguments {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Value>,
    entity: Option<Arc<dyn Entity>>,
}

impl RequestArguments {
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            body: None,
            entity: None,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The model object to be serialized, if any.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn entity(&self) -> Option<&Arc<dyn Entity>> {
        self.entity.as_ref()
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_entity(mut self, entity: Arc<dyn Entity>) -> Self {
        self.entity = Some(entity);
        self
    }
}

impl fmt::Debug for RequestArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestArguments")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("entity", &self.entity.as_ref().map(|_| "<entity>"))
            .finish()
    }
}
