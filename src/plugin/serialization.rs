//! Lazy request body serialization.
//!
//! # Responsibilities
//! - Attach an entity to requests that do not carry one yet
//! - Defer writing until the transport asks for the bytes
//!
//! # Design Decisions
//! - A request that already has an entity is passed through untouched
//! - The entity is empty exactly when the request has no model body

use std::io;
use std::sync::Arc;

use crate::http::request::{Entity, MessageWriter, OutputMessage, RequestArguments};
use crate::plugin::{execution, Plugin, RequestExecution};

/// Supplies a serializing entity on `prepare`.
pub struct SerializationPlugin<W> {
    writer: Arc<W>,
}

impl<W: MessageWriter + 'static> SerializationPlugin<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Arc::new(writer),
        }
    }
}

impl<W: MessageWriter + 'static> Plugin for SerializationPlugin<W> {
    fn prepare(&self, _arguments: &RequestArguments, inner: RequestExecution) -> RequestExecution {
        let writer = self.writer.clone();
        execution(move |arguments: RequestArguments| {
            if arguments.entity().is_some() {
                return inner(arguments);
            }
            tracing::trace!(uri = %arguments.uri(), "Attaching serializing entity");
            let entity = SerializingEntity {
                writer: writer.clone(),
                arguments: arguments.clone(),
            };
            inner(arguments.with_entity(Arc::new(entity)))
        })
    }
}

/// Writes the model body of the captured arguments when asked.
struct SerializingEntity<W> {
    writer: Arc<W>,
    arguments: RequestArguments,
}

impl<W: MessageWriter> Entity for SerializingEntity<W> {
    fn write_to(&self, message: &mut OutputMessage) -> io::Result<()> {
        self.writer.write(message, &self.arguments)
    }

    fn is_empty(&self) -> bool {
        self.arguments.body().is_none()
    }
}
