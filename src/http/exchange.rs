//! One request/response exchange: plugins, transport, then routing.

use std::sync::Arc;

use crate::http::reader::MessageReader;
use crate::http::request::RequestArguments;
use crate::plugin::{NoopPlugin, Plugin, RequestExecution};
use crate::routing::error::RouteError;
use crate::routing::route::Route;

/// Ties a transport, a plugin chain and a reader together.
#[derive(Clone)]
pub struct Exchange {
    transport: RequestExecution,
    plugin: Arc<dyn Plugin>,
    reader: MessageReader,
}

impl Exchange {
    pub fn new(transport: RequestExecution) -> Self {
        Self {
            transport,
            plugin: Arc::new(NoopPlugin),
            reader: MessageReader::default(),
        }
    }

    pub fn with_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugin = plugin;
        self
    }

    pub fn with_reader(mut self, reader: MessageReader) -> Self {
        self.reader = reader;
        self
    }

    /// Send `arguments` and route the response.
    ///
    /// Errors from plugins, the transport and the route are returned as they are.
    pub fn call(&self, arguments: RequestArguments, route: &Route) -> Result<(), RouteError> {
        tracing::debug!(method = %arguments.method(), uri = %arguments.uri(), "Executing request");
        let prepared = self.plugin.prepare(&arguments, self.transport.clone());
        let execution = self.plugin.apply(&arguments, prepared);
        let mut response = execution(arguments)?;
        route.execute(response.as_mut(), &self.reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::ClientResponse;
    use crate::plugin::execution;
    use crate::routing::{any_status, dispatch, on, status};
    use bytes::Bytes;
    use http::{Method, Response, StatusCode, Uri};
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn get() -> RequestArguments {
        RequestArguments::new(Method::GET, Uri::from_static("http://localhost/orders/1"))
    }

    #[test]
    fn test_routes_transport_response() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let route = Route::from(
            dispatch(
                status(),
                [
                    on(StatusCode::OK).call(Route::call(move |_, _| {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    })),
                    any_status().pass(),
                ],
            )
            .unwrap(),
        );
        let exchange = Exchange::new(execution(|_| {
            Ok(Box::new(Response::new(Bytes::new())) as Box<dyn ClientResponse>)
        }));

        exchange.call(get(), &route).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transport_error_passes_through() {
        let exchange = Exchange::new(execution(|_| {
            Err(io::Error::new(io::ErrorKind::TimedOut, "read timed out").into())
        }));

        let err = exchange.call(get(), &Route::PassThrough).unwrap_err();
        assert_eq!(err.as_io().map(io::Error::kind), Some(io::ErrorKind::TimedOut));
    }
}
