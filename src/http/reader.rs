//! Body deserialization context handed to every route.

use serde::de::DeserializeOwned;

use crate::http::response::ClientResponse;
use crate::routing::error::RouteError;

/// Default upper bound for a buffered body.
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Reads JSON bodies out of responses.
#[derive(Debug, Clone)]
pub struct MessageReader {
    max_body_bytes: usize,
}

impl MessageReader {
    pub fn new(max_body_bytes: usize) -> Self {
        Self { max_body_bytes }
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Take the body and deserialize it into `T`.
    ///
    /// Transport failures while reading the body come back as `RouteError::Io`
    /// with the original error inside.
    pub fn read<T: DeserializeOwned>(
        &self,
        response: &mut dyn ClientResponse,
    ) -> Result<T, RouteError> {
        let body = response.take_body()?;
        if body.len() > self.max_body_bytes {
            return Err(RouteError::BodyTooLarge {
                size: body.len(),
                limit: self.max_body_bytes,
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

impl Default for MessageReader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BODY_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::Response;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Problem {
        title: String,
    }

    #[test]
    fn test_read_json() {
        let mut response = Response::new(Bytes::from_static(br#"{"title":"Conflict"}"#));
        let problem: Problem = MessageReader::default().read(&mut response).unwrap();
        assert_eq!(problem.title, "Conflict");
    }

    #[test]
    fn test_body_limit() {
        let mut response = Response::new(Bytes::from_static(br#"{"title":"Conflict"}"#));
        let err = MessageReader::new(4).read::<Problem>(&mut response).unwrap_err();
        assert!(matches!(err, RouteError::BodyTooLarge { size: 20, limit: 4 }));
    }

    #[test]
    fn test_empty_body_is_deserialize_error() {
        let mut response = Response::new(Bytes::new());
        let err = MessageReader::default().read::<Problem>(&mut response).unwrap_err();
        assert!(matches!(err, RouteError::Deserialize(_)));
    }
}
