//! Unified error type.

use std::fmt;

/// The error type returned by plait's fallible operations.
///
/// Application-level errors (404, 422, etc.) are expressed as
/// [`Response`](crate::Response) values, and nothing in a pipeline ever
/// returns `Error`. This type surfaces construction failures only: a request
/// assembled from an invalid method, URI or header.
#[derive(Debug)]
pub struct Error(http::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid request: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Self(e)
    }
}
