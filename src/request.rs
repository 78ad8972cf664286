//! Request type seen by every handler in a pipeline.

use bytes::Bytes;
use http::{Extensions, HeaderMap, Method, Uri};

use crate::error::Error;

/// An HTTP request travelling through a pipeline.
///
/// Middleware may read and rewrite headers, and stash typed values in
/// [`extensions`](Request::extensions_mut) for layers further in.
#[derive(Debug, Default)]
pub struct Request {
    inner: http::Request<Bytes>,
}

impl Request {
    /// Builder for a request. Defaults to `GET /` with an empty body.
    pub fn builder() -> RequestBuilder {
        RequestBuilder { inner: http::Request::builder() }
    }

    /// `GET` request for `uri` with an empty body.
    pub fn get(uri: &str) -> Result<Self, Error> {
        Self::builder().uri(uri).body(Bytes::new())
    }

    pub fn method(&self) -> &Method { self.inner.method() }
    pub fn uri(&self) -> &Uri { self.inner.uri() }
    pub fn path(&self) -> &str { self.inner.uri().path() }
    pub fn headers(&self) -> &HeaderMap { self.inner.headers() }
    pub fn headers_mut(&mut self) -> &mut HeaderMap { self.inner.headers_mut() }
    pub fn body(&self) -> &Bytes { self.inner.body() }
    pub fn extensions(&self) -> &Extensions { self.inner.extensions() }
    pub fn extensions_mut(&mut self) -> &mut Extensions { self.inner.extensions_mut() }

    /// Case-insensitive header lookup. Values that are not visible ASCII are
    /// treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    pub fn into_inner(self) -> http::Request<Bytes> {
        self.inner
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(inner: http::Request<Bytes>) -> Self {
        Self { inner }
    }
}

// ── RequestBuilder ────────────────────────────────────────────────────────────

/// Fluent builder for [`Request`].
///
/// Obtain via [`Request::builder()`]. Invalid parts are reported once, by the
/// terminating [`body`](RequestBuilder::body) call.
pub struct RequestBuilder {
    inner: http::request::Builder,
}

impl RequestBuilder {
    pub fn method(mut self, method: Method) -> Self {
        self.inner = self.inner.method(method);
        self
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.inner = self.inner.uri(uri);
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.inner = self.inner.header(name, value);
        self
    }

    /// Attach a typed value, readable with `req.extensions().get::<T>()`.
    pub fn extension<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.inner = self.inner.extension(value);
        self
    }

    /// Terminate with a body.
    pub fn body(self, body: impl Into<Bytes>) -> Result<Request, Error> {
        let inner = self.inner.body(body.into())?;
        Ok(Request { inner })
    }
}
