//! Request-id propagation.
//!
//! Reuses the id a proxy already assigned, or mints a UUID v4 when there is
//! none. The id is written back onto the request header, exposed to inner
//! layers as a [`RequestId`] extension, and echoed on the response.

use std::fmt;

use http::HeaderValue;
use http::header::HeaderName;
use uuid::Uuid;

use crate::request::Request;

use super::{Middleware, Next, from_fn};

/// Header used by [`request_id()`].
pub const X_REQUEST_ID: &str = "x-request-id";

/// The id assigned to the current request.
///
/// ```rust
/// # use plait::Request;
/// use plait::middleware::RequestId;
///
/// async fn handler(req: Request) -> String {
///     match req.extensions().get::<RequestId>() {
///         Some(id) => format!("request {id}"),
///         None => "no id".to_owned(),
///     }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Propagates `x-request-id`.
pub fn request_id() -> Middleware {
    with_header(HeaderName::from_static(X_REQUEST_ID))
}

/// Propagates the request id carried in `header`.
pub fn with_header(header: HeaderName) -> Middleware {
    from_fn(move |mut req: Request, next: Next| {
        let header = header.clone();
        async move {
            let id = match req.header(header.as_str()) {
                Some(id) if !id.is_empty() => id.to_owned(),
                _ => Uuid::new_v4().to_string(),
            };
            // Either came from `to_str` or is a hyphenated UUID: visible ASCII.
            let value = HeaderValue::from_str(&id).expect("request id is a valid header value");

            req.headers_mut().insert(header.clone(), value.clone());
            req.extensions_mut().insert(RequestId(id));

            let mut res = next.run(req).await;
            res.headers_mut().insert(header, value);
            res
        }
    })
    .with_name("request_id")
}
