//! Middleware layer.
//!
//! A [`Middleware`] is a transformer from one handler to another: it receives
//! the next [`BoxedHandler`] in the pipeline and returns a new handler that
//! wraps it. Cross-cutting concerns live here: structured tracing,
//! request-id injection, header inspection.
//!
//! Most middleware is easiest to write with [`from_fn`], which hides the
//! wrapping behind an `async fn(Request, Next)`:
//!
//! ```rust
//! use plait::{Request, Response};
//! use plait::middleware::{Next, from_fn};
//!
//! let require_token = from_fn(|req: Request, next: Next| async move {
//!     if req.header("authorization").is_none() {
//!         return Response::status(http::StatusCode::UNAUTHORIZED);
//!     }
//!     next.run(req).await
//! });
//! ```
//!
//! Built-in middleware:
//! - [`trace()`]: per-request span with method, path, status, latency
//! - [`request_id()`]: propagates or assigns an `x-request-id`

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};

mod from_fn;
pub mod request_id;
mod trace;

pub use from_fn::{Next, from_fn};
pub use request_id::{RequestId, request_id};
pub use trace::trace;

type WrapFn = dyn Fn(BoxedHandler) -> BoxedHandler + Send + Sync;

/// A shared `Handler -> Handler` transformer.
///
/// Cloning is cheap and keeps identity: two clones compare equal, two
/// middleware built from identical closures do not. The name is purely
/// diagnostic and shows up in [`Middlewares::names`](crate::Middlewares::names).
#[derive(Clone)]
pub struct Middleware {
    name: Cow<'static, str>,
    wrap: Arc<WrapFn>,
}

impl Middleware {
    /// Wraps a transformer. The diagnostic name defaults to the closure's
    /// type name.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
    {
        Self { name: Cow::Borrowed(type_name::<F>()), wrap: Arc::new(f) }
    }

    /// Replaces the diagnostic name.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the transformer once, returning the wrapped handler.
    pub fn wrap(&self, next: impl Handler) -> BoxedHandler {
        (self.wrap)(next.into_boxed_handler())
    }

    /// `true` if both values share the same transformer.
    pub fn ptr_eq(&self, other: &Middleware) -> bool {
        Arc::ptr_eq(&self.wrap, &other.wrap)
    }
}

impl PartialEq for Middleware {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Middleware {}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Middleware").field(&self.name).finish()
    }
}
