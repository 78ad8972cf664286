//! Handler trait and type erasure.
//!
//! # One capability for every stage
//!
//! A pipeline is built from three kinds of things: the terminal endpoint,
//! the layers produced by each middleware, and the finished pipeline. All
//! three speak the same [`Handler`] interface. That uniformity is what lets
//! a middleware wrap *any* handler, including a pipeline built elsewhere.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! async fn hello(req: Request) -> Response { … }   ← user writes this
//!        ↓ blanket impl
//! <hello as Handler>::call                         ← boxes the future
//!        ↓ hello.into_boxed_handler()
//! BoxedHandler(Arc<dyn Handler>)                   ← what middleware receive
//!        ↓ at request time
//! handler.call(req).await                          ← one vtable dispatch
//! ```
//!
//! The only runtime cost per layer is **one virtual call** and **one boxed
//! future**. Cloning a [`BoxedHandler`] is an atomic increment.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Future type ───────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` so the runtime can move it across worker threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

// ── Handler trait ─────────────────────────────────────────────────────────────

/// Anything that turns a [`Request`] into a [`Response`].
///
/// Implemented automatically for every `async fn` (or closure returning a
/// future) with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// It is also implemented by [`BoxedHandler`] and by
/// [`ChainHandler`](crate::ChainHandler), so a composed pipeline can be used
/// anywhere a plain handler can.
pub trait Handler: Send + Sync + 'static {
    /// Processes one request.
    fn call(&self, req: Request) -> BoxFuture;

    /// Erases the concrete type.
    ///
    /// [`BoxedHandler`] overrides this to return itself, so boxing an already
    /// boxed handler never adds a layer of indirection and keeps its identity.
    fn into_boxed_handler(self) -> BoxedHandler
    where
        Self: Sized,
    {
        BoxedHandler(Arc::new(self))
    }
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        // Call the wrapped function to get the concrete `Fut`, then map its
        // output through `IntoResponse` inside one boxed future.
        let fut = self(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

// ── BoxedHandler ──────────────────────────────────────────────────────────────

/// A type-erased handler shared across concurrent requests.
///
/// This is the currency middleware trade in: a [`Middleware`](crate::Middleware)
/// receives the next `BoxedHandler` and returns a new one wrapping it.
#[derive(Clone)]
pub struct BoxedHandler(Arc<dyn Handler>);

impl BoxedHandler {
    pub fn new(handler: impl Handler) -> Self {
        handler.into_boxed_handler()
    }

    /// `true` if both values point at the same underlying handler.
    pub fn ptr_eq(&self, other: &BoxedHandler) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Handler for BoxedHandler {
    fn call(&self, req: Request) -> BoxFuture {
        self.0.call(req)
    }

    fn into_boxed_handler(self) -> BoxedHandler {
        self
    }
}

impl fmt::Debug for BoxedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedHandler { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn hello(_req: Request) -> &'static str {
        "hello"
    }

    #[tokio::test]
    async fn async_fn_is_a_handler() {
        let res = Handler::call(&hello, Request::default()).await;
        assert_eq!(res.body(), "hello");
    }

    #[tokio::test]
    async fn closures_are_handlers() {
        let handler = |req: Request| async move { format!("path={}", req.path()) };
        let res = Handler::call(&handler, Request::get("/users").unwrap()).await;
        assert_eq!(res.body(), "path=/users");
    }

    #[test]
    fn boxing_a_boxed_handler_keeps_identity() {
        let boxed = BoxedHandler::new(hello);
        let again = BoxedHandler::new(boxed.clone());
        assert!(boxed.ptr_eq(&again));
        assert!(!boxed.ptr_eq(&BoxedHandler::new(hello)));
    }
}
