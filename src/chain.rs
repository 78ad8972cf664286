//! Middleware chains.
//!
//! A [`Middlewares`] value is an ordered, immutable list of [`Middleware`].
//! Putting an endpoint at the end of it yields a single handler:
//!
//! ```text
//! chain([a, b, c]).handler(endpoint)
//!
//!   request  ──▶ a ──▶ b ──▶ c ──▶ endpoint
//!   response ◀── a ◀── b ◀── c ◀──┘
//! ```
//!
//! The first middleware is the outermost layer: it sees the request first
//! and the response last. Building that shape means wrapping from the back,
//! `a.wrap(b.wrap(c.wrap(endpoint)))`.
//!
//! Two entry points share the same wrapping:
//! - [`Middlewares::handler`] keeps the endpoint and the middleware list
//!   alongside the composed pipeline, for routers and diagnostics that want
//!   to inspect what was registered.
//! - [`Middlewares::handler_fn`] returns only the composed [`BoxedHandler`].

use std::fmt;
use std::slice;
use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::middleware::Middleware;
use crate::request::Request;

/// Collects middleware into a [`Middlewares`] chain, preserving order.
///
/// ```rust
/// use plait::{Request, chain, middleware};
///
/// let app = chain([middleware::request_id(), middleware::trace()])
///     .handler(|_req: Request| async { "hello" });
///
/// assert_eq!(app.middlewares().names(), ["request_id", "trace"]);
/// ```
pub fn chain(middlewares: impl IntoIterator<Item = Middleware>) -> Middlewares {
    middlewares.into_iter().collect()
}

// ── Middlewares ───────────────────────────────────────────────────────────────

/// An ordered middleware stack. Duplicates are kept; empty is valid.
///
/// The list is shared and never mutated once built, so every
/// [`ChainHandler`] holds a stable snapshot of the stack it was built from.
#[derive(Clone, PartialEq, Eq)]
pub struct Middlewares(Arc<[Middleware]>);

impl Middlewares {
    pub fn new() -> Self {
        Self(Arc::from(Vec::new()))
    }

    /// Returns a new chain with `middleware` appended as the innermost layer.
    /// `self` is left as it was.
    pub fn with(&self, middleware: Middleware) -> Self {
        let mut list = self.0.to_vec();
        list.push(middleware);
        Self(list.into())
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn iter(&self) -> slice::Iter<'_, Middleware> { self.0.iter() }
    pub fn as_slice(&self) -> &[Middleware] { &self.0 }

    /// Diagnostic names, outermost first.
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(Middleware::name).collect()
    }

    /// Builds an inspectable pipeline around `endpoint`.
    pub fn handler(&self, endpoint: impl Handler) -> ChainHandler {
        let endpoint = endpoint.into_boxed_handler();
        ChainHandler {
            composed: wrap(&self.0, endpoint.clone()),
            endpoint,
            middlewares: self.clone(),
        }
    }

    /// Builds the pipeline around `endpoint` and returns only the composed
    /// handler.
    pub fn handler_fn(&self, endpoint: impl Handler) -> BoxedHandler {
        wrap(&self.0, endpoint.into_boxed_handler())
    }
}

/// Applies each middleware exactly once, last to first, so that index 0 ends
/// up outermost. An empty list returns `endpoint` itself.
fn wrap(middlewares: &[Middleware], endpoint: BoxedHandler) -> BoxedHandler {
    middlewares
        .iter()
        .rev()
        .fold(endpoint, |next, middleware| middleware.wrap(next))
}

impl Default for Middlewares {
    fn default() -> Self { Self::new() }
}

impl FromIterator<Middleware> for Middlewares {
    fn from_iter<I: IntoIterator<Item = Middleware>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Middleware>> for Middlewares {
    fn from(list: Vec<Middleware>) -> Self {
        Self(list.into())
    }
}

impl<'a> IntoIterator for &'a Middlewares {
    type Item = &'a Middleware;
    type IntoIter = slice::Iter<'a, Middleware>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Middlewares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(Middleware::name)).finish()
    }
}

// ── ChainHandler ──────────────────────────────────────────────────────────────

/// A composed pipeline that remembers how it was built.
///
/// Calling it runs the composed handler. The [`endpoint`](Self::endpoint)
/// is kept for inspection only and is never called directly, so invoking it
/// yourself bypasses every middleware.
#[derive(Clone)]
pub struct ChainHandler {
    endpoint: BoxedHandler,
    composed: BoxedHandler,
    middlewares: Middlewares,
}

impl ChainHandler {
    /// The terminal handler, unwrapped.
    pub fn endpoint(&self) -> &BoxedHandler {
        &self.endpoint
    }

    /// The endpoint wrapped in every middleware.
    pub fn composed(&self) -> &BoxedHandler {
        &self.composed
    }

    /// The stack this pipeline was built from.
    pub fn middlewares(&self) -> &Middlewares {
        &self.middlewares
    }
}

impl Handler for ChainHandler {
    fn call(&self, req: Request) -> BoxFuture {
        self.composed.call(req)
    }
}

impl fmt::Debug for ChainHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainHandler")
            .field("middlewares", &self.middlewares)
            .finish_non_exhaustive()
    }
}
