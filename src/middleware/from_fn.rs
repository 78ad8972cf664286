use std::any::type_name;
use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::request::Request;
use crate::response::{IntoResponse, Response};

use super::Middleware;

/// Builds a [`Middleware`] from an async function of the request and the
/// rest of the pipeline.
///
/// ```text
/// async fn name(req: Request, next: Next) -> impl IntoResponse
/// ```
///
/// Code before `next.run(req)` sees the request on the way in, code after it
/// sees the response on the way out. Returning without calling `next`
/// short-circuits every inner layer.
pub fn from_fn<F, Fut, R>(f: F) -> Middleware
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    let f = Arc::new(f);
    Middleware::new(move |next| {
        FromFn { f: Arc::clone(&f), next }.into_boxed_handler()
    })
    .with_name(type_name::<F>())
}

/// The remainder of the pipeline, handed to [`from_fn`] middleware.
#[derive(Clone, Debug)]
pub struct Next {
    inner: BoxedHandler,
}

impl Next {
    /// Runs every inner layer and the endpoint.
    pub async fn run(self, req: Request) -> Response {
        self.inner.call(req).await
    }
}

/// One application of a [`from_fn`] middleware around a concrete `next`.
struct FromFn<F> {
    f: Arc<F>,
    next: BoxedHandler,
}

impl<F, Fut, R> Handler for FromFn<F>
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.f)(req, Next { inner: self.next.clone() });
        Box::pin(async move { fut.await.into_response() })
    }
}
