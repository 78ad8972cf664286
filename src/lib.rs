//! # plait
//!
//! Ordered middleware pipelines around async HTTP handlers.
//! One stack, one endpoint, one handler out.
//!
//! ## The contract
//!
//! plait composes. It does not route, bind sockets or parse the wire; the
//! router or server in front of it does that, then hands plait a
//! [`Request`] and awaits a [`Response`]. Everything in a pipeline speaks
//! one interface, [`Handler`]:
//!
//! - the **endpoint**: any `async fn(Request) -> impl IntoResponse`
//! - each **layer** a [`Middleware`] produces around the next handler
//! - the finished **pipeline**, so pipelines nest inside other pipelines
//!
//! ## Ordering
//!
//! The first middleware in a chain is the outermost layer. For
//! `chain([a, b])` the request passes `a` then `b` before it reaches the
//! endpoint, and the response passes `b` then `a` on its way out.
//!
//! ## Quick start
//!
//! ```rust
//! use plait::middleware::{self, Next};
//! use plait::{Handler, Request, Response, chain};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let app = chain([
//!     middleware::trace(),
//!     middleware::request_id(),
//!     middleware::from_fn(require_json),
//! ])
//! .handler(create_user);
//!
//! let req = Request::builder()
//!     .method(http::Method::POST)
//!     .uri("/users")
//!     .header("content-type", "application/json")
//!     .body(r#"{"name":"alice"}"#)
//!     .unwrap();
//!
//! let res = app.call(req).await;
//! assert_eq!(res.status_code(), http::StatusCode::CREATED);
//! assert!(res.header("x-request-id").is_some());
//! # }
//!
//! async fn require_json(req: Request, next: Next) -> Response {
//!     if req.header("content-type") != Some("application/json") {
//!         return Response::status(http::StatusCode::UNSUPPORTED_MEDIA_TYPE);
//!     }
//!     next.run(req).await
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     Response::builder()
//!         .status(http::StatusCode::CREATED)
//!         .json(req.body().clone())
//! }
//! ```

mod chain;
mod error;
mod handler;
mod request;
mod response;

pub mod middleware;

pub use chain::{ChainHandler, Middlewares, chain};
pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, Handler};
pub use middleware::Middleware;
pub use request::{Request, RequestBuilder};
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
