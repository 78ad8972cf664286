//! Minimal plait example: one pipeline, two requests, logs on stdout.
//!
//! Run with:
//!   cargo run --example basic
//!
//! A router would normally build one pipeline per route at startup and call
//! it once per incoming request. Here we drive it by hand.

use http::{Method, StatusCode};
use plait::middleware::{self, Next};
use plait::{Handler, Request, Response, chain};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let users = chain([
        middleware::trace(),
        middleware::request_id(),
        middleware::from_fn(require_auth),
    ])
    .handler(get_user);

    println!("pipeline: {:?}", users.middlewares().names());

    let anonymous = Request::get("/users/42").expect("valid request");
    let res = users.call(anonymous).await;
    println!("anonymous -> {}", res.status_code());

    let signed_in = Request::builder()
        .method(Method::GET)
        .uri("/users/42")
        .header("authorization", "Bearer demo")
        .body("")
        .expect("valid request");
    let res = users.call(signed_in).await;
    println!(
        "signed in -> {} {} (request id {})",
        res.status_code(),
        String::from_utf8_lossy(res.body()),
        res.header("x-request-id").unwrap_or("-"),
    );
}

// Rejects requests without an `authorization` header before they reach the
// endpoint. The outer layers still see (and log) the 401.
async fn require_auth(req: Request, next: Next) -> Response {
    if req.header("authorization").is_none() {
        return Response::status(StatusCode::UNAUTHORIZED);
    }
    next.run(req).await
}

// GET /users/42
//
// A real router would extract `42` as a path parameter; plait only sees the path.
async fn get_user(req: Request) -> Response {
    let id = req.path().rsplit('/').next().unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#))
}
