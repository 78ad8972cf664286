//! Per-request tracing.

use tokio::time::Instant;
use tracing::{Instrument, info, info_span, warn};

use crate::request::Request;
use crate::response::Response;

use super::{Middleware, Next, from_fn};

/// Opens an `INFO` span named `request` with the method and path, and logs
/// one event when the inner pipeline has answered:
///
/// ```text
/// INFO request{method=GET path=/users/42}: request completed status=200 latency_ms=3
/// WARN request{method=GET path=/boom}: request failed status=500 latency_ms=1
/// ```
///
/// Place it first in a chain so the latency covers every other layer.
pub fn trace() -> Middleware {
    from_fn(trace_request).with_name("trace")
}

async fn trace_request(req: Request, next: Next) -> Response {
    let span = info_span!("request", method = %req.method(), path = %req.path());

    async move {
        let start = Instant::now();
        let res = next.run(req).await;
        let status = res.status_code().as_u16();
        let latency_ms = start.elapsed().as_millis() as u64;

        if res.status_code().is_server_error() {
            warn!(status, latency_ms, "request failed");
        } else {
            info!(status, latency_ms, "request completed");
        }
        res
    }
    .instrument(span)
    .await
}
