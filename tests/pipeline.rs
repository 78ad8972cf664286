use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use http::StatusCode;
use plait::middleware::{Next, from_fn};
use plait::{BoxedHandler, Handler, Middleware, Middlewares, Request, Response, chain};

/// Per-request trace, carried in the request extensions.
#[derive(Clone, Default)]
struct Log(Arc<Mutex<Vec<String>>>);

impl Log {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

fn request_with(log: &Log) -> Request {
    Request::builder().extension(log.clone()).body("").unwrap()
}

/// Records `<name>-in` before calling the next handler and `<name>-out` after.
fn record(name: &'static str) -> Middleware {
    from_fn(move |req: Request, next: Next| async move {
        let log = req.extensions().get::<Log>().cloned().unwrap_or_default();
        log.push(format!("{name}-in"));
        let res = next.run(req).await;
        log.push(format!("{name}-out"));
        res
    })
    .with_name(name)
}

async fn terminal(req: Request) -> &'static str {
    if let Some(log) = req.extensions().get::<Log>() {
        log.push("T");
    }
    "T"
}

#[tokio::test]
async fn two_layers_wrap_terminal_in_order() {
    let app = chain([record("A"), record("B")]).handler(terminal);
    let log = Log::default();

    let res = app.call(request_with(&log)).await;

    assert_eq!(res.body(), "T");
    assert_eq!(log.entries(), ["A-in", "B-in", "T", "B-out", "A-out"]);
}

#[tokio::test]
async fn chain_matches_manual_nesting() {
    let (m0, m1, m2) = (record("m0"), record("m1"), record("m2"));

    let manual = m0.wrap(m1.wrap(m2.wrap(terminal)));
    let composite = chain([m0.clone(), m1.clone(), m2.clone()]).handler(terminal);
    let composed = chain([m0, m1, m2]).handler_fn(terminal);

    let expected = ["m0-in", "m1-in", "m2-in", "T", "m2-out", "m1-out", "m0-out"];
    for handler in [manual, composite.composed().clone(), composed] {
        let log = Log::default();
        handler.call(request_with(&log)).await;
        assert_eq!(log.entries(), expected);
    }

    let log = Log::default();
    composite.call(request_with(&log)).await;
    assert_eq!(log.entries(), expected);
}

#[tokio::test]
async fn empty_chain_behaves_like_terminal() {
    let endpoint = BoxedHandler::new(terminal);
    let app = Middlewares::new().handler(endpoint.clone());
    let composed = Middlewares::new().handler_fn(endpoint.clone());

    assert!(app.composed().ptr_eq(&endpoint));
    assert!(composed.ptr_eq(&endpoint));

    let log = Log::default();
    let res = app.call(request_with(&log)).await;
    assert_eq!(res.body(), "T");
    assert_eq!(log.entries(), ["T"]);
}

#[tokio::test]
async fn introspection_survives_repeated_calls() {
    let endpoint = BoxedHandler::new(terminal);
    let stack = chain([record("A"), record("B"), record("A")]);
    let app = stack.handler(endpoint.clone());

    for _ in 0..10 {
        app.call(Request::default()).await;
    }

    assert!(app.endpoint().ptr_eq(&endpoint));
    assert_eq!(app.middlewares(), &stack);
    assert_eq!(app.middlewares().names(), ["A", "B", "A"]);
    for (kept, original) in app.middlewares().iter().zip(&stack) {
        assert!(kept.ptr_eq(original));
    }
}

#[tokio::test]
async fn each_layer_runs_once_per_request() {
    for n in [0, 1, 5, 8] {
        let hits: Vec<Arc<AtomicUsize>> = (0..n).map(|_| Arc::default()).collect();
        let stack: Middlewares = hits
            .iter()
            .map(|hits| {
                let hits = Arc::clone(hits);
                from_fn(move |req: Request, next: Next| {
                    hits.fetch_add(1, Ordering::SeqCst);
                    next.run(req)
                })
            })
            .collect();

        let app = stack.handler(terminal);
        let composed = stack.handler_fn(terminal);

        app.call(Request::default()).await;
        for hits in &hits {
            assert_eq!(hits.load(Ordering::SeqCst), 1, "chain of {n}");
        }

        composed.call(Request::default()).await;
        composed.call(Request::default()).await;
        for hits in &hits {
            assert_eq!(hits.load(Ordering::SeqCst), 3, "chain of {n}");
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_keep_separate_traces() {
    let app = Arc::new(chain([record("A"), record("B")]).handler(terminal));

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let app = Arc::clone(&app);
            tokio::spawn(async move {
                let log = Log::default();
                app.call(request_with(&log)).await;
                log.entries()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), ["A-in", "B-in", "T", "B-out", "A-out"]);
    }
}

#[tokio::test]
async fn sequential_requests_do_not_share_state() {
    let app = chain([record("A")]).handler(terminal);
    let (first, second) = (Log::default(), Log::default());

    app.call(request_with(&first)).await;
    app.call(request_with(&second)).await;

    assert_eq!(first.entries(), ["A-in", "T", "A-out"]);
    assert_eq!(second.entries(), ["A-in", "T", "A-out"]);
}

#[tokio::test]
async fn error_responses_pass_through_unaltered() {
    let app = chain([record("A")]).handler(|_req: Request| async {
        Response::builder()
            .status(StatusCode::SERVICE_UNAVAILABLE)
            .text("down")
    });

    let res = app.call(Request::default()).await;
    assert_eq!(res.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.body(), "down");
}

#[tokio::test]
#[should_panic(expected = "endpoint exploded")]
async fn panics_are_not_caught() {
    let app = chain([record("A")]).handler(|_req: Request| async {
        if true {
            panic!("endpoint exploded");
        }
        "unreachable"
    });

    app.call(Request::default()).await;
}

#[tokio::test]
async fn pipelines_nest_as_endpoints() {
    let inner = chain([record("inner")]).handler(terminal);
    let outer = chain([record("outer")]).handler(inner);
    let log = Log::default();

    outer.call(request_with(&log)).await;
    assert_eq!(
        log.entries(),
        ["outer-in", "inner-in", "T", "inner-out", "outer-out"]
    );
}
