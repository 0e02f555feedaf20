//! End-to-end dispatch behaviour through the public builder API.

use std::sync::{Arc, Mutex};

use chain_router::dispatch::{BufferedSink, DispatchOutcome, HandlerRequest, Next, Reply};
use chain_router::routing::{DuplicateCapturePolicy, Method, Router};
use chain_router::RequestContext;
use serde_json::{json, Value};

fn listen(router: &Router, ctx: RequestContext) -> (DispatchOutcome, BufferedSink) {
    let mut sink = BufferedSink::new();
    let outcome = router.listen(&ctx, &mut sink);
    (outcome, sink)
}

#[test]
fn test_middleware_short_circuits() {
    let router = Router::builder()
        .route("/admin/:section")
        .use_(|req: &HandlerRequest<'_>, next: &mut Next| {
            if req.data_value("token") == Some("secret") {
                next.resume();
                Reply::Empty
            } else {
                Reply::json(json!({ "error": "unauthorized" }))
            }
        })
        .get(|req: &HandlerRequest<'_>, _: &mut Next| {
            Reply::json(json!({ "section": req.param("section") }))
        })
        .build()
        .unwrap();

    let (outcome, sink) = listen(&router, RequestContext::new(Method::Get, "/admin/users"));
    assert_eq!(outcome.invoked, 1);
    assert_eq!(outcome.gated, 1);
    let body: Value = serde_json::from_str(sink.last().unwrap()).unwrap();
    assert_eq!(body, json!({ "error": "unauthorized" }));

    let ctx = RequestContext::new(Method::Get, "/admin/users").with_data([("token", "secret")]);
    let (outcome, sink) = listen(&router, ctx);
    assert_eq!(outcome.invoked, 2);
    let body: Value = serde_json::from_str(sink.last().unwrap()).unwrap();
    assert_eq!(body, json!({ "section": "users" }));
}

#[test]
fn test_lossy_tokenization_equivalence() {
    let router = Router::builder()
        .route("/a.b/:id")
        .get(|req: &HandlerRequest<'_>, _: &mut Next| Reply::from(req.param("id").map(str::to_string)))
        .build()
        .unwrap();

    let (outcome, sink) = listen(&router, RequestContext::new(Method::Get, "/a/b/5"));
    assert!(outcome.matched());
    assert_eq!(sink.last(), Some("\"5\""));
}

#[test]
fn test_templates_share_one_chain() {
    // Entries from different candidate templates form a single chain.
    let order = Arc::new(Mutex::new(Vec::new()));
    let (o1, o2) = (order.clone(), order.clone());
    let router = Router::builder()
        .route("/files/:name")
        .use_(move |_: &HandlerRequest<'_>, next: &mut Next| {
            o1.lock().unwrap().push("by-name");
            next.resume();
            Reply::Empty
        })
        .route("/files/:id")
        .get(move |_: &HandlerRequest<'_>, _: &mut Next| {
            o2.lock().unwrap().push("by-id");
            Reply::Empty
        })
        .build()
        .unwrap();

    let (outcome, sink) = listen(&router, RequestContext::new(Method::Get, "/files/readme"));
    assert_eq!(*order.lock().unwrap(), vec!["by-name", "by-id"]);
    assert_eq!(outcome.candidates, 2);
    assert!(sink.payloads().is_empty());
}

#[test]
fn test_method_filtering() {
    let router = Router::builder()
        .route("/things")
        .get(|_: &HandlerRequest<'_>, _: &mut Next| Reply::json("get"))
        .post(|_: &HandlerRequest<'_>, _: &mut Next| Reply::json("post"))
        .put(|_: &HandlerRequest<'_>, _: &mut Next| Reply::json("put"))
        .patch(|_: &HandlerRequest<'_>, _: &mut Next| Reply::json("patch"))
        .delete(|_: &HandlerRequest<'_>, _: &mut Next| Reply::json("delete"))
        .build()
        .unwrap();

    for (method, expected) in [
        (Method::Get, "\"get\""),
        (Method::Post, "\"post\""),
        (Method::Put, "\"put\""),
        (Method::Patch, "\"patch\""),
        (Method::Delete, "\"delete\""),
    ] {
        let (outcome, sink) = listen(&router, RequestContext::new(method, "/things"));
        assert_eq!(outcome.invoked, 1, "{method}");
        assert_eq!(sink.payloads(), [expected.to_string()]);
    }
}

#[test]
fn test_duplicate_capture_policy() {
    let build = |policy| {
        Router::builder()
            .duplicate_captures(policy)
            .route("/org/:id/user/:id")
            .get(|req: &HandlerRequest<'_>, _: &mut Next| Reply::json(req.params().clone()))
            .build()
    };

    let router = build(DuplicateCapturePolicy::LastWins).unwrap();
    let (_, sink) = listen(&router, RequestContext::new(Method::Get, "/org/1/user/2"));
    let body: Value = serde_json::from_str(sink.last().unwrap()).unwrap();
    assert_eq!(body, json!({ "id": "2" }));

    assert!(build(DuplicateCapturePolicy::Reject).is_err());
}
