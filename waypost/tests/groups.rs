use waypost::prelude::*;
use waypost::testing::{
    CountingController, FailingController, MockRequest, MockResponse, RecordingController,
    RecordingErrorHandler, call_log,
};
use waypost::{BoxController, compose};

mod common;
use common::{SendTrail, Tag, exchange, trail};

type Api = Dispatcher<MockRequest, MockResponse>;

async fn run(api: &Api, path: &str) -> (Flow, MockRequest, MockResponse) {
    let (mut req, mut res) = exchange(MockRequest::post(path));
    let flow = api.dispatch(&mut req, &mut res).await.unwrap();
    (flow, req, res)
}

#[tokio::test]
async fn test_group_matches_separate_entries() {
    let mut grouped = Api::new();
    grouped
        .post(Always, group![Tag("a"), Tag("b"), Tag("c")])
        .all(Always, SendTrail);

    let mut separate = Api::new();
    separate
        .post(Always, Tag("a"))
        .post(Always, Tag("b"))
        .post(Always, Tag("c"))
        .all(Always, SendTrail);

    let (grouped_flow, grouped_req, grouped_res) = run(&grouped, "/").await;
    let (separate_flow, separate_req, separate_res) = run(&separate, "/").await;

    assert_eq!(grouped_flow, separate_flow);
    assert_eq!(trail(&grouped_req), "abc");
    assert_eq!(grouped_req, separate_req);
    assert_eq!(grouped_res, separate_res);
}

#[tokio::test]
async fn test_group_shares_one_matcher() {
    let log = call_log();
    let mut api = Api::new();
    api.all(
        |req: &MockRequest| req.path == "/admin",
        group![
            RecordingController::new("auth", &log),
            RecordingController::new("audit", &log),
        ],
    );

    run(&api, "/public").await;
    assert!(log.lock().unwrap().is_empty());

    run(&api, "/admin").await;
    assert_eq!(*log.lock().unwrap(), vec!["auth", "audit"]);
}

#[tokio::test]
async fn test_stop_inside_group_ends_dispatch() {
    let after = CountingController::new();
    let mut api = Api::new();
    api.all(Always, group![Tag("x"), SendTrail, Tag("never")])
        .all(Always, after.clone());

    let (flow, req, res) = run(&api, "/").await;

    assert_eq!(flow, Flow::Stop);
    assert_eq!(trail(&req), "x");
    assert_eq!(res.body.as_deref(), Some("x"));
    assert!(!after.called());
}

#[tokio::test]
async fn test_error_inside_group_skips_rest() {
    let log = call_log();
    let handler = RecordingErrorHandler::new();
    let mut api = Api::new();
    api.all(
        Always,
        group![
            RecordingController::new("validate", &log),
            FailingController::new("invalid body"),
            RecordingController::new("create", &log),
        ],
    )
    .all(Always, RecordingController::new("after", &log))
    .mount_error_handler(handler.clone());

    run(&api, "/").await;

    assert_eq!(*log.lock().unwrap(), vec!["validate"]);
    assert_eq!(handler.errors(), vec!["invalid body".to_string()]);
}

#[tokio::test]
async fn test_compose_from_boxed_units() {
    let units: Vec<BoxController<MockRequest, MockResponse>> =
        vec![Tag("1").boxed(), Tag("2").boxed(), SendTrail.boxed()];
    let mut api = Api::new();
    api.all(Always, compose(units));

    let (flow, _, res) = run(&api, "/").await;

    assert_eq!(flow, Flow::Stop);
    assert_eq!(res.body.as_deref(), Some("12"));
}

#[tokio::test]
async fn test_group_reused_across_dispatchers() {
    let shared: Compose<MockRequest, MockResponse> = group![Tag("s")];
    let mut first = Api::new();
    first.all(Always, shared.clone()).all(Always, SendTrail);
    let mut second = Api::new();
    second
        .all(Always, Tag("2"))
        .all(Always, shared)
        .all(Always, SendTrail);

    let (_, _, first_res) = run(&first, "/").await;
    let (_, _, second_res) = run(&second, "/").await;

    assert_eq!(first_res.body.as_deref(), Some("s"));
    assert_eq!(second_res.body.as_deref(), Some("2s"));
}
