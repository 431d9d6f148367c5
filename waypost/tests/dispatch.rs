use waypost::prelude::*;
use waypost::testing::{
    CountingController, MockRequest, MockResponse, RecordingController, RespondController,
    call_log,
};

mod common;
use common::{SendTrail, Tag, exchange, trail};

type Api = Dispatcher<MockRequest, MockResponse>;

#[tokio::test]
async fn test_only_matching_entry_runs() {
    let users = CountingController::new();
    let orders = CountingController::new();
    let mut api = Api::named("api");
    api.all(|req: &MockRequest| req.path == "/users", users.clone())
        .all(|req: &MockRequest| req.path == "/orders", orders.clone());
    let (mut req, mut res) = exchange(MockRequest::get("/orders"));

    let flow = api.dispatch(&mut req, &mut res).await.unwrap();

    assert_eq!(flow, Flow::Next);
    assert_eq!(users.count(), 0);
    assert_eq!(orders.count(), 1);
}

#[tokio::test]
async fn test_entries_run_in_registration_order() {
    let log = call_log();
    let mut api = Api::new();
    api.all(Always, RecordingController::new("first", &log))
        .all(Always, RecordingController::new("second", &log))
        .all(|_: &MockRequest| false, RecordingController::new("skipped", &log))
        .all(Always, RecordingController::new("third", &log));
    let (mut req, mut res) = exchange(MockRequest::get("/"));

    api.dispatch(&mut req, &mut res).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_mutations_are_visible_downstream() {
    let mut api = Api::new();
    api.all(Always, Tag("A"))
        .all(Always, Tag("B"))
        .all(|req: &MockRequest| trail(req) == "AB", Tag("C"))
        .all(Always, SendTrail);
    let (mut req, mut res) = exchange(MockRequest::get("/"));

    let flow = api.dispatch(&mut req, &mut res).await.unwrap();

    assert_eq!(flow, Flow::Stop);
    assert_eq!(trail(&req), "ABC");
    assert_eq!(res.body.as_deref(), Some("ABC"));
}

#[tokio::test]
async fn test_predicates_read_request_fields() {
    let admin = CountingController::new();
    let mut api = Api::new();
    api.all(|req: &MockRequest| req.field("role") == Some("admin"), admin.clone());

    for request in [
        MockRequest::get("/panel").with_field("role", "admin"),
        MockRequest::get("/panel").with_field("role", "guest"),
        MockRequest::get("/panel"),
    ] {
        let (mut req, mut res) = exchange(request);
        api.dispatch(&mut req, &mut res).await.unwrap();
    }

    assert_eq!(admin.count(), 1);
}

#[tokio::test]
async fn test_stop_ends_traversal() {
    let after = CountingController::new();
    let mut api = Api::new();
    api.all(Always, RespondController::new("done"))
        .all(Always, after.clone());
    let (mut req, mut res) = exchange(MockRequest::get("/"));

    let flow = api.dispatch(&mut req, &mut res).await.unwrap();

    assert_eq!(flow, Flow::Stop);
    assert!(!after.called());
    assert_eq!(res.send_count(), 1);
}

#[tokio::test]
async fn test_nothing_matched_continues_to_host() {
    let mut api = Api::new();
    api.all(|_: &MockRequest| false, RespondController::new("never"));
    let (mut req, mut res) = exchange(MockRequest::get("/"));

    let flow = api.dispatch(&mut req, &mut res).await.unwrap();

    assert_eq!(flow, Flow::Next);
    assert!(!res.is_sent());
}

#[tokio::test]
async fn test_dispatcher_mounts_as_controller() {
    let mut users = Api::named("users");
    users
        .all(Always, Tag("u"))
        .all(|req: &MockRequest| req.path == "/users/me", SendTrail);

    let mut root = Api::named("root");
    root.all(Always, Tag("r"))
        .all(|req: &MockRequest| req.path.starts_with("/users"), users)
        .all(Always, Tag("!"))
        .all(Always, SendTrail);

    let (mut req, mut res) = exchange(MockRequest::get("/users/me"));
    root.dispatch(&mut req, &mut res).await.unwrap();
    assert_eq!(res.body.as_deref(), Some("ru"));

    let (mut req, mut res) = exchange(MockRequest::get("/users"));
    root.dispatch(&mut req, &mut res).await.unwrap();
    assert_eq!(res.body.as_deref(), Some("ru!"));
}

#[tokio::test]
async fn test_closure_controllers() {
    let mut api = Api::new();
    api.all(
        Always,
        controller_fn(|req: &mut MockRequest, _res: &mut MockResponse| {
            Box::pin(async move {
                req.fields.insert("user".into(), "ada".into());
            })
        }),
    )
    .all(
        |req: &MockRequest| req.field("user").is_some(),
        controller_fn(|req: &mut MockRequest, res: &mut MockResponse| {
            Box::pin(async move {
                res.send(200, format!("hello {}", req.field("user").unwrap_or_default()));
                Flow::Stop
            })
        }),
    );
    let (mut req, mut res) = exchange(MockRequest::get("/"));

    let flow = api.dispatch(&mut req, &mut res).await.unwrap();

    assert_eq!(flow, Flow::Stop);
    assert_eq!(res.body.as_deref(), Some("hello ada"));
}
