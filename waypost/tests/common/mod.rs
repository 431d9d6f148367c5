#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::Notify;
use waypost::testing::{MockRequest, MockResponse};
use waypost::{BoxError, Controller, Flow, Request, Response};

// ============================================================================
// Fixtures
// ============================================================================

pub fn exchange(req: MockRequest) -> (MockRequest, MockResponse) {
    (req, MockResponse::new())
}

/// Reads the `trail` field of a request, empty when unset.
pub fn trail(req: &MockRequest) -> &str {
    req.field("trail").unwrap_or("")
}

// ============================================================================
// Test Controllers
// ============================================================================

/// Appends its tag to the request's `trail` field and continues.
#[derive(Clone)]
pub struct Tag(pub &'static str);

impl<Res: Response> Controller<MockRequest, Res> for Tag {
    async fn handle(&self, req: &mut MockRequest, _res: &mut Res) -> Result<Flow, BoxError> {
        let next = format!("{}{}", trail(req), self.0);
        req.fields.insert("trail".into(), next);
        Ok(Flow::Next)
    }
}

/// Sends the current trail as the response body and stops.
#[derive(Clone)]
pub struct SendTrail;

impl Controller<MockRequest, MockResponse> for SendTrail {
    async fn handle(&self, req: &mut MockRequest, res: &mut MockResponse) -> Result<Flow, BoxError> {
        res.send(200, trail(req));
        Ok(Flow::Stop)
    }
}

/// Waits for a notification before continuing.
#[derive(Clone)]
pub struct Gate(pub Arc<Notify>);

impl<Req: Request, Res: Response> Controller<Req, Res> for Gate {
    async fn handle(&self, _req: &mut Req, _res: &mut Res) -> Result<Flow, BoxError> {
        self.0.notified().await;
        Ok(Flow::Next)
    }
}
