//! Guarded entries - controllers gated by a match predicate.

use std::panic::{AssertUnwindSafe, catch_unwind};
use waypost_core::{BoxError, Controller, ControllerError, Flow, Matcher, Request, Response};

/// A controller that only runs when its matcher accepts the request.
///
/// - matcher returns `false`: the entry continues immediately without
///   touching the inner controller
/// - matcher returns `true`: the inner controller's outcome is the entry's outcome
/// - matcher fails (or panics): the error is reported and the inner
///   controller is skipped
///
/// # Example
///
/// ```rust,ignore
/// let admin_only = Guarded::new(
///     |req: &ApiRequest| req.role == Role::Admin,
///     AdminPanel,
/// );
/// ```
pub struct Guarded<M, C> {
    matcher: M,
    controller: C,
}

impl<M, C> Guarded<M, C> {
    /// Create a new guarded entry.
    pub fn new(matcher: M, controller: C) -> Self {
        Self {
            matcher,
            controller,
        }
    }
}

impl<M: Clone, C: Clone> Clone for Guarded<M, C> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            controller: self.controller.clone(),
        }
    }
}

impl<Req, Res, M, C> Controller<Req, Res> for Guarded<M, C>
where
    Req: Request,
    Res: Response,
    M: Matcher<Req>,
    C: Controller<Req, Res>,
{
    async fn handle(&self, req: &mut Req, res: &mut Res) -> Result<Flow, BoxError> {
        if !evaluate(&self.matcher, req)? {
            return Ok(Flow::Next);
        }
        self.controller.handle(req, res).await
    }
}

fn evaluate<Req: Request, M: Matcher<Req>>(matcher: &M, req: &Req) -> Result<bool, BoxError> {
    match catch_unwind(AssertUnwindSafe(|| matcher.matches(req))) {
        Ok(matched) => matched,
        Err(payload) => Err(Box::new(ControllerError::from_panic(payload))),
    }
}
