//! Timeout wrapper for time-limited controllers.
//!
//! **Note**: This module requires the `tokio` runtime (`timeout` feature).
//!
//! The engine itself never times a unit out; a controller that never
//! resolves stalls its request. Wrap controllers whose latency must be
//! bounded at the integration layer.

use std::time::Duration;
use waypost_core::{BoxError, Controller, ControllerError, Flow, Request, Response};

/// A controller that fails with [`ControllerError::Timeout`] when the inner
/// controller does not finish in time.
///
/// # Example
///
/// ```rust,ignore
/// use waypost::controllers::Timeout;
///
/// dispatcher.get(
///     |req: &ApiRequest| req.path == "/report",
///     Timeout::secs(BuildReport, 5),
/// );
/// ```
pub struct Timeout<C> {
    inner: C,
    duration: Duration,
}

impl<C> Timeout<C> {
    /// Create a new `Timeout` wrapping the given controller.
    pub fn new(inner: C, duration: Duration) -> Self {
        Self { inner, duration }
    }

    /// Create a `Timeout` with the limit specified in seconds.
    pub fn secs(inner: C, seconds: u64) -> Self {
        Self::new(inner, Duration::from_secs(seconds))
    }

    /// Create a `Timeout` with the limit specified in milliseconds.
    pub fn millis(inner: C, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Get the configured limit.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl<Req, Res, C> Controller<Req, Res> for Timeout<C>
where
    Req: Request,
    Res: Response,
    C: Controller<Req, Res>,
{
    async fn handle(&self, req: &mut Req, res: &mut Res) -> Result<Flow, BoxError> {
        match tokio::time::timeout(self.duration, self.inner.handle(req, res)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Box::new(ControllerError::Timeout(self.duration))),
        }
    }
}
