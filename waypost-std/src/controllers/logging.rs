//! Logging controller for request observation.

use waypost_core::{BoxError, Controller, Flow, Request, Response};

/// A controller that logs each request it sees and continues.
///
/// # Example
///
/// ```rust,ignore
/// use waypost::controllers::LoggingController;
///
/// dispatcher.all(Always, LoggingController::named("api"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingController {
    name: &'static str,
}

impl LoggingController {
    /// Create a `LoggingController` with a default name.
    pub fn new() -> Self {
        Self { name: "request" }
    }

    /// Create a `LoggingController` whose records carry `name`.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name attached to log records.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingController {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req: Request, Res: Response> Controller<Req, Res> for LoggingController {
    async fn handle(&self, req: &mut Req, _res: &mut Res) -> Result<Flow, BoxError> {
        tracing::debug!(name = %self.name, method = req.method(), "processing request");
        Ok(Flow::Next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockRequest, MockResponse};

    #[tokio::test]
    async fn test_logging_controller_continues() {
        let logging = LoggingController::new();
        let (mut req, mut res) = (MockRequest::get("/"), MockResponse::new());

        let flow = logging.handle(&mut req, &mut res).await.unwrap();

        assert_eq!(flow, Flow::Next);
        assert!(!res.is_sent());
    }

    #[tokio::test]
    async fn test_logging_controller_named() {
        let logging = LoggingController::named("api");
        let (mut req, mut res) = (MockRequest::post("/users"), MockResponse::new());

        let flow = logging.handle(&mut req, &mut res).await.unwrap();

        assert_eq!(flow, Flow::Next);
        assert_eq!(logging.name(), "api");
    }
}
