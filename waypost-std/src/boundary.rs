//! Error boundary - routes failures of a chain to an error handler.

use crate::compose::invoke;
use waypost_core::{BoxError, Controller, ErrorHandler, Flow, Request, Response};

/// Runs an inner controller and hands any error it produces to a handler.
///
/// Reported errors, matcher errors and panics of the inner controller all
/// reach the handler as the same `BoxError`. The handler is invoked at most
/// once per traversal and its outcome becomes the boundary's outcome;
/// anything the handler itself raises is passed outward, never back to the
/// handler.
pub struct ErrorBoundary<C, H> {
    inner: C,
    handler: H,
}

impl<C, H> ErrorBoundary<C, H> {
    /// Wrap `inner` so its errors go to `handler`.
    pub fn new(inner: C, handler: H) -> Self {
        Self { inner, handler }
    }
}

impl<C: Clone, H: Clone> Clone for ErrorBoundary<C, H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<Req, Res, C, H> Controller<Req, Res> for ErrorBoundary<C, H>
where
    Req: Request,
    Res: Response,
    C: Controller<Req, Res>,
    H: ErrorHandler<Req, Res>,
{
    async fn handle(&self, req: &mut Req, res: &mut Res) -> Result<Flow, BoxError> {
        let error = match invoke(async { self.inner.handle(req, res).await }).await {
            Ok(flow) => return Ok(flow),
            Err(error) => error,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(method = req.method(), %error, "routing error to handler");

        invoke(async { self.handler.handle_error(error, req, res).await }).await
    }
}
