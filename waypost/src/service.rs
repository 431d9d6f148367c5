//! Tower integration for waypost.
//!
//! Exposes a [`Dispatcher`] as a `tower::Service`, so a host built on tower
//! can drive it and stack tower layers (timeouts, concurrency limits, ...)
//! around it.
//!
//! # Example
//!
//! ```rust,ignore
//! use tower::ServiceExt;
//! use waypost::service::DispatchService;
//!
//! let service = DispatchService::new(dispatcher);
//! let exchange = service.oneshot((req, res)).await?;
//! assert!(exchange.flow.is_stop());
//! ```

use std::{
    sync::Arc,
    task::{Context, Poll},
};
use tower::Service;
use waypost_core::{BoxFuture, DispatchError, Flow, Request, Response};
use waypost_std::Dispatcher;

/// The request and response handed back after a dispatch, with the final flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange<Req, Res> {
    /// The request, including any mutation controllers made.
    pub req: Req,
    /// The response, as the controllers left it.
    pub res: Res,
    /// `Stop` when a controller finalized the response, `Next` when the
    /// chain fell through.
    pub flow: Flow,
}

/// Wraps a [`Dispatcher`] as a tower `Service<(Req, Res)>`.
pub struct DispatchService<Req, Res> {
    dispatcher: Arc<Dispatcher<Req, Res>>,
}

impl<Req: Request, Res: Response> DispatchService<Req, Res> {
    /// Create a service that owns `dispatcher`.
    pub fn new(dispatcher: Dispatcher<Req, Res>) -> Self {
        Self::from_shared(Arc::new(dispatcher))
    }

    /// Create a service from an already shared dispatcher.
    pub fn from_shared(dispatcher: Arc<Dispatcher<Req, Res>>) -> Self {
        Self { dispatcher }
    }

    /// Get a reference to the inner dispatcher.
    pub fn inner(&self) -> &Dispatcher<Req, Res> {
        &self.dispatcher
    }
}

impl<Req, Res> Clone for DispatchService<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<Req: Request, Res: Response> Service<(Req, Res)> for DispatchService<Req, Res> {
    type Response = Exchange<Req, Res>;
    type Error = DispatchError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Registration needs `&mut Dispatcher`, so a shared one is always complete
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, (mut req, mut res): (Req, Res)) -> Self::Future {
        let dispatcher = Arc::clone(&self.dispatcher);
        Box::pin(async move {
            let flow = dispatcher.dispatch(&mut req, &mut res).await?;
            Ok(Exchange { req, res, flow })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingController, MockRequest, MockResponse, RespondController};
    use tower::ServiceExt;
    use waypost_core::Always;

    #[tokio::test]
    async fn test_service_returns_exchange() {
        let mut dispatcher: Dispatcher<MockRequest, MockResponse> = Dispatcher::new();
        dispatcher.get(Always, RespondController::new("hello"));
        let service = DispatchService::new(dispatcher);
        assert_eq!(service.inner().len(), 1);

        let exchange = service
            .oneshot((MockRequest::get("/"), MockResponse::new()))
            .await
            .unwrap();

        assert_eq!(exchange.flow, Flow::Stop);
        assert_eq!(exchange.res.body.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_service_surfaces_unhandled_error() {
        let mut dispatcher: Dispatcher<MockRequest, MockResponse> = Dispatcher::new();
        dispatcher.all(Always, FailingController::new("no handler"));
        let service = DispatchService::new(dispatcher);

        let err = service
            .oneshot((MockRequest::get("/"), MockResponse::new()))
            .await
            .unwrap_err();

        assert_eq!(err.into_inner().to_string(), "no handler");
    }
}
