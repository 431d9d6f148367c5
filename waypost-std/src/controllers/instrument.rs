use tracing::Instrument;
use waypost_core::{BoxError, Controller, Flow, Request, Response};

/// A controller wrapper that runs the inner controller inside a `tracing` span.
///
/// The span records the wrapper's name and the request method, and the
/// outcome is logged at `debug` when the inner controller finishes.
///
/// # Example
///
/// ```rust,ignore
/// dispatcher.get(
///     |req: &ApiRequest| req.path == "/users",
///     Instrumented::new(ListUsers, "list_users"),
/// );
/// ```
pub struct Instrumented<C> {
    inner: C,
    name: &'static str,
}

impl<C> Instrumented<C> {
    /// Wrap `inner` in a span called after `name`.
    pub const fn new(inner: C, name: &'static str) -> Self {
        Self { inner, name }
    }
}

impl<C: Clone> Clone for Instrumented<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: self.name,
        }
    }
}

impl<Req, Res, C> Controller<Req, Res> for Instrumented<C>
where
    Req: Request,
    Res: Response,
    C: Controller<Req, Res>,
{
    async fn handle(&self, req: &mut Req, res: &mut Res) -> Result<Flow, BoxError> {
        let span = tracing::info_span!(
            "controller",
            controller = %self.name,
            method = req.method(),
        );

        async move {
            let outcome = self.inner.handle(req, res).await;
            match &outcome {
                Ok(flow) => tracing::debug!(?flow, "controller finished"),
                Err(error) => tracing::debug!(%error, "controller failed"),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}
