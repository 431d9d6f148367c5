//! # Controllers
//!
//! A controller is the normal handler unit of a chain: it receives the
//! request and the response, does its work, and reports how the chain should
//! proceed through its [`Flow`] result.
//!
//! The continuation of the callback calling convention is replaced by the
//! returned future. Resolving to `Ok(Flow::Next)` is "call next", resolving
//! to `Err(e)` is "call next with an error", and `Ok(Flow::Stop)` is a unit
//! that finalized the response and never continued.
//!
//! # Static vs Dynamic Dispatch
//!
//! [`Controller`] uses native `async fn` for static dispatch. Chains store
//! heterogeneous units, so they hold them as [`BoxController`], built on the
//! object-safe [`DynController`].

use crate::{
    error::BoxError,
    flow::{Flow, IntoFlow},
    request::{Request, Response},
};
use std::{future::Future, pin::Pin, sync::Arc};

/// A pinned, boxed, `Send` future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A shared, type-erased controller.
pub type BoxController<Req, Res> = Arc<dyn DynController<Req, Res>>;

/// A handler unit taking `(request, response)` and continuing, stopping, or failing.
///
/// # Example
///
/// ```rust,ignore
/// struct Authenticate;
///
/// impl Controller<ApiRequest, ApiResponse> for Authenticate {
///     async fn handle(
///         &self,
///         req: &mut ApiRequest,
///         res: &mut ApiResponse,
///     ) -> Result<Flow, BoxError> {
///         if req.token.is_none() {
///             res.send(401);
///             return Ok(Flow::Stop);
///         }
///         req.user = Some(lookup(&req.token).await?);
///         Ok(Flow::Next)
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Controller` for `{Req}` / `{Res}`",
    label = "missing `Controller` implementation",
    note = "Controllers must implement `handle` for the request type `{Req}` and response type `{Res}`."
)]
pub trait Controller<Req: Request, Res: Response>: Send + Sync + 'static {
    /// Process the request.
    fn handle(
        &self,
        req: &mut Req,
        res: &mut Res,
    ) -> impl Future<Output = Result<Flow, BoxError>> + Send;

    /// Erase the controller's type so it can sit in a chain.
    fn boxed(self) -> BoxController<Req, Res>
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

/// Dynamic object-safe version of [`Controller`].
pub trait DynController<Req, Res>: Send + Sync + 'static {
    /// Process the request (dynamic dispatch version).
    fn handle_dyn<'a>(
        &'a self,
        req: &'a mut Req,
        res: &'a mut Res,
    ) -> BoxFuture<'a, Result<Flow, BoxError>>;
}

impl<Req, Res, T> DynController<Req, Res> for T
where
    Req: Request,
    Res: Response,
    T: Controller<Req, Res>,
{
    fn handle_dyn<'a>(
        &'a self,
        req: &'a mut Req,
        res: &'a mut Res,
    ) -> BoxFuture<'a, Result<Flow, BoxError>> {
        Box::pin(self.handle(req, res))
    }
}

// Calls go through the trait object explicitly; `Arc<dyn DynController>` is itself a
// `DynController` through the blanket impl, so `self.handle_dyn` would recurse.
impl<Req: Request, Res: Response> Controller<Req, Res> for BoxController<Req, Res> {
    async fn handle(&self, req: &mut Req, res: &mut Res) -> Result<Flow, BoxError> {
        (**self).handle_dyn(req, res).await
    }

    fn boxed(self) -> BoxController<Req, Res> {
        self
    }
}

impl<Req: Request, Res: Response> Controller<Req, Res> for Box<dyn DynController<Req, Res>> {
    async fn handle(&self, req: &mut Req, res: &mut Res) -> Result<Flow, BoxError> {
        (**self).handle_dyn(req, res).await
    }
}

/// A controller built from a closure. See [`controller_fn`].
#[derive(Clone)]
pub struct ControllerFn<F> {
    f: F,
}

/// Wrap a closure returning a boxed future as a [`Controller`].
///
/// The closure's output can be anything implementing [`IntoFlow`], so
/// `Ok::<_, BoxError>(Flow::Next)`, `Flow::Stop`, or `()` all work.
///
/// ```rust,ignore
/// let tag = controller_fn(|req: &mut ApiRequest, _res: &mut ApiResponse| {
///     Box::pin(async move {
///         req.tags.push("seen");
///         Flow::Next
///     })
/// });
/// ```
pub fn controller_fn<Req, Res, F, O>(f: F) -> ControllerFn<F>
where
    Req: Request,
    Res: Response,
    F: for<'a> Fn(&'a mut Req, &'a mut Res) -> BoxFuture<'a, O> + Send + Sync + 'static,
    O: IntoFlow,
{
    ControllerFn { f }
}

impl<Req, Res, F, O> Controller<Req, Res> for ControllerFn<F>
where
    Req: Request,
    Res: Response,
    F: for<'a> Fn(&'a mut Req, &'a mut Res) -> BoxFuture<'a, O> + Send + Sync + 'static,
    O: IntoFlow,
{
    async fn handle(&self, req: &mut Req, res: &mut Res) -> Result<Flow, BoxError> {
        (self.f)(req, res).await.into_flow()
    }
}
