//! # Error Handlers
//!
//! The error-handling unit of a chain. It takes `(error, request, response)`
//! and decides what happens next, through the same [`Flow`] result as a
//! [`Controller`]:
//!
//! - `Ok(Flow::Stop)` - the error was answered; the request is finished
//! - `Ok(Flow::Next)` - recovered; traversal resumes after the handler's mount point
//! - `Err(e)` - re-raised; `e` goes to the next outer handler or the host
//!
//! Controllers and error handlers are distinct traits, so the role of a unit
//! is fixed by the registration call rather than by inspecting the callable.
//!
//! [`Controller`]: crate::Controller

use crate::{
    controller::BoxFuture,
    error::BoxError,
    flow::{Flow, IntoFlow},
    request::{Request, Response},
};
use std::{future::Future, sync::Arc};

/// A shared, type-erased error handler.
pub type BoxErrorHandler<Req, Res> = Arc<dyn DynErrorHandler<Req, Res>>;

/// A unit that receives the error a chain produced.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `ErrorHandler` for `{Req}` / `{Res}`",
    label = "missing `ErrorHandler` implementation",
    note = "Error handlers must implement `handle_error` for `{Req}` and `{Res}`."
)]
pub trait ErrorHandler<Req: Request, Res: Response>: Send + Sync + 'static {
    /// Handle an error raised by a unit mounted before this handler.
    fn handle_error(
        &self,
        error: BoxError,
        req: &mut Req,
        res: &mut Res,
    ) -> impl Future<Output = Result<Flow, BoxError>> + Send;

    /// Erase the handler's type.
    fn boxed(self) -> BoxErrorHandler<Req, Res>
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

/// Dynamic object-safe version of [`ErrorHandler`].
pub trait DynErrorHandler<Req, Res>: Send + Sync + 'static {
    /// Handle an error (dynamic dispatch version).
    fn handle_error_dyn<'a>(
        &'a self,
        error: BoxError,
        req: &'a mut Req,
        res: &'a mut Res,
    ) -> BoxFuture<'a, Result<Flow, BoxError>>;
}

impl<Req, Res, T> DynErrorHandler<Req, Res> for T
where
    Req: Request,
    Res: Response,
    T: ErrorHandler<Req, Res>,
{
    fn handle_error_dyn<'a>(
        &'a self,
        error: BoxError,
        req: &'a mut Req,
        res: &'a mut Res,
    ) -> BoxFuture<'a, Result<Flow, BoxError>> {
        Box::pin(self.handle_error(error, req, res))
    }
}

impl<Req: Request, Res: Response> ErrorHandler<Req, Res> for BoxErrorHandler<Req, Res> {
    async fn handle_error(
        &self,
        error: BoxError,
        req: &mut Req,
        res: &mut Res,
    ) -> Result<Flow, BoxError> {
        (**self).handle_error_dyn(error, req, res).await
    }

    fn boxed(self) -> BoxErrorHandler<Req, Res> {
        self
    }
}

/// An error handler built from a closure. See [`error_handler_fn`].
#[derive(Clone)]
pub struct ErrorHandlerFn<F> {
    f: F,
}

/// Wrap a closure returning a boxed future as an [`ErrorHandler`].
///
/// ```rust,ignore
/// let respond = error_handler_fn(|err: BoxError, _req: &mut ApiRequest, res: &mut ApiResponse| {
///     Box::pin(async move {
///         res.send(500, err.to_string());
///         Flow::Stop
///     })
/// });
/// ```
pub fn error_handler_fn<Req, Res, F, O>(f: F) -> ErrorHandlerFn<F>
where
    Req: Request,
    Res: Response,
    F: for<'a> Fn(BoxError, &'a mut Req, &'a mut Res) -> BoxFuture<'a, O> + Send + Sync + 'static,
    O: IntoFlow,
{
    ErrorHandlerFn { f }
}

impl<Req, Res, F, O> ErrorHandler<Req, Res> for ErrorHandlerFn<F>
where
    Req: Request,
    Res: Response,
    F: for<'a> Fn(BoxError, &'a mut Req, &'a mut Res) -> BoxFuture<'a, O> + Send + Sync + 'static,
    O: IntoFlow,
{
    async fn handle_error(
        &self,
        error: BoxError,
        req: &mut Req,
        res: &mut Res,
    ) -> Result<Flow, BoxError> {
        (self.f)(error, req, res).await.into_flow()
    }
}
