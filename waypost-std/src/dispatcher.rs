//! The dispatcher - a growable chain of guarded controllers with error handlers.
//!
//! Every registration appends to one flat [`Compose`]. Mounting an error
//! handler wraps everything registered so far in an [`ErrorBoundary`] and
//! starts a fresh chain with that boundary as its first unit, so a handler
//! only ever sees errors from entries mounted before it.
//!
//! Registration takes `&mut self` and dispatch takes `&self`; once setup is
//! done the dispatcher can be shared (for example behind an `Arc`) and
//! driven by any number of concurrent requests.

use crate::{boundary::ErrorBoundary, compose::Compose, guarded::Guarded};
use std::borrow::Cow;
use waypost_core::{
    Always, BoxController, BoxError, BoxErrorHandler, Controller, DispatchError, ErrorHandler,
    Flow, Matcher, Method, Request, Response,
};

/// A unit handed to [`Dispatcher::register`], tagged with its role.
pub enum Unit<Req, Res> {
    /// A normal controller (or group), mounted for every request.
    Controller(BoxController<Req, Res>),
    /// An error handler for everything mounted so far.
    ErrorHandler(BoxErrorHandler<Req, Res>),
}

impl<Req: Request, Res: Response> Unit<Req, Res> {
    /// Tag a controller.
    pub fn controller<C: Controller<Req, Res>>(controller: C) -> Self {
        Unit::Controller(controller.boxed())
    }

    /// Tag an error handler.
    pub fn error_handler<H: ErrorHandler<Req, Res>>(handler: H) -> Self {
        Unit::ErrorHandler(handler.boxed())
    }
}

/// Builds one request handler out of conditionally applicable controllers.
///
/// Entries run in registration order. An entry whose matcher rejects the
/// request is skipped; the first entry that stops ends the traversal; the
/// first error skips every remaining entry and goes to the nearest error
/// handler mounted after the failing entry, or out of [`dispatch`] if there
/// is none.
///
/// # Example
///
/// ```rust,ignore
/// let mut api = Dispatcher::named("api");
/// api.all(Always, LogRequest)
///     .get(|req: &ApiRequest| req.path == "/users", ListUsers)
///     .post(|req: &ApiRequest| req.path == "/users", group![Authenticate, CreateUser])
///     .mount_error_handler(RenderError);
///
/// let api = Arc::new(api);
/// api.dispatch(&mut req, &mut res).await?;
/// ```
///
/// [`dispatch`]: Dispatcher::dispatch
pub struct Dispatcher<Req, Res> {
    chain: Compose<Req, Res>,
    name: Cow<'static, str>,
    mounted: usize,
}

impl<Req: Request, Res: Response> Dispatcher<Req, Res> {
    /// Create an empty dispatcher. Dispatching through it continues immediately.
    pub fn new() -> Self {
        Self::named("dispatcher")
    }

    /// Create an empty dispatcher with a name used in log records.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            chain: Compose::new(),
            name: name.into(),
            mounted: 0,
        }
    }

    /// The dispatcher's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of registrations (controllers and error handlers).
    pub fn len(&self) -> usize {
        self.mounted
    }

    /// Check if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.mounted == 0
    }

    /// Mount `controller` behind `matcher` as the last entry of the chain.
    ///
    /// Pass a [`Compose`] (see [`group!`](crate::group)) to mount several
    /// controllers as one entry.
    pub fn mount_controller<M, C>(&mut self, matcher: M, controller: C) -> &mut Self
    where
        M: Matcher<Req>,
        C: Controller<Req, Res>,
    {
        self.chain = self.chain.push(Guarded::new(matcher, controller).boxed());
        self.mounted += 1;
        self
    }

    /// Mount `controller` for requests with the given method that also satisfy `matcher`.
    ///
    /// The method is compared case-insensitively and checked first; on a
    /// method mismatch `matcher` is not evaluated.
    pub fn mount_controller_for_method<M, C>(
        &mut self,
        method: impl Into<Cow<'static, str>>,
        matcher: M,
        controller: C,
    ) -> &mut Self
    where
        M: Matcher<Req>,
        C: Controller<Req, Res>,
    {
        self.mount_controller(Method::new(method, matcher), controller)
    }

    /// Install `handler` for errors raised by every entry mounted so far.
    ///
    /// Entries mounted afterwards are outside this handler's reach; their
    /// errors go to a later handler or to the caller of [`Dispatcher::dispatch`].
    pub fn mount_error_handler<H: ErrorHandler<Req, Res>>(&mut self, handler: H) -> &mut Self {
        let guarded = std::mem::take(&mut self.chain);
        self.chain = Compose::new().with(ErrorBoundary::new(guarded, handler));
        self.mounted += 1;
        self
    }

    /// Alias for [`Dispatcher::mount_controller`].
    pub fn all<M, C>(&mut self, matcher: M, controller: C) -> &mut Self
    where
        M: Matcher<Req>,
        C: Controller<Req, Res>,
    {
        self.mount_controller(matcher, controller)
    }

    /// Mount a controller for `GET` requests.
    pub fn get<M, C>(&mut self, matcher: M, controller: C) -> &mut Self
    where
        M: Matcher<Req>,
        C: Controller<Req, Res>,
    {
        self.mount_controller_for_method("GET", matcher, controller)
    }

    /// Mount a controller for `POST` requests.
    pub fn post<M, C>(&mut self, matcher: M, controller: C) -> &mut Self
    where
        M: Matcher<Req>,
        C: Controller<Req, Res>,
    {
        self.mount_controller_for_method("POST", matcher, controller)
    }

    /// Mount a controller for `PUT` requests.
    pub fn put<M, C>(&mut self, matcher: M, controller: C) -> &mut Self
    where
        M: Matcher<Req>,
        C: Controller<Req, Res>,
    {
        self.mount_controller_for_method("PUT", matcher, controller)
    }

    /// Mount a controller for `DELETE` requests.
    pub fn delete<M, C>(&mut self, matcher: M, controller: C) -> &mut Self
    where
        M: Matcher<Req>,
        C: Controller<Req, Res>,
    {
        self.mount_controller_for_method("DELETE", matcher, controller)
    }

    /// Register a tagged unit: controllers are mounted for every request,
    /// error handlers are installed as with [`Dispatcher::mount_error_handler`].
    pub fn register(&mut self, unit: Unit<Req, Res>) -> &mut Self {
        match unit {
            Unit::Controller(controller) => self.mount_controller(Always, controller),
            Unit::ErrorHandler(handler) => self.mount_error_handler(handler),
        }
    }

    /// Run a request through the chain.
    ///
    /// Returns the final flow, or [`DispatchError::Unhandled`] carrying the
    /// original error when no installed handler took it.
    pub async fn dispatch(&self, req: &mut Req, res: &mut Res) -> Result<Flow, DispatchError> {
        #[cfg(feature = "tracing")]
        tracing::trace!(dispatcher = %self.name, method = req.method(), "dispatching request");

        match self.chain.handle(req, res).await {
            Ok(flow) => Ok(flow),
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(dispatcher = %self.name, %error, "unhandled error");
                Err(DispatchError::Unhandled(error))
            }
        }
    }
}

impl<Req: Request, Res: Response> Default for Dispatcher<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> Clone for Dispatcher<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            chain: self.chain.clone(),
            name: self.name.clone(),
            mounted: self.mounted,
        }
    }
}

// Mounted inside another chain, a dispatcher reports errors raw so the outer
// chain's handlers receive them unchanged.
impl<Req: Request, Res: Response> Controller<Req, Res> for Dispatcher<Req, Res> {
    async fn handle(&self, req: &mut Req, res: &mut Res) -> Result<Flow, BoxError> {
        self.chain.handle(req, res).await
    }
}
