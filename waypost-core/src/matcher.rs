//! Match predicates for guarded entries.
//!
//! A matcher looks at the request and decides whether the guarded controller
//! runs. Evaluation may fail; the error is routed down the chain like any
//! other unit error and the guarded controller is skipped.

use crate::{
    error::BoxError,
    request::Request,
};
use std::borrow::Cow;

/// A predicate over the incoming request.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot match requests of type `{Req}`",
    label = "missing `Matcher` implementation",
    note = "Use a closure `|req: &{Req}| -> bool` (or `-> Result<bool, E>`), or implement `Matcher<{Req}>`."
)]
pub trait Matcher<Req: Request>: Send + Sync + 'static {
    /// Evaluate the predicate.
    fn matches(&self, req: &Req) -> Result<bool, BoxError>;
}

/// Conversion of a predicate closure's return value.
pub trait IntoMatch {
    /// Convert into the match outcome.
    fn into_match(self) -> Result<bool, BoxError>;
}

impl IntoMatch for bool {
    fn into_match(self) -> Result<bool, BoxError> {
        Ok(self)
    }
}

impl<E: Into<BoxError>> IntoMatch for Result<bool, E> {
    fn into_match(self) -> Result<bool, BoxError> {
        self.map_err(Into::into)
    }
}

// Blanket impl for closures
impl<Req, F, O> Matcher<Req> for F
where
    Req: Request,
    F: Fn(&Req) -> O + Send + Sync + 'static,
    O: IntoMatch,
{
    fn matches(&self, req: &Req) -> Result<bool, BoxError> {
        (self)(req).into_match()
    }
}

/// A matcher that accepts every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Always;

impl<Req: Request> Matcher<Req> for Always {
    fn matches(&self, _req: &Req) -> Result<bool, BoxError> {
        Ok(true)
    }
}

/// Restricts an inner matcher to one request method.
///
/// The method is compared ASCII case-insensitively, so a `Method` built for
/// `"GET"` accepts both `"GET"` and `"get"`. The inner matcher is only
/// evaluated once the method matched.
#[derive(Debug, Clone)]
pub struct Method<M> {
    method: Cow<'static, str>,
    inner: M,
}

impl<M> Method<M> {
    /// Create a method-restricted matcher.
    pub fn new(method: impl Into<Cow<'static, str>>, inner: M) -> Self {
        Self {
            method: method.into(),
            inner,
        }
    }

    /// The method this matcher accepts.
    pub fn method(&self) -> &str {
        &self.method
    }
}

impl<Req: Request, M: Matcher<Req>> Matcher<Req> for Method<M> {
    fn matches(&self, req: &Req) -> Result<bool, BoxError> {
        if !req.method().eq_ignore_ascii_case(&self.method) {
            return Ok(false);
        }
        self.inner.matches(req)
    }
}
