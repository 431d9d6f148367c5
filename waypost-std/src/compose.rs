//! Sequential composition of controllers.
//!
//! [`Compose`] turns an ordered sequence of controllers into a single
//! controller. Units run strictly one after another; the first unit that
//! stops or fails ends the traversal, and an exhausted sequence continues
//! the enclosing chain.
//!
//! The sequence is an immutable shared slice. Appending builds a new slice,
//! so a `Compose` that is already being dispatched is never modified, and
//! every invocation walks the slice with its own cursor.

use futures::FutureExt;
use std::{future::Future, panic::AssertUnwindSafe, sync::Arc};
use waypost_core::{
    BoxController, BoxError, Controller, ControllerError, Flow, Request, Response,
};

/// An ordered group of controllers executed as one.
///
/// # Example
///
/// ```rust,ignore
/// let group = Compose::new()
///     .with(LoadUser)
///     .with(CheckPermissions)
///     .with(RenderProfile);
///
/// dispatcher.get(|req: &ApiRequest| req.path == "/profile", group);
/// ```
pub struct Compose<Req, Res> {
    units: Arc<[BoxController<Req, Res>]>,
}

impl<Req, Res> Compose<Req, Res> {
    /// Create an empty group. Invoking it continues immediately.
    pub fn new() -> Self {
        Self {
            units: Arc::from(Vec::new()),
        }
    }

    /// Get the number of units in the group.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the group has no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Return a new group with `unit` appended. `self` is left untouched.
    pub fn push(&self, unit: BoxController<Req, Res>) -> Self {
        let mut units = Vec::with_capacity(self.units.len() + 1);
        units.extend(self.units.iter().cloned());
        units.push(unit);
        Self {
            units: units.into(),
        }
    }
}

impl<Req: Request, Res: Response> Compose<Req, Res> {
    /// Append a controller, builder style.
    pub fn with<C: Controller<Req, Res>>(self, controller: C) -> Self {
        self.push(controller.boxed())
    }
}

impl<Req, Res> Clone for Compose<Req, Res> {
    fn clone(&self) -> Self {
        Self {
            units: Arc::clone(&self.units),
        }
    }
}

impl<Req, Res> Default for Compose<Req, Res> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Res> FromIterator<BoxController<Req, Res>> for Compose<Req, Res> {
    fn from_iter<I: IntoIterator<Item = BoxController<Req, Res>>>(iter: I) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

impl<Req: Request, Res: Response> Controller<Req, Res> for Compose<Req, Res> {
    async fn handle(&self, req: &mut Req, res: &mut Res) -> Result<Flow, BoxError> {
        for unit in self.units.iter() {
            if invoke(async { (**unit).handle_dyn(req, res).await })
                .await?
                .is_stop()
            {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Next)
    }
}

/// Compose an ordered sequence of controllers into one.
pub fn compose<Req, Res, I>(units: I) -> Compose<Req, Res>
where
    I: IntoIterator<Item = BoxController<Req, Res>>,
{
    units.into_iter().collect()
}

/// Build a [`Compose`] from a list of controllers of any type.
///
/// ```rust,ignore
/// dispatcher.all(Always, group![LoadUser, CheckPermissions, RenderProfile]);
/// ```
#[macro_export]
macro_rules! group {
    () => {
        $crate::compose::Compose::new()
    };
    ($($unit:expr),+ $(,)?) => {
        $crate::compose::Compose::new()$(.with($unit))+
    };
}

/// Run one unit, turning a panic raised while polling it into an error.
///
/// This is the single place where a unit that "throws" instead of reporting
/// is normalized into the same `Err` a reporting unit would produce. Callers
/// pass an `async` block that makes the unit call, so a panic raised while
/// the unit builds its future is caught as well.
pub(crate) async fn invoke<F>(unit: F) -> Result<Flow, BoxError>
where
    F: Future<Output = Result<Flow, BoxError>>,
{
    match AssertUnwindSafe(unit).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            let err = ControllerError::from_panic(payload);
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "controller panicked; routing as error");
            Err(Box::new(err))
        }
    }
}
