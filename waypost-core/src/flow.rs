//! Unit outcomes.
//!
//! A unit finishes in one of three ways: it continues the chain
//! (`Ok(Flow::Next)`), it finalizes the response and ends the chain
//! (`Ok(Flow::Stop)`), or it fails (`Err(error)`). The third case is the
//! continuation-with-error of the calling convention; everything downstream
//! sees the same `Err` whether the unit returned it or panicked.

use crate::error::BoxError;

/// Result of a unit indicating whether traversal should go on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// The unit is done with the request; run the next unit.
    #[default]
    Next,
    /// The unit finalized the response; no further unit runs.
    Stop,
}

impl Flow {
    /// Returns `true` for [`Flow::Next`].
    pub const fn is_next(self) -> bool {
        matches!(self, Flow::Next)
    }

    /// Returns `true` for [`Flow::Stop`].
    pub const fn is_stop(self) -> bool {
        matches!(self, Flow::Stop)
    }
}

/// Conversion of a closure's return value into a unit outcome.
///
/// # Default Implementations
///
/// - `Flow` → as is
/// - `()` → `Next`
/// - `Result<T, E>` → delegates to `T`, or reports `E` as the error
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a controller outcome",
    label = "missing `IntoFlow` implementation",
    note = "Return `Flow`, `()`, or a `Result` of either."
)]
pub trait IntoFlow {
    /// Convert the value into the chain outcome.
    fn into_flow(self) -> Result<Flow, BoxError>;
}

impl IntoFlow for Flow {
    fn into_flow(self) -> Result<Flow, BoxError> {
        Ok(self)
    }
}

impl IntoFlow for () {
    fn into_flow(self) -> Result<Flow, BoxError> {
        Ok(Flow::Next)
    }
}

impl<T, E> IntoFlow for Result<T, E>
where
    T: IntoFlow,
    E: Into<BoxError>,
{
    fn into_flow(self) -> Result<Flow, BoxError> {
        match self {
            Ok(t) => t.into_flow(),
            Err(e) => Err(e.into()),
        }
    }
}
