//! Error types for Waypost.
//!
//! Errors travel through a chain as a [`BoxError`] so that the value a
//! controller reports reaches the error handler untouched. The structured
//! types here cover failures the engine itself produces:
//!
//! - [`ControllerError`] - a unit panicked or ran out of time
//! - [`DispatchError`] - an error escaped the dispatcher with no handler

use std::{any::Any, time::Duration};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures raised by the engine on behalf of a unit.
#[derive(Error, Debug)]
pub enum ControllerError {
    /// The unit panicked while it was being invoked.
    #[error("controller panicked: {0}")]
    Panic(String),

    /// The unit did not finish within its time limit.
    #[error("controller timed out after {0:?}")]
    Timeout(Duration),
}

impl ControllerError {
    /// Build a [`ControllerError::Panic`] from a `catch_unwind` payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        ControllerError::Panic(message)
    }
}

/// Errors surfaced to the host that invoked a dispatcher.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// An error reached the end of the chain and no error handler took it.
    #[error("unhandled error: {0}")]
    Unhandled(#[source] BoxError),
}

impl DispatchError {
    /// Borrow the error that escaped the chain.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        match self {
            DispatchError::Unhandled(err) => err.as_ref(),
        }
    }

    /// Take back the error exactly as the failing unit produced it.
    pub fn into_inner(self) -> BoxError {
        match self {
            DispatchError::Unhandled(err) => err,
        }
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Unhandled(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payload_str() {
        let payload: Box<dyn Any + Send> = Box::new("bad state");
        let err = ControllerError::from_panic(payload);
        assert_eq!(err.to_string(), "controller panicked: bad state");
    }

    #[test]
    fn test_panic_payload_string() {
        let payload: Box<dyn Any + Send> = Box::new(format!("index {}", 3));
        assert!(matches!(
            ControllerError::from_panic(payload),
            ControllerError::Panic(msg) if msg == "index 3"
        ));
    }

    #[test]
    fn test_unhandled_keeps_original() {
        let original: BoxError = "match error".into();
        let err = DispatchError::from(original);
        assert_eq!(err.inner().to_string(), "match error");
        assert_eq!(err.into_inner().to_string(), "match error");
    }
}
