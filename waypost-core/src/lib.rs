//! # waypost-core
//!
//! Core traits for the Waypost request dispatch engine.
//!
//! This crate only defines the calling convention between a host and the
//! units it runs. Composition, guarded matching, and error boundaries live in
//! `waypost-std`.
//!
//! # Calling Convention
//!
//! A unit is invoked with the request and the response, both borrowed
//! mutably for the duration of the call, and resolves to a
//! `Result<Flow, BoxError>`:
//!
//! | outcome          | meaning                                               |
//! |------------------|-------------------------------------------------------|
//! | `Ok(Flow::Next)` | continue with the next unit                           |
//! | `Ok(Flow::Stop)` | the response was finalized; nothing else runs         |
//! | `Err(error)`     | abort the remainder and go to the nearest error handler |
//!
//! There are two kinds of unit:
//!
//! - [`Controller`] - the normal `(request, response)` handler
//! - [`ErrorHandler`] - the `(error, request, response)` handler
//!
//! Guarded entries pair a controller with a [`Matcher`].
//!
//! # Error Types
//!
//! - [`BoxError`] - the in-flight error value
//! - [`ControllerError`] - panics and timeouts produced on a unit's behalf
//! - [`DispatchError`] - an error that escaped every handler

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod controller;
mod error;
mod error_handler;
mod flow;
mod matcher;
mod request;

// Re-exports
pub use controller::{
    BoxController, BoxFuture, Controller, ControllerFn, DynController, controller_fn,
};
pub use error::{BoxError, ControllerError, DispatchError};
pub use error_handler::{
    BoxErrorHandler, DynErrorHandler, ErrorHandler, ErrorHandlerFn, error_handler_fn,
};
pub use flow::{Flow, IntoFlow};
pub use matcher::{Always, IntoMatch, Matcher, Method};
pub use request::{Request, Response};
