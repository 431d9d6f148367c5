//! # waypost - Composable Request Dispatch
//!
//! `waypost` builds one request handler out of an ordered collection of
//! conditionally applicable controllers. Entries run in registration order,
//! a matcher decides whether each one applies, the first controller that
//! finalizes the response ends the traversal, and the first error skips
//! everything that remains and goes to the nearest error handler.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waypost::prelude::*;
//!
//! let mut api: Dispatcher<ApiRequest, ApiResponse> = Dispatcher::named("api");
//! api.all(Always, LogRequest)
//!     .get(|req: &ApiRequest| req.path == "/users", ListUsers)
//!     .post(
//!         |req: &ApiRequest| req.path == "/users",
//!         group![Authenticate, ValidateBody, CreateUser],
//!     )
//!     .mount_error_handler(RenderError);
//!
//! match api.dispatch(&mut req, &mut res).await {
//!     Ok(Flow::Stop) => {}                  // a controller answered
//!     Ok(Flow::Next) => fall_through(),     // nothing matched
//!     Err(err) => report(err.into_inner()), // no handler took the error
//! }
//! ```
//!
//! ## Features
//!
//! - `tracing` - dispatch log records, [`controllers::LoggingController`] and
//!   [`controllers::Instrumented`]
//! - `timeout` - [`controllers::Timeout`]
//! - `tower` - [`service::DispatchService`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Units
pub use waypost_core::{
    BoxController, BoxErrorHandler, BoxFuture, Controller, ControllerFn, DynController,
    DynErrorHandler, ErrorHandler, ErrorHandlerFn, controller_fn, error_handler_fn,
};

// Request / Response / Outcomes
pub use waypost_core::{Flow, IntoFlow, Request, Response};

// Matchers
pub use waypost_core::{Always, IntoMatch, Matcher, Method};

// Errors
pub use waypost_core::{BoxError, ControllerError, DispatchError};

// Engine
pub use waypost_std::{Compose, Dispatcher, ErrorBoundary, Guarded, Unit, compose, group};

#[cfg(feature = "tower")]
pub mod service;

/// Standard controller wrappers.
pub mod controllers {
    #![allow(clippy::wildcard_imports)]
    pub use waypost_std::controllers::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use waypost_std::testing::*;
}

/// Prelude module - common imports for Waypost.
///
/// # Usage
///
/// ```rust,ignore
/// use waypost::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Always, BoxError, Compose, Controller, DispatchError, Dispatcher, ErrorHandler, Flow,
        Matcher, Request, Unit, controller_fn, error_handler_fn, group,
    };
}
