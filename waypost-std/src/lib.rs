//! # waypost-std
//!
//! The dispatch engine for Waypost.
//!
//! This crate provides:
//! - **Composition**: [`Compose`], [`compose`], and the [`group!`] macro
//! - **Guarded entries**: [`Guarded`]
//! - **Error boundaries**: [`ErrorBoundary`]
//! - **Dispatching**: [`Dispatcher`] and the tagged [`Unit`]
//! - **Standard controllers**: logging and tracing (`tracing` feature),
//!   timeouts (`timeout` feature)
//! - **Testing utilities**: mock request/response and recording units

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use waypost_core;

// Modules
pub mod boundary;
pub mod compose;
pub mod controllers;
pub mod dispatcher;
pub mod guarded;
pub mod testing;

pub use boundary::ErrorBoundary;
pub use compose::{Compose, compose};
pub use dispatcher::{Dispatcher, Unit};
pub use guarded::Guarded;
