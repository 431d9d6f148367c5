//! Standard controller wrappers.

#[cfg(feature = "tracing")]
pub mod instrument;
#[cfg(feature = "tracing")]
pub mod logging;
#[cfg(feature = "timeout")]
pub mod timeout;

#[cfg(feature = "tracing")]
pub use instrument::Instrumented;
#[cfg(feature = "tracing")]
pub use logging::LoggingController;
#[cfg(feature = "timeout")]
pub use timeout::Timeout;
