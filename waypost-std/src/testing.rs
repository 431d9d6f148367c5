//! Testing utilities for Waypost.
//!
//! This module provides small building blocks for exercising dispatchers
//! without a real host.
//!
//! # Features
//!
//! - [`MockRequest`] / [`MockResponse`]: in-memory request and response values
//! - [`RecordingController`]: records its name into a shared log when invoked
//! - [`CountingController`]: counts invocations
//! - [`FailingController`] / [`PanickingController`]: report or raise an error
//! - [`EagerPanickingController`]: raises before its future even exists
//! - [`RespondController`]: finalizes a [`MockResponse`] and stops the chain
//! - [`RecordingErrorHandler`]: captures the errors it receives

use std::{
    collections::HashMap,
    future::Future,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use waypost_core::{BoxError, Controller, ErrorHandler, Flow, Request, Response};

/// A shared log of unit names, in invocation order.
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

/// Create an empty [`CallLog`].
pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

// ============================================================================
// Mock Request / Response
// ============================================================================

/// An in-memory request with a method, a path, and free-form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockRequest {
    /// The request method, as sent by the client.
    pub method: String,
    /// The request path. The engine never looks at it.
    pub path: String,
    /// Caller-defined fields that controllers read and write.
    pub fields: HashMap<String, String>,
}

impl MockRequest {
    /// Create a request with the given method and path.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            fields: HashMap::new(),
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    /// Shorthand for a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new("POST", path)
    }

    /// Shorthand for a `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new("PUT", path)
    }

    /// Shorthand for a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new("DELETE", path)
    }

    /// Set a field, builder style.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Read a field.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

impl Request for MockRequest {
    fn method(&self) -> &str {
        &self.method
    }
}

/// An in-memory response that remembers how often it was finalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockResponse {
    /// Status of the last `send`.
    pub status: Option<u16>,
    /// Body of the last `send`.
    pub body: Option<String>,
    sends: usize,
}

impl MockResponse {
    /// Create an unsent response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize the response.
    pub fn send(&mut self, status: u16, body: impl Into<String>) {
        self.status = Some(status);
        self.body = Some(body.into());
        self.sends += 1;
    }

    /// Whether `send` was called at least once.
    pub fn is_sent(&self) -> bool {
        self.sends > 0
    }

    /// Number of times `send` was called.
    pub fn send_count(&self) -> usize {
        self.sends
    }
}

// ============================================================================
// Recording Controller
// ============================================================================

/// A controller that records its name into a [`CallLog`].
///
/// # Example
///
/// ```rust,ignore
/// let log = call_log();
/// dispatcher.all(Always, RecordingController::new("a", &log));
/// dispatcher.all(Always, RecordingController::new("b", &log));
///
/// dispatcher.dispatch(&mut req, &mut res).await?;
/// assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
/// ```
#[derive(Clone)]
pub struct RecordingController {
    name: &'static str,
    log: CallLog,
    result: Flow,
}

impl RecordingController {
    /// Create a recording controller that continues the chain.
    pub fn new(name: &'static str, log: &CallLog) -> Self {
        Self::with_result(name, log, Flow::Next)
    }

    /// Create a recording controller that returns a specific flow.
    pub fn with_result(name: &'static str, log: &CallLog, result: Flow) -> Self {
        Self {
            name,
            log: log.clone(),
            result,
        }
    }
}

impl<Req: Request, Res: Response> Controller<Req, Res> for RecordingController {
    async fn handle(&self, _req: &mut Req, _res: &mut Res) -> Result<Flow, BoxError> {
        self.log.lock().unwrap().push(self.name);
        Ok(self.result)
    }
}

// ============================================================================
// Counting Controller
// ============================================================================

/// A controller that counts invocations and continues.
#[derive(Clone, Default)]
pub struct CountingController {
    count: Arc<AtomicUsize>,
}

impl CountingController {
    /// Create a new counting controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Whether the controller ran at least once.
    pub fn called(&self) -> bool {
        self.count() > 0
    }
}

impl<Req: Request, Res: Response> Controller<Req, Res> for CountingController {
    async fn handle(&self, _req: &mut Req, _res: &mut Res) -> Result<Flow, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(Flow::Next)
    }
}

// ============================================================================
// Failing Controllers
// ============================================================================

/// A controller that reports an error through its result.
#[derive(Clone)]
pub struct FailingController {
    message: &'static str,
}

impl FailingController {
    /// Create a controller failing with `message`.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl<Req: Request, Res: Response> Controller<Req, Res> for FailingController {
    async fn handle(&self, _req: &mut Req, _res: &mut Res) -> Result<Flow, BoxError> {
        Err(self.message.into())
    }
}

/// A controller that panics instead of reporting.
#[derive(Clone)]
pub struct PanickingController {
    message: &'static str,
}

impl PanickingController {
    /// Create a controller panicking with `message`.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl<Req: Request, Res: Response> Controller<Req, Res> for PanickingController {
    async fn handle(&self, _req: &mut Req, _res: &mut Res) -> Result<Flow, BoxError> {
        panic!("{}", self.message)
    }
}

/// A controller whose `handle` panics while building its future.
///
/// Unlike [`PanickingController`] the panic happens at the call itself, before
/// anything is polled.
#[derive(Clone)]
pub struct EagerPanickingController {
    message: &'static str,
}

impl EagerPanickingController {
    /// Create a controller panicking with `message`.
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl<Req: Request, Res: Response> Controller<Req, Res> for EagerPanickingController {
    #[allow(unreachable_code)]
    fn handle(
        &self,
        _req: &mut Req,
        _res: &mut Res,
    ) -> impl Future<Output = Result<Flow, BoxError>> + Send {
        panic!("{}", self.message);
        async { Ok::<_, BoxError>(Flow::Next) }
    }
}

// ============================================================================
// Respond Controller
// ============================================================================

/// Finalizes a [`MockResponse`] with status 200 and stops the chain.
#[derive(Clone)]
pub struct RespondController {
    body: &'static str,
}

impl RespondController {
    /// Respond with `body`.
    pub fn new(body: &'static str) -> Self {
        Self { body }
    }
}

impl<Req: Request> Controller<Req, MockResponse> for RespondController {
    async fn handle(&self, _req: &mut Req, res: &mut MockResponse) -> Result<Flow, BoxError> {
        res.send(200, self.body);
        Ok(Flow::Stop)
    }
}

// ============================================================================
// Recording Error Handler
// ============================================================================

/// An error handler that records the message of every error it receives.
#[derive(Clone)]
pub struct RecordingErrorHandler {
    errors: Arc<Mutex<Vec<String>>>,
    result: Flow,
}

impl RecordingErrorHandler {
    /// Create a handler that stops the chain after recording.
    pub fn new() -> Self {
        Self::with_result(Flow::Stop)
    }

    /// Create a handler that returns a specific flow after recording.
    pub fn with_result(result: Flow) -> Self {
        Self {
            errors: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// Messages of the errors received so far.
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    /// Number of errors received.
    pub fn count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }
}

impl Default for RecordingErrorHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req: Request, Res: Response> ErrorHandler<Req, Res> for RecordingErrorHandler {
    async fn handle_error(
        &self,
        error: BoxError,
        _req: &mut Req,
        _res: &mut Res,
    ) -> Result<Flow, BoxError> {
        self.errors.lock().unwrap().push(error.to_string());
        Ok(self.result)
    }
}
