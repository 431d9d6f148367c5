//! Request and response traits.
//!
//! The engine treats both values as opaque. The only thing it ever reads
//! from a request is its method name, used by method-restricted
//! registration. Everything else is owned by the controllers.

/// An inbound call travelling through a controller chain.
///
/// Controllers receive the request as `&mut Req`, so a mutation made by one
/// unit is visible to every unit that runs after it in the same traversal.
///
/// # Example
///
/// ```rust,ignore
/// struct ApiRequest {
///     method: String,
///     user: Option<String>,
/// }
///
/// impl Request for ApiRequest {
///     fn method(&self) -> &str {
///         &self.method
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Request",
    label = "missing `Request` implementation",
    note = "Requests must be `Send + Sync + 'static` and expose their method name."
)]
pub trait Request: Send + Sync + 'static {
    /// The method identifier (`"GET"`, `"post"`, ...). Compared case-insensitively.
    fn method(&self) -> &str;
}

/// A marker trait for the outgoing result of a traversal.
///
/// Any unit may finalize the response. The engine never inspects it.
pub trait Response: Send + 'static {}
impl<T: Send + 'static> Response for T {}
