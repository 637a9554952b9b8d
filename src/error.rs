//! Error types used by the typebus runtime.
//!
//! There is deliberately little here: the dispatcher itself cannot fail.
//! Publishing to a type nobody listens to is normal, removing a listener
//! twice is a no-op, and a panicking handler is caught and logged at the
//! invocation site. The only real error condition lives at the lifecycle
//! boundary: touching the [`Context`](crate::Context) after shutdown.

use thiserror::Error;

/// # Errors produced by the context lifecycle wrapper.
///
/// The context hands out the one [`EventBus`](crate::EventBus) per process.
/// Once [`Context::shutdown`](crate::Context::shutdown) has run, the bus is
/// gone for good; access attempts report [`ContextError::Unavailable`]
/// instead of constructing a replacement.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    /// The context has been shut down; the bus is no longer available.
    #[error("context has been shut down; event bus is unavailable")]
    Unavailable,
}

impl ContextError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use typebus::ContextError;
    ///
    /// assert_eq!(ContextError::Unavailable.as_label(), "context_unavailable");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ContextError::Unavailable => "context_unavailable",
        }
    }
}
