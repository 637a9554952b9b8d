//! # Single-instance lifecycle wrapper around the bus.
//!
//! [`Context`] owns the one [`EventBus`] for the process. It is built once at
//! startup and passed by reference to every collaborator, which keeps the
//! "one instance, no post-shutdown creation" contract explicit instead of
//! hiding it behind ambient global state.
//!
//! ## Lifecycle
//! ```text
//! Context::new(cfg) ──► bus() → Ok(Arc<EventBus>)   (any number of times)
//!        │
//!        ▼ shutdown()                (idempotent)
//!  bus.clear_all() ──► bus() → Err(ContextError::Unavailable)
//! ```
//!
//! ## Rules
//! - `shutdown` tears the bus down exactly once; repeat calls do nothing.
//! - After shutdown, `bus()` reports unavailable; a new bus is never
//!   constructed behind the caller's back.
//! - Handles (`Arc<EventBus>`) obtained *before* shutdown keep the allocation
//!   alive, but the bus they point at has been cleared.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::core::config::Config;
use crate::error::ContextError;
use crate::events::EventBus;

/// Owner of the process-wide event bus.
///
/// All methods take `&self`; the context itself is typically stored in an
/// `Arc` or a `'static` location and shared.
pub struct Context {
    bus: Arc<EventBus>,
    config: Config,
    shut_down: AtomicBool,
}

impl Context {
    /// Builds the context and its bus from `config`.
    ///
    /// Intended to be called exactly once per process, at startup.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            bus: Arc::new(EventBus::new(config.log_events)),
            config,
            shut_down: AtomicBool::new(false),
        }
    }

    /// Returns a handle to the process-wide bus.
    ///
    /// # Errors
    /// [`ContextError::Unavailable`] once [`shutdown`](Self::shutdown) has run.
    pub fn bus(&self) -> Result<Arc<EventBus>, ContextError> {
        if self.shut_down.load(Ordering::Acquire) {
            return Err(ContextError::Unavailable);
        }
        Ok(Arc::clone(&self.bus))
    }

    /// The configuration this context was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True once [`shutdown`](Self::shutdown) has run.
    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    /// Tears the bus down: clears every subscription and counter, then marks
    /// the context unavailable.
    ///
    /// Idempotent; only the first call does the teardown.
    pub fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            return;
        }
        self.bus.clear_all();
        debug!("context shut down; event bus cleared");
    }
}

impl Drop for Context {
    /// Last-resort teardown for contexts dropped without an explicit
    /// [`shutdown`](Self::shutdown).
    fn drop(&mut self) {
        self.shutdown();
    }
}
