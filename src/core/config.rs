//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for the context and its
//! collaborators.
//!
//! Config is used in two ways:
//! 1. **Context creation**: `Context::new(config)` wires the bus.
//! 2. **Mode machine startup**: `ModeMachine::new(bus, &config)` reads the
//!    startup mode knobs.

use crate::core::mode::Mode;

/// Global configuration for the typebus runtime.
///
/// Defines:
/// - **Diagnostics**: whether bus operations emit trace lines
/// - **Mode machine startup**: initial mode and pause-on-start behavior
///
/// ## Field semantics
/// - `log_events`: emit a debug line per subscribe/unsubscribe/publish.
///   Strictly a side channel; dispatch behaves identically either way.
/// - `start_mode`: mode the machine boots into (default `Menu`)
/// - `pause_on_start`: pause immediately after startup; only takes effect
///   when `start_mode` is `Playing` (pausing any other mode is a no-op)
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Emit debug trace lines for bus operations.
    ///
    /// When enabled, each subscribe/unsubscribe logs the event type name and
    /// each publish additionally logs the post-increment counter value.
    pub log_events: bool,

    /// Mode the machine starts in.
    pub start_mode: Mode,

    /// Pause the mode machine right after startup.
    ///
    /// Mirrors the pause guard of [`ModeMachine::pause`](crate::ModeMachine::pause):
    /// only a `Playing` machine can pause, so this flag is inert unless
    /// `start_mode` is `Playing`.
    pub pause_on_start: bool,
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `log_events = false` (quiet bus)
    /// - `start_mode = Mode::Menu`
    /// - `pause_on_start = false`
    fn default() -> Self {
        Self {
            log_events: false,
            start_mode: Mode::Menu,
            pause_on_start: false,
        }
    }
}
