//! Runtime core: lifecycle and application state.
//!
//! This module wires the bus into a process: [`Context`] owns the single bus
//! instance and tears it down at shutdown, [`ModeMachine`] announces
//! application mode transitions through it, and [`Config`] centralizes the
//! runtime settings both of them read.
//!
//! Internal modules:
//! - [`config`]: runtime settings (diagnostics flag, mode startup knobs);
//! - [`context`]: single-instance bus ownership and shutdown;
//! - [`mode`]: finite-state application mode switch and its event payloads.

mod config;
mod context;
mod mode;

pub use config::Config;
pub use context::Context;
pub use mode::{Mode, ModeChanged, ModeMachine, PauseToggled};
