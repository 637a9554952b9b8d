//! # Application mode machine.
//!
//! [`ModeMachine`] tracks which high-level [`Mode`] the application is in and
//! announces every transition on the bus as a [`ModeChanged`] event. It is a
//! plain producer: the bus needs no special support for it.
//!
//! ## Transitions
//! ```text
//!            change_to(Playing)            pause()
//!   Menu ───────────────────────► Playing ────────► Paused
//!    ▲                               ▲  ▲              │
//!    │       change_to(Menu)         │  └── resume() ──┘
//!    └───────────────────────────────┴── restart()
//! ```
//!
//! ## Rules
//! - A transition to the current mode is a silent no-op (nothing published).
//! - `pause` only acts while `Playing`; `resume` only while `Paused`.
//! - Every *actual* transition publishes `ModeChanged { from, to }`;
//!   pause/resume additionally publish [`PauseToggled`].

use std::sync::Arc;

use crate::core::config::Config;
use crate::events::{Event, EventBus};

/// High-level application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Main menu / idle.
    #[default]
    Menu,
    /// Gameplay is running.
    Playing,
    /// Gameplay suspended; resumable.
    Paused,
    /// Run ended in defeat.
    GameOver,
    /// Run ended in victory.
    Victory,
    /// Loading screen between modes.
    Loading,
}

/// Published on every mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChanged {
    /// Mode before the transition.
    pub from: Mode,
    /// Mode after the transition.
    pub to: Mode,
}
impl Event for ModeChanged {}

/// Published when the pause flag flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseToggled {
    /// True when entering pause, false when leaving it.
    pub paused: bool,
}
impl Event for PauseToggled {}

/// Finite-state mode switch that announces transitions on the bus.
pub struct ModeMachine {
    bus: Arc<EventBus>,
    current: Mode,
    previous: Mode,
    paused: bool,
}

impl ModeMachine {
    /// Creates a machine in `config.start_mode`.
    ///
    /// Honors `config.pause_on_start` (effective only when starting in
    /// [`Mode::Playing`]): when it applies, construction pauses immediately
    /// and publishes the `Playing` → `Paused` transition and [`PauseToggled`]
    /// like any other pause. Otherwise construction publishes nothing.
    #[must_use]
    pub fn new(bus: Arc<EventBus>, config: &Config) -> Self {
        let mut machine = Self {
            bus,
            current: config.start_mode,
            previous: config.start_mode,
            paused: false,
        };
        if config.pause_on_start {
            machine.pause();
        }
        machine
    }

    /// Current mode.
    #[must_use]
    pub fn current(&self) -> Mode {
        self.current
    }

    /// Mode before the most recent transition.
    #[must_use]
    pub fn previous(&self) -> Mode {
        self.previous
    }

    /// True while paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True while actively playing (in [`Mode::Playing`] and not paused).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current == Mode::Playing && !self.paused
    }

    /// Transitions to `mode` and publishes [`ModeChanged`].
    ///
    /// Transitioning to the current mode is a silent no-op. Entering
    /// [`Mode::Playing`] clears a leftover pause flag.
    pub fn change_to(&mut self, mode: Mode) {
        if self.current == mode {
            return;
        }

        self.previous = self.current;
        self.current = mode;

        if mode == Mode::Playing {
            self.paused = false;
        }

        self.bus.publish(ModeChanged {
            from: self.previous,
            to: self.current,
        });
    }

    /// Suspends gameplay: `Playing` → `Paused`, publishes both the
    /// transition and [`PauseToggled`].
    ///
    /// No-op unless currently playing and not already paused.
    pub fn pause(&mut self) {
        if self.paused || self.current != Mode::Playing {
            return;
        }

        self.paused = true;
        self.change_to(Mode::Paused);
        self.bus.publish(PauseToggled { paused: true });
    }

    /// Resumes gameplay: `Paused` → `Playing`, publishes both the transition
    /// and [`PauseToggled`].
    ///
    /// No-op unless currently paused.
    pub fn resume(&mut self) {
        if !self.paused || self.current != Mode::Paused {
            return;
        }

        self.paused = false;
        self.change_to(Mode::Playing);
        self.bus.publish(PauseToggled { paused: false });
    }

    /// Pauses when active, resumes when paused.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Jumps back into gameplay regardless of the current mode and clears
    /// the pause flag.
    pub fn restart(&mut self) {
        self.paused = false;
        self.change_to(Mode::Playing);
    }
}
