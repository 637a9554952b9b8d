//! # typebus
//!
//! **typebus** is a type-indexed, synchronous publish/subscribe event bus
//! for in-process communication, with a small runtime around it: a
//! single-instance lifecycle wrapper, an application mode machine, and an
//! audio clip lookup library.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!  │  ModeMachine │   │ gameplay code│   │  any producer│
//!  │ (transitions)│   │              │   │              │
//!  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!         │ publish(E)       │ publish(E)       │ publish(E)
//!         ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  EventBus (owned by Context)                              │
//! │  - registry:  TypeId(E) → [listener adapters, in order]   │
//! │  - counters:  TypeId(E) → total publishes                 │
//! └──────┬──────────────────────┬─────────────────────────────┘
//!        │ downcast + invoke    │ downcast + invoke
//!        ▼ (reverse order)      ▼
//!   callback(&E)           callback(&E)
//!   [panic caught]         [panic caught]
//! ```
//!
//! ### Dispatch
//! ```text
//! publish(event):
//!   ├─► counters[type] += 1            (always, listeners or not)
//!   ├─► no listeners? ─► return        (normal, not an error)
//!   └─► for adapter in listeners.rev():
//!         ├─ removed meanwhile? ─► skip
//!         ├─ invoke callback(&event)
//!         └─ panic? ─► log, continue with the rest
//! ```
//!
//! ## Features
//! | Area            | Description                                              | Key types                          |
//! |-----------------|----------------------------------------------------------|------------------------------------|
//! | **Dispatch**    | Exact-type routing, reverse order, panic isolation.      | [`EventBus`], [`SubscriptionId`]   |
//! | **Events**      | Plain-data payloads opt in via a marker trait.           | [`Event`]                          |
//! | **Lifecycle**   | One bus per process, explicit shutdown, no resurrection. | [`Context`], [`ContextError`]      |
//! | **Modes**       | Finite-state app mode switch announcing transitions.     | [`ModeMachine`], [`Mode`]          |
//! | **Audio**       | Named clip lookup with defaults and random selection.    | [`AudioLibrary`], [`AudioClip`]    |
//! | **Config**      | Centralized runtime settings.                            | [`Config`]                         |
//!
//! ## Example
//! ```rust
//! use typebus::{Config, Context, ContextError, Event};
//!
//! #[derive(Debug, Clone, Copy)]
//! struct DamageTaken {
//!     amount: f32,
//!     current_health: f32,
//!     max_health: f32,
//! }
//! impl Event for DamageTaken {}
//!
//! fn main() -> Result<(), ContextError> {
//!     let ctx = Context::new(Config::default());
//!     let bus = ctx.bus()?;
//!
//!     let sub = bus.subscribe(|e: &DamageTaken| {
//!         println!("took {} ({}/{})", e.amount, e.current_health, e.max_health);
//!     });
//!
//!     bus.publish(DamageTaken {
//!         amount: 10.0,
//!         current_health: 20.0,
//!         max_health: 50.0,
//!     });
//!     assert_eq!(bus.publish_count::<DamageTaken>(), 1);
//!
//!     bus.unsubscribe(sub);
//!     ctx.shutdown();
//!     assert!(ctx.bus().is_err());
//!     Ok(())
//! }
//! ```

mod audio;
mod core;
mod error;
mod events;

// ---- Public re-exports ----

pub use audio::{AudioClip, AudioLibrary};
pub use core::{Config, Context, Mode, ModeChanged, ModeMachine, PauseToggled};
pub use error::ContextError;
pub use events::{Event, EventBus, SubscriptionId};
