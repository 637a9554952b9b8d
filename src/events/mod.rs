//! Typed events: marker trait, listener adapters, and the dispatcher.
//!
//! This module is the heart of the crate. It groups the event **contract**
//! (the [`Event`] marker), the **type-erasure layer** (listener adapters and
//! subscription handles), and the **dispatcher** itself.
//!
//! ## Contents
//! - [`Event`] — marker trait for publishable payload types
//! - [`SubscriptionId`] — opaque handle returned by subscribe, consumed by
//!   unsubscribe
//! - [`EventBus`] — the type-indexed synchronous dispatcher
//!
//! ## Quick reference
//! - **Producers**: anything holding a bus reference; the built-in
//!   [`ModeMachine`](crate::ModeMachine) publishes its transitions here.
//! - **Consumers**: closures registered via [`EventBus::subscribe`], invoked
//!   inline on the publishing thread.
//!
//! See `core/mod.rs` for how the bus is owned and torn down.

mod bus;
mod event;
mod listener;

pub use bus::EventBus;
pub use event::Event;
pub use listener::SubscriptionId;
