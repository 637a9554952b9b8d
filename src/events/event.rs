//! # Event marker trait.
//!
//! Any plain-data struct can become a bus event by implementing [`Event`].
//! The trait carries no behavior; it exists so the subscribe/publish surface
//! only accepts types that were meant to travel on the bus, and so every
//! payload is guaranteed to have a stable runtime type key (`TypeId`).
//!
//! ## Example
//! ```rust
//! use typebus::Event;
//!
//! #[derive(Debug, Clone, Copy)]
//! struct DamageTaken {
//!     amount: f32,
//!     current_health: f32,
//!     max_health: f32,
//! }
//!
//! impl Event for DamageTaken {}
//! ```

use std::any::Any;

/// Marker for types that can be published on the [`EventBus`](crate::EventBus).
///
/// Requirements are structural, not behavioral:
/// - `Any` gives the payload its runtime type key and enables the downcast
///   inside the listener adapter;
/// - `Send + Sync` lets handlers registered from one thread observe events
///   published from another.
///
/// Payloads should stay plain data. Two distinct structs never share a type
/// key; the same struct always maps to the same one.
pub trait Event: Any + Send + Sync {}
