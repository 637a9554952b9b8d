//! # Type-indexed publish/subscribe event bus.
//!
//! [`EventBus`] routes published values to the handlers registered for that
//! value's exact runtime type. Dispatch is synchronous and immediate: every
//! handler runs to completion on the publishing thread before `publish`
//! returns.
//!
//! ## Architecture
//! ```text
//! Producers:                         Registry (per type key):
//!   mode machine ──┐
//!   gameplay code ─┼─► publish(E) ──► [TypeId(E)] ─► adapter ─► callback(&E)
//!   anything else ─┘        │                    └► adapter ─► callback(&E)
//!                           │
//!                           └──────► counters[TypeId(E)] += 1
//! ```
//!
//! ## Rules
//! - **Exact-type routing**: a handler for `E` only ever sees values of `E`.
//! - **Reverse dispatch order**: the most recently subscribed handler runs
//!   first. A handler may unsubscribe itself (or any other handler) during
//!   its own invocation; already-removed handlers are skipped.
//! - **Panic isolation**: a panicking handler is caught and logged; the
//!   remaining handlers still run and nothing reaches the publisher.
//! - **Counters before listeners**: the per-type publish counter increments
//!   on every publish, listeners or not.
//! - **No empty buckets**: a type key disappears from the registry the moment
//!   its last listener is removed.
//!
//! ## Reentrancy
//! The internal lock is never held while a handler runs, so handlers are free
//! to call [`EventBus::subscribe`] and [`EventBus::unsubscribe`] on the same
//! bus. A handler added during a publish is not invoked in that same publish;
//! a handler removed before the dispatch loop reaches it is skipped.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error};

use super::event::Event;
use super::listener::{Listener, SubscriptionId, TypedListener};

/// One registered listener: its handle plus the erased adapter.
struct Entry {
    id: SubscriptionId,
    listener: Arc<dyn Listener>,
}

/// Registry and counters, guarded together by a single lock.
#[derive(Default)]
struct Inner {
    /// Type key → listeners in subscription order (non-empty by invariant).
    registry: HashMap<TypeId, Vec<Entry>>,
    /// Type key → total publishes for that type, monotonically non-decreasing.
    counters: HashMap<TypeId, u64>,
}

/// Synchronous type-indexed publish/subscribe dispatcher.
///
/// ### Properties
/// - **Immediate**: handlers run inline on the publishing thread; there is no
///   queue, no deferral, no backpressure.
/// - **Isolated**: a panicking handler never affects other handlers or the
///   publisher.
/// - **Shareable**: all methods take `&self`; wrap in an `Arc` to share
///   across components or threads.
///
/// ### Example
/// ```rust
/// use typebus::{Event, EventBus};
///
/// #[derive(Debug)]
/// struct Scored { points: u32 }
/// impl Event for Scored {}
///
/// let bus = EventBus::new(false);
/// let sub = bus.subscribe(|e: &Scored| println!("+{}", e.points));
/// bus.publish(Scored { points: 100 });
/// bus.unsubscribe(sub);
/// ```
pub struct EventBus {
    inner: Mutex<Inner>,
    /// When true, subscribe/unsubscribe/publish emit debug trace lines.
    /// A side channel only; never affects dispatch outcome.
    log_events: bool,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("log_events", &self.log_events)
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Creates an empty bus.
    ///
    /// `log_events` toggles the per-operation debug trace lines.
    #[must_use]
    pub fn new(log_events: bool) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            log_events,
        }
    }

    /// Registers `callback` for events of type `E` and returns its handle.
    ///
    /// The new listener is appended at the end of `E`'s bucket, which makes it
    /// the *first* to run on the next publish (reverse dispatch order).
    ///
    /// Subscribing the same closure twice creates two independent listeners,
    /// each invoked once per publish; detaching fully takes one
    /// [`unsubscribe`](Self::unsubscribe) per handle.
    pub fn subscribe<E: Event>(
        &self,
        callback: impl Fn(&E) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId::next::<E>();
        let listener: Arc<dyn Listener> = Arc::new(TypedListener::new(callback));

        let mut inner = self.lock();
        inner
            .registry
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Entry { id, listener });

        if self.log_events {
            debug!(event = type_name::<E>(), "subscribed");
        }
        id
    }

    /// Removes the listener identified by `id`.
    ///
    /// Unknown or already-removed ids are a silent no-op, never an error.
    /// When the last listener of a type is removed, the type's registry entry
    /// is deleted entirely.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut inner = self.lock();

        let mut removed = None;
        let mut empty = false;
        if let Some(bucket) = inner.registry.get_mut(&id.key()) {
            if let Some(pos) = bucket.iter().position(|entry| entry.id == id) {
                removed = Some(bucket.remove(pos));
                empty = bucket.is_empty();
            }
        }
        if empty {
            inner.registry.remove(&id.key());
        }

        if self.log_events {
            if let Some(entry) = removed {
                debug!(event = entry.listener.event_name(), "unsubscribed");
            }
        }
    }

    /// Publishes `event` to every listener currently registered for `E`.
    ///
    /// The publish counter for `E` increments first, unconditionally; a type
    /// with zero listeners is normal, not an error. Listeners then run in
    /// reverse registration order, each isolated by `catch_unwind`: one
    /// panicking handler is logged and skipped over, the rest still run, and
    /// the panic never surfaces here.
    ///
    /// Handlers may mutate the registry mid-dispatch; see the module docs for
    /// the exact reentrancy guarantees.
    pub fn publish<E: Event>(&self, event: E) {
        let key = TypeId::of::<E>();

        let snapshot: Vec<Entry> = {
            let mut inner = self.lock();
            let count = inner.counters.entry(key).or_insert(0);
            *count += 1;

            if self.log_events {
                debug!(event = type_name::<E>(), count = *count, "publishing");
            }

            match inner.registry.get(&key) {
                Some(bucket) => bucket
                    .iter()
                    .map(|entry| Entry {
                        id: entry.id,
                        listener: Arc::clone(&entry.listener),
                    })
                    .collect(),
                None => {
                    if self.log_events {
                        debug!(event = type_name::<E>(), "no subscribers");
                    }
                    return;
                }
            }
        };

        // Lock released: handlers may re-enter subscribe/unsubscribe freely.
        for entry in snapshot.iter().rev() {
            if !self.is_registered(entry.id) {
                continue; // removed by an earlier handler in this dispatch
            }

            let invoke = AssertUnwindSafe(|| entry.listener.handle(&event as &dyn Any));
            if let Err(payload) = panic::catch_unwind(invoke) {
                error!(
                    event = type_name::<E>(),
                    panic = panic_message(payload.as_ref()),
                    "handler panicked during dispatch"
                );
            }
        }
    }

    /// Total number of times an event of type `E` has been published.
    ///
    /// Independent of listener presence: the counter ticks even when nobody
    /// is subscribed, and unsubscribing never decrements it. Returns 0 for a
    /// type that has never been published.
    #[must_use]
    pub fn publish_count<E: Event>(&self) -> u64 {
        self.lock()
            .counters
            .get(&TypeId::of::<E>())
            .copied()
            .unwrap_or(0)
    }

    /// Number of listeners currently registered for `E`.
    #[must_use]
    pub fn listener_count<E: Event>(&self) -> usize {
        self.lock()
            .registry
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Removes every listener and resets every publish counter.
    ///
    /// Teardown hook for [`Context::shutdown`](crate::Context::shutdown);
    /// also available for a manual full reset. After this call the bus is
    /// indistinguishable from a freshly constructed one.
    pub fn clear_all(&self) {
        let mut inner = self.lock();
        inner.registry.clear();
        inner.counters.clear();

        if self.log_events {
            debug!("all subscriptions cleared");
        }
    }

    /// True if `id` still points at a live listener.
    fn is_registered(&self, id: SubscriptionId) -> bool {
        self.lock()
            .registry
            .get(&id.key())
            .is_some_and(|bucket| bucket.iter().any(|entry| entry.id == id))
    }

    /// Locks the maps, shrugging off poisoning.
    ///
    /// Handlers run with the lock released, so a poisoned lock can only come
    /// from a panic inside the bus's own short critical sections; the maps
    /// stay structurally valid either way.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventBus {
    /// An empty bus with event logging disabled.
    fn default() -> Self {
        Self::new(false)
    }
}

/// Best-effort extraction of a panic payload's message for the fault log.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}
