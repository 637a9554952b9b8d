//! # Type-erased listener adapters.
//!
//! The bus stores handlers for many different payload types in one registry,
//! so each typed callback is wrapped in a [`Listener`] adapter that remembers
//! which concrete type it expects and downcasts before invoking.
//!
//! ## Rules
//! - An adapter only fires when the incoming value's type matches its own
//!   expected type; a mismatched value is silently ignored.
//! - Adapters are identified by a [`SubscriptionId`] handed out at subscribe
//!   time; removal goes through the id, never through callback comparison.
//! - The adapter owns the callback. Dropping the adapter drops the callback.

use std::any::{Any, TypeId, type_name};
use std::sync::atomic::{AtomicU64, Ordering};

use super::event::Event;

/// Global sequence counter for subscription ids.
static SUBSCRIPTION_SEQ: AtomicU64 = AtomicU64::new(0);

/// Opaque handle identifying one registered listener.
///
/// Returned by [`EventBus::subscribe`](crate::EventBus::subscribe) and
/// consumed by [`EventBus::unsubscribe`](crate::EventBus::unsubscribe).
/// The handle is `Copy`; keeping it after unsubscribing is harmless
/// (a second unsubscribe with the same id is a no-op).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    key: TypeId,
    seq: u64,
}

impl SubscriptionId {
    /// Mints a fresh id bound to the event type `E`.
    pub(crate) fn next<E: Event>() -> Self {
        Self {
            key: TypeId::of::<E>(),
            seq: SUBSCRIPTION_SEQ.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// The event type key this subscription belongs to.
    pub(crate) fn key(&self) -> TypeId {
        self.key
    }
}

/// Uniformly storable listener: one "attempt to handle this value" operation.
pub(crate) trait Listener: Send + Sync {
    /// Human-readable name of the expected event type, for log lines.
    fn event_name(&self) -> &'static str;

    /// Invokes the wrapped callback if `event` is of the expected type.
    fn handle(&self, event: &dyn Any);
}

/// Adapter binding a typed `Fn(&E)` callback into the erased [`Listener`] shape.
pub(crate) struct TypedListener<E: Event> {
    callback: Box<dyn Fn(&E) + Send + Sync>,
}

impl<E: Event> TypedListener<E> {
    pub(crate) fn new(callback: impl Fn(&E) + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl<E: Event> Listener for TypedListener<E> {
    fn event_name(&self) -> &'static str {
        type_name::<E>()
    }

    fn handle(&self, event: &dyn Any) {
        // Type guard: a mismatched payload is ignored rather than an error.
        if let Some(event) = event.downcast_ref::<E>() {
            (self.callback)(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct Ping(u32);
    impl Event for Ping {}

    #[derive(Debug)]
    struct Pong;
    impl Event for Pong {}

    #[test]
    fn test_ids_are_unique() {
        let a = SubscriptionId::next::<Ping>();
        let b = SubscriptionId::next::<Ping>();
        assert_ne!(a, b, "two subscriptions must never share an id");
    }

    #[test]
    fn test_ids_carry_their_event_type() {
        let a = SubscriptionId::next::<Ping>();
        let b = SubscriptionId::next::<Pong>();
        assert_eq!(a.key(), TypeId::of::<Ping>());
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_adapter_invokes_on_matching_type() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener = TypedListener::new(move |e: &Ping| sink.lock().unwrap().push(e.0));

        listener.handle(&Ping(7) as &dyn Any);
        assert_eq!(*seen.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_adapter_ignores_mismatched_type() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener = TypedListener::new(move |e: &Ping| sink.lock().unwrap().push(e.0));

        listener.handle(&Pong as &dyn Any);
        assert!(
            seen.lock().unwrap().is_empty(),
            "adapter must not fire for a foreign payload type"
        );
    }

    #[test]
    fn test_adapter_reports_event_name() {
        let listener = TypedListener::new(|_: &Ping| {});
        assert!(listener.event_name().ends_with("Ping"));
    }
}
