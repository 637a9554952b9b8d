//! End-to-end dispatch scenarios across the public API:
//! context lifecycle, typed routing, handler isolation, and the
//! mode machine as a real producer.

use std::sync::{Arc, Mutex};

use typebus::{Config, Context, ContextError, Event, EventBus, Mode, ModeChanged, ModeMachine};

#[derive(Debug, Clone, Copy, PartialEq)]
struct DamageEvent {
    amount: f32,
    current_health: f32,
    max_health: f32,
}
impl Event for DamageEvent {}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HealEvent {
    amount: f32,
}
impl Event for HealEvent {}

#[test]
fn damage_event_round_trip() {
    let bus = EventBus::new(false);
    let received = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&received);
    bus.subscribe(move |e: &DamageEvent| sink.lock().unwrap().push(*e));

    bus.publish(DamageEvent {
        amount: 10.0,
        current_health: 20.0,
        max_health: 50.0,
    });

    let seen = received.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].amount, 10.0);
    assert_eq!(seen[0].current_health, 20.0);
    assert_eq!(seen[0].max_health, 50.0);
    assert_eq!(bus.publish_count::<DamageEvent>(), 1);
}

#[test]
fn distinct_event_types_do_not_interfere() {
    let bus = EventBus::new(false);
    let damage_hits = Arc::new(Mutex::new(0u32));
    let heal_hits = Arc::new(Mutex::new(0u32));

    let d = Arc::clone(&damage_hits);
    bus.subscribe(move |_: &DamageEvent| *d.lock().unwrap() += 1);
    let h = Arc::clone(&heal_hits);
    bus.subscribe(move |_: &HealEvent| *h.lock().unwrap() += 1);

    bus.publish(DamageEvent {
        amount: 5.0,
        current_health: 45.0,
        max_health: 50.0,
    });
    bus.publish(HealEvent { amount: 3.0 });
    bus.publish(HealEvent { amount: 2.0 });

    assert_eq!(*damage_hits.lock().unwrap(), 1);
    assert_eq!(*heal_hits.lock().unwrap(), 2);
    assert_eq!(bus.publish_count::<DamageEvent>(), 1);
    assert_eq!(bus.publish_count::<HealEvent>(), 2);
}

#[test]
fn panicking_handler_is_contained_end_to_end() {
    let bus = EventBus::new(false);
    let survivors = Arc::new(Mutex::new(0u32));

    let s = Arc::clone(&survivors);
    bus.subscribe(move |_: &DamageEvent| *s.lock().unwrap() += 1);
    bus.subscribe(|_: &DamageEvent| panic!("handler fault"));
    let s = Arc::clone(&survivors);
    bus.subscribe(move |_: &DamageEvent| *s.lock().unwrap() += 1);

    // Publisher never observes the fault.
    bus.publish(DamageEvent {
        amount: 1.0,
        current_health: 9.0,
        max_health: 10.0,
    });
    assert_eq!(
        *survivors.lock().unwrap(),
        2,
        "both non-faulting handlers must run despite the panic between them"
    );
}

#[test]
fn context_owns_the_bus_lifecycle() {
    let ctx = Context::new(Config::default());
    let bus = ctx.bus().expect("bus available before shutdown");

    let hits = Arc::new(Mutex::new(0u32));
    let h = Arc::clone(&hits);
    bus.subscribe(move |_: &DamageEvent| *h.lock().unwrap() += 1);

    bus.publish(DamageEvent {
        amount: 1.0,
        current_health: 1.0,
        max_health: 1.0,
    });
    assert_eq!(*hits.lock().unwrap(), 1);

    ctx.shutdown();
    assert_eq!(ctx.bus().unwrap_err(), ContextError::Unavailable);

    // A handle taken before shutdown points at a cleared bus: publishing
    // still counts from zero but reaches nobody.
    bus.publish(DamageEvent {
        amount: 1.0,
        current_health: 1.0,
        max_health: 1.0,
    });
    assert_eq!(*hits.lock().unwrap(), 1);
    assert_eq!(bus.publish_count::<DamageEvent>(), 1);
}

#[test]
fn mode_machine_announces_transitions_on_the_bus() {
    let ctx = Context::new(Config::default());
    let bus = ctx.bus().unwrap();

    let transitions = Arc::new(Mutex::new(Vec::new()));
    let t = Arc::clone(&transitions);
    bus.subscribe(move |e: &ModeChanged| t.lock().unwrap().push((e.from, e.to)));

    let mut machine = ModeMachine::new(Arc::clone(&bus), ctx.config());
    machine.change_to(Mode::Loading);
    machine.change_to(Mode::Playing);
    machine.change_to(Mode::Playing); // silent no-op
    machine.change_to(Mode::Victory);

    assert_eq!(
        *transitions.lock().unwrap(),
        vec![
            (Mode::Menu, Mode::Loading),
            (Mode::Loading, Mode::Playing),
            (Mode::Playing, Mode::Victory),
        ]
    );
    assert_eq!(bus.publish_count::<ModeChanged>(), 3);
}

#[test]
fn event_logging_is_a_side_channel_only() {
    // Capture the trace lines so the logging path actually executes.
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    // Same scenario on a quiet bus and a logging bus: subscribe two handlers,
    // one panicking, publish with and without listeners, detach one handler.
    let run = |log_events: bool| -> (Vec<f32>, u64, u64, usize) {
        let bus = EventBus::new(log_events);
        let received = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&received);
        bus.subscribe(move |e: &HealEvent| sink.lock().unwrap().push(e.amount));
        let panicker = bus.subscribe(|_: &HealEvent| panic!("handler fault"));

        bus.publish(DamageEvent {
            amount: 1.0,
            current_health: 9.0,
            max_health: 10.0,
        }); // no subscribers for this type
        bus.publish(HealEvent { amount: 3.0 });
        bus.unsubscribe(panicker);
        bus.publish(HealEvent { amount: 4.0 });

        let seen = received.lock().unwrap().clone();
        (
            seen,
            bus.publish_count::<HealEvent>(),
            bus.publish_count::<DamageEvent>(),
            bus.listener_count::<HealEvent>(),
        )
    };

    assert_eq!(
        run(false),
        run(true),
        "the log_events flag must never change dispatch outcome"
    );
}

#[test]
fn handler_resubscription_across_publishes() {
    // A handler that detaches itself and a fresh one taking its place is the
    // common "one-shot listener" pattern; make sure the bookkeeping holds up.
    let bus = Arc::new(EventBus::new(false));
    let hits = Arc::new(Mutex::new(0u32));

    let slot = Arc::new(Mutex::new(None));
    let bus2 = Arc::clone(&bus);
    let slot2 = Arc::clone(&slot);
    let h = Arc::clone(&hits);
    let id = bus.subscribe(move |_: &HealEvent| {
        *h.lock().unwrap() += 1;
        if let Some(own) = slot2.lock().unwrap().take() {
            bus2.unsubscribe(own);
        }
    });
    *slot.lock().unwrap() = Some(id);

    bus.publish(HealEvent { amount: 1.0 });
    bus.publish(HealEvent { amount: 1.0 });
    assert_eq!(*hits.lock().unwrap(), 1, "one-shot handler fired once");
    assert_eq!(bus.listener_count::<HealEvent>(), 0);

    let h = Arc::clone(&hits);
    bus.subscribe(move |_: &HealEvent| *h.lock().unwrap() += 1);
    bus.publish(HealEvent { amount: 1.0 });
    assert_eq!(*hits.lock().unwrap(), 2);
    assert_eq!(bus.publish_count::<HealEvent>(), 3);
}
