use super::*;
use std::cell::RefCell;

fn snapshot(ts_ms: i64) -> Session {
    Session {
        auth_mode: "basic".to_owned(),
        user: Some("alice".to_owned()),
        message: None,
        timestamp_ms: ts_ms,
    }
}

fn recording_handler() -> (SessionHandler, Rc<RefCell<Vec<i64>>>) {
    let received: Rc<RefCell<Vec<i64>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    let handler: SessionHandler = Rc::new(move |session: Session| {
        sink.borrow_mut().push(session.timestamp_ms);
    });
    (handler, received)
}

// =============================================================
// Delivery
// =============================================================

#[test]
fn publish_delivers_to_subscriber() {
    let bus = MemoryBus::default();
    let (handler, received) = recording_handler();
    let _subscription = bus.subscribe(handler);

    bus.publish(&snapshot(1));
    bus.publish(&snapshot(2));

    assert_eq!(*received.borrow(), vec![1, 2]);
}

#[test]
fn publish_delivers_to_every_subscriber() {
    let bus = MemoryBus::default();
    let (first, first_received) = recording_handler();
    let (second, second_received) = recording_handler();
    let _a = bus.subscribe(first);
    let _b = bus.subscribe(second);

    bus.publish(&snapshot(5));

    assert_eq!(*first_received.borrow(), vec![5]);
    assert_eq!(*second_received.borrow(), vec![5]);
}

#[test]
fn publish_loops_back_in_publishing_context() {
    // The provider relies on its own fetch-then-publish reaching the local
    // subscription; the bus must not suppress same-context delivery.
    let bus = MemoryBus::default();
    let (handler, received) = recording_handler();
    let _subscription = bus.subscribe(handler);

    bus.publish(&snapshot(9));

    assert_eq!(*received.borrow(), vec![9]);
}

// =============================================================
// Subscription lifecycle
// =============================================================

#[test]
fn ended_subscription_receives_nothing() {
    let bus = MemoryBus::default();
    let (handler, received) = recording_handler();
    let subscription = bus.subscribe(handler);

    bus.publish(&snapshot(1));
    subscription.end();
    bus.publish(&snapshot(2));

    assert_eq!(*received.borrow(), vec![1]);
}

#[test]
fn dropped_subscription_receives_nothing() {
    let bus = MemoryBus::default();
    let (handler, received) = recording_handler();
    drop(bus.subscribe(handler));

    bus.publish(&snapshot(1));

    assert!(received.borrow().is_empty());
}

#[test]
fn is_active_reflects_end() {
    let bus = MemoryBus::default();
    let (handler, _received) = recording_handler();
    let subscription = bus.subscribe(handler);

    assert!(subscription.is_active());
    subscription.end();
    assert!(!subscription.is_active());
}

// =============================================================
// Close
// =============================================================

#[test]
fn closed_bus_drops_publishes() {
    let bus = MemoryBus::default();
    let (handler, received) = recording_handler();
    let _subscription = bus.subscribe(handler);

    bus.close();
    bus.publish(&snapshot(1));

    assert!(received.borrow().is_empty());
}

#[test]
fn subscribe_after_close_is_inert() {
    let bus = MemoryBus::default();
    bus.close();

    let (handler, _received) = recording_handler();
    let subscription = bus.subscribe(handler);

    assert!(!subscription.is_active());
}
