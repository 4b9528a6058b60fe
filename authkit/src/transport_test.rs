use super::*;
use crate::event::AuthEventType;

fn recorder() -> (Inbound, Rc<RefCell<Vec<AuthEvent>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let inbound: Inbound = Rc::new(move |event| sink.borrow_mut().push(event));
    (inbound, seen)
}

#[test]
fn memory_hub_post_skips_sender() {
    let hub = MemoryHub::new();
    let (a_in, a_seen) = recorder();
    let (b_in, b_seen) = recorder();
    let a = hub.connector().open(a_in).expect("open a");
    let _b = hub.connector().open(b_in).expect("open b");

    a.post(&AuthEvent::new(AuthEventType::Login, 1));

    assert!(a_seen.borrow().is_empty());
    assert_eq!(b_seen.borrow().len(), 1);
    assert_eq!(b_seen.borrow()[0].kind, AuthEventType::Login);
    assert_eq!(hub.posted_count(), 1);
}

#[test]
fn memory_transport_close_leaves_hub() {
    let hub = MemoryHub::new();
    let (inbound, _) = recorder();
    let mut transport = hub.connector().open(inbound).expect("open");
    assert_eq!(hub.member_count(), 1);
    transport.close();
    assert_eq!(hub.member_count(), 0);
    // Idempotent.
    transport.close();
    assert_eq!(hub.member_count(), 0);
}

#[test]
fn memory_transport_drop_leaves_hub() {
    let hub = MemoryHub::new();
    let (inbound, _) = recorder();
    let transport = hub.connector().open(inbound).expect("open");
    drop(transport);
    assert_eq!(hub.member_count(), 0);
}

#[test]
fn closed_transport_does_not_post() {
    let hub = MemoryHub::new();
    let (a_in, _) = recorder();
    let (b_in, b_seen) = recorder();
    let mut a = hub.connector().open(a_in).expect("open a");
    let _b = hub.connector().open(b_in).expect("open b");
    a.close();
    a.post(&AuthEvent::new(AuthEventType::Logout, 1));
    assert!(b_seen.borrow().is_empty());
}

#[test]
fn inject_drops_malformed_payloads() {
    let hub = MemoryHub::new();
    let (inbound, seen) = recorder();
    let _t = hub.connector().open(inbound).expect("open");
    hub.inject("{broken");
    hub.inject(r#"{"type":"logout","timestamp":9}"#);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].timestamp, 9);
}

#[test]
fn transport_error_messages_name_the_mechanism() {
    assert_eq!(
        TransportError::Unsupported("BroadcastChannel").to_string(),
        "BroadcastChannel is not supported in this environment"
    );
    let err = TransportError::Open { name: "storage", reason: "denied".to_owned() };
    assert_eq!(err.to_string(), "failed to open storage: denied");
}
