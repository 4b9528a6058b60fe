//! Auth event bus: same-tab listeners plus one shared cross-tab transport.
//!
//! ARCHITECTURE
//! ============
//! One bus exists per tab and is handed to the UI through context. Local
//! listeners are always notified synchronously, before any cross-tab
//! delivery is attempted. The transport is opened lazily when the first
//! listener subscribes and closed when the last one leaves.
//!
//! TRADE-OFFS
//! ==========
//! State is `Rc<RefCell<_>>`: the browser main thread is the only caller,
//! so there is no locking. The registry is never borrowed while listeners
//! run, which lets a listener emit, subscribe, or unsubscribe re-entrantly.

#[cfg(test)]
#[path = "bus_test.rs"]
mod bus_test;

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::{Rc, Weak};

use crate::event::{AuthEvent, AuthEventType};
use crate::transport::{Connector, Inbound, Transport, TransportKind};

type Listener = Rc<dyn Fn(&AuthEvent)>;
type Clock = Rc<dyn Fn() -> i64>;

struct BusInner {
    /// `false` during server rendering: every operation is a no-op.
    available: bool,
    connectors: Vec<Box<dyn Connector>>,
    transport: Option<Box<dyn Transport>>,
    listeners: BTreeMap<u64, Listener>,
    next_listener_id: u64,
    next_seq: u64,
    tab_id: String,
    /// Highest `seq` delivered per remote source.
    last_seen: HashMap<String, u64>,
    clock: Clock,
}

/// Per-tab auth event bus. Cloning yields another handle to the same bus.
#[derive(Clone)]
pub struct AuthEventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl AuthEventBus {
    /// Build a bus that tries `connectors` in order when it needs a transport.
    #[must_use]
    pub fn new(connectors: Vec<Box<dyn Connector>>) -> Self {
        Self::build(true, connectors)
    }

    /// Bus for contexts without a browser (server rendering).
    #[must_use]
    pub fn unavailable() -> Self {
        Self::build(false, Vec::new())
    }

    fn build(available: bool, connectors: Vec<Box<dyn Connector>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BusInner {
                available,
                connectors,
                transport: None,
                listeners: BTreeMap::new(),
                next_listener_id: 0,
                next_seq: 0,
                tab_id: uuid::Uuid::new_v4().to_string(),
                last_seen: HashMap::new(),
                clock: Rc::new(system_clock),
            })),
        }
    }

    /// Replace the timestamp source.
    ///
    /// `std::time::SystemTime` is unavailable on `wasm32-unknown-unknown`;
    /// the browser build passes `js_sys::Date::now` here.
    #[must_use]
    pub fn with_clock(self, clock: impl Fn() -> i64 + 'static) -> Self {
        self.inner.borrow_mut().clock = Rc::new(clock);
        self
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.inner.borrow().available
    }

    /// Random identifier stamped on every event this bus emits.
    #[must_use]
    pub fn tab_id(&self) -> String {
        self.inner.borrow().tab_id.clone()
    }

    /// Kind of the currently open transport, if any.
    #[must_use]
    pub fn transport_kind(&self) -> Option<TransportKind> {
        self.inner.borrow().transport.as_ref().map(|t| t.kind())
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Announce an auth transition to this tab and every other tab.
    pub fn emit(&self, kind: AuthEventType) {
        let (event, listeners) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.available {
                return;
            }
            inner.next_seq += 1;
            let event = AuthEvent {
                kind,
                timestamp: (inner.clock)(),
                source: inner.tab_id.clone(),
                seq: inner.next_seq,
            };
            let listeners: Vec<Listener> = inner.listeners.values().cloned().collect();
            (event, listeners)
        };

        for listener in listeners {
            listener(&event);
        }

        if let Some(transport) = self.inner.borrow().transport.as_ref() {
            transport.post(&event);
            return;
        }
        self.post_once(&event);
    }

    /// Register `listener` for every event seen by this tab, local or remote.
    ///
    /// Outside a browser the returned subscription is inert.
    pub fn subscribe(&self, listener: impl Fn(&AuthEvent) + 'static) -> Subscription {
        let (id, first) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.available {
                return Subscription { bus: Weak::new(), id: None };
            }
            inner.next_listener_id += 1;
            let id = inner.next_listener_id;
            let first = inner.listeners.is_empty();
            inner.listeners.insert(id, Rc::new(listener));
            (id, first)
        };
        if first {
            self.acquire();
        }
        Subscription { bus: Rc::downgrade(&self.inner), id: Some(id) }
    }

    /// Drop every listener and release the transport.
    ///
    /// The bus stays usable: a later `subscribe` acquires a transport again.
    pub fn dispose(&self) {
        let transport = {
            let mut inner = self.inner.borrow_mut();
            inner.listeners.clear();
            inner.transport.take()
        };
        close(transport);
    }

    fn acquire(&self) {
        let connectors = std::mem::take(&mut self.inner.borrow_mut().connectors);
        let weak = Rc::downgrade(&self.inner);
        let inbound: Inbound = Rc::new(move |event| receive(&weak, event));

        let mut opened = None;
        for connector in &connectors {
            match connector.open(inbound.clone()) {
                Ok(transport) => {
                    log::debug!("[auth-events] using {} transport", connector.name());
                    opened = Some(transport);
                    break;
                }
                Err(err) => {
                    log::warn!("[auth-events] {} failed, trying fallback: {err}", connector.name());
                }
            }
        }
        if opened.is_none() && !connectors.is_empty() {
            log::warn!("[auth-events] no cross-tab transport available; events stay in this tab");
        }

        let mut inner = self.inner.borrow_mut();
        inner.connectors = connectors;
        inner.transport = opened;
    }

    /// Deliver one event while no transport is held open.
    fn post_once(&self, event: &AuthEvent) {
        let connectors = std::mem::take(&mut self.inner.borrow_mut().connectors);
        let discard: Inbound = Rc::new(|_| {});
        for connector in &connectors {
            if let Ok(mut transport) = connector.open(discard.clone()) {
                transport.post(event);
                transport.close();
                break;
            }
        }
        self.inner.borrow_mut().connectors = connectors;
    }
}

fn receive(bus: &Weak<RefCell<BusInner>>, event: AuthEvent) {
    let Some(inner) = bus.upgrade() else {
        return;
    };
    let listeners: Vec<Listener> = {
        let mut inner = inner.borrow_mut();
        if !event.source.is_empty() {
            if event.source == inner.tab_id {
                return;
            }
            if event.seq != 0 {
                let last = inner.last_seen.entry(event.source.clone()).or_insert(0);
                if event.seq <= *last {
                    log::debug!("[auth-events] dropping replayed event seq={} from {}", event.seq, event.source);
                    return;
                }
                *last = event.seq;
            }
        }
        inner.listeners.values().cloned().collect()
    };
    for listener in listeners {
        listener(&event);
    }
}

fn close(transport: Option<Box<dyn Transport>>) {
    if let Some(mut transport) = transport {
        transport.close();
    }
}

fn system_clock() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Handle for a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    bus: Weak<RefCell<BusInner>>,
    id: Option<u64>,
}

impl Subscription {
    /// Whether this handle still holds a registered listener.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let Some(id) = self.id else {
            return false;
        };
        let Some(inner) = self.bus.upgrade() else {
            return false;
        };
        let active = inner.borrow().listeners.contains_key(&id);
        active
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        let Some(inner) = self.bus.upgrade() else {
            return;
        };
        let transport = {
            let mut inner = inner.borrow_mut();
            inner.listeners.remove(&id);
            if inner.listeners.is_empty() { inner.transport.take() } else { None }
        };
        close(transport);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}
