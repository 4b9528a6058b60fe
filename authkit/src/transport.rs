//! Cross-tab transports for [`AuthEvent`]s.
//!
//! ARCHITECTURE
//! ============
//! A [`Connector`] knows how to open one delivery mechanism; the opened
//! [`Transport`] posts outgoing events and pushes incoming ones into the
//! `Inbound` callback it was given. The bus tries connectors in order and
//! keeps the first one that opens.
//!
//! Browser implementations (BroadcastChannel, `localStorage` + `storage`
//! event) live in the client crate. [`MemoryHub`] is the in-process
//! implementation used by tests and non-browser hosts.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::event::AuthEvent;

/// Callback a transport invokes for every event received from another tab.
pub type Inbound = Rc<dyn Fn(AuthEvent)>;

/// Error returned when a connector cannot open its transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The required browser API does not exist in this environment.
    #[error("{0} is not supported in this environment")]
    Unsupported(&'static str),
    /// The API exists but construction failed.
    #[error("failed to open {name}: {reason}")]
    Open { name: &'static str, reason: String },
}

/// Which delivery mechanism an open transport uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportKind {
    Broadcast,
    Storage,
    Memory,
}

/// An open cross-tab delivery mechanism.
pub trait Transport {
    fn kind(&self) -> TransportKind;

    /// Deliver `event` to other tabs. Must not deliver back to this tab.
    fn post(&self, event: &AuthEvent);

    /// Release the underlying resource. Called once, when the last
    /// listener unsubscribes or the bus is disposed.
    fn close(&mut self);
}

/// Factory for a [`Transport`], tried lazily by the bus.
pub trait Connector {
    fn name(&self) -> &'static str;

    /// Open the transport.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the mechanism is unavailable; the bus
    /// logs it and falls back to the next connector.
    fn open(&self, inbound: Inbound) -> Result<Box<dyn Transport>, TransportError>;
}

// =============================================================================
// MEMORY HUB
// =============================================================================

#[derive(Default)]
struct HubInner {
    members: BTreeMap<u64, Inbound>,
    next_id: u64,
    posted: usize,
}

/// In-process stand-in for a same-origin broadcast medium.
///
/// Every bus connected through the same hub behaves like a separate tab:
/// posts reach every other member and never the sender.
#[derive(Clone, Default)]
pub struct MemoryHub {
    inner: Rc<RefCell<HubInner>>,
}

impl MemoryHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connector that joins this hub when opened.
    #[must_use]
    pub fn connector(&self) -> MemoryConnector {
        MemoryConnector { hub: self.clone() }
    }

    /// Number of currently open transports.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.inner.borrow().members.len()
    }

    /// Total number of events posted through the hub.
    #[must_use]
    pub fn posted_count(&self) -> usize {
        self.inner.borrow().posted
    }

    /// Deliver a raw payload to every member, as a foreign writer would.
    /// Malformed payloads are dropped.
    pub fn inject(&self, raw: &str) {
        let Some(event) = AuthEvent::decode(raw) else {
            return;
        };
        let targets: Vec<Inbound> = self.inner.borrow().members.values().cloned().collect();
        for inbound in targets {
            inbound(event.clone());
        }
    }

    fn join(&self, inbound: Inbound) -> u64 {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.members.insert(id, inbound);
        id
    }

    fn leave(&self, id: u64) {
        self.inner.borrow_mut().members.remove(&id);
    }

    fn broadcast_from(&self, sender: u64, event: &AuthEvent) {
        let targets: Vec<Inbound> = {
            let mut inner = self.inner.borrow_mut();
            inner.posted += 1;
            inner
                .members
                .iter()
                .filter(|(id, _)| **id != sender)
                .map(|(_, inbound)| inbound.clone())
                .collect()
        };
        for inbound in targets {
            inbound(event.clone());
        }
    }
}

/// [`Connector`] for a [`MemoryHub`].
pub struct MemoryConnector {
    hub: MemoryHub,
}

impl Connector for MemoryConnector {
    fn name(&self) -> &'static str {
        "memory-hub"
    }

    fn open(&self, inbound: Inbound) -> Result<Box<dyn Transport>, TransportError> {
        let id = self.hub.join(inbound);
        Ok(Box::new(MemoryTransport { hub: self.hub.clone(), id, open: true }))
    }
}

struct MemoryTransport {
    hub: MemoryHub,
    id: u64,
    open: bool,
}

impl Transport for MemoryTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Memory
    }

    fn post(&self, event: &AuthEvent) {
        if self.open {
            self.hub.broadcast_from(self.id, event);
        }
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.hub.leave(self.id);
        }
    }
}

impl Drop for MemoryTransport {
    fn drop(&mut self) {
        self.close();
    }
}
