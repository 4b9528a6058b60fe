//! Browser transports for the cross-tab auth bus.
//!
//! ARCHITECTURE
//! ============
//! Two [`Connector`]s, tried in this order by `AuthEventBus`:
//!
//! 1. `BroadcastChannel("auth-events")`: posts the JSON-encoded event.
//! 2. `localStorage["auth:event"]` + the `storage` event: writes the encoded
//!    event and removes it again, so every write is a change other tabs see.
//!    The removal produces a `storage` event with no new value, which is
//!    ignored.
//!
//! Neither delivers to the posting tab; the bus notifies local listeners
//! itself. During SSR nothing here is compiled in and the bus is built with
//! `AuthEventBus::unavailable()`.

#[cfg(test)]
#[path = "tab_channel_test.rs"]
mod tab_channel_test;

use authkit::event::AuthEvent;

pub const CHANNEL_NAME: &str = "auth-events";
pub const STORAGE_KEY: &str = "auth:event";

/// Decode a `storage` event: only changes to [`STORAGE_KEY`] that carry a
/// new value are auth events.
#[must_use]
pub fn decode_storage_change(key: Option<&str>, new_value: Option<&str>) -> Option<AuthEvent> {
    if key != Some(STORAGE_KEY) {
        return None;
    }
    AuthEvent::decode(new_value?)
}

#[cfg(feature = "hydrate")]
pub use browser::{BroadcastConnector, StorageConnector, browser_bus};

#[cfg(feature = "hydrate")]
mod browser {
    use authkit::bus::AuthEventBus;
    use authkit::event::AuthEvent;
    use authkit::transport::{Connector, Inbound, Transport, TransportError, TransportKind};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsValue;
    use web_sys::{BroadcastChannel, MessageEvent, Storage, StorageEvent, Window};

    use super::{CHANNEL_NAME, STORAGE_KEY, decode_storage_change};

    /// Bus wired to the browser transports with a `Date.now()` clock.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn browser_bus() -> AuthEventBus {
        if web_sys::window().is_none() {
            return AuthEventBus::unavailable();
        }
        AuthEventBus::new(vec![Box::new(BroadcastConnector), Box::new(StorageConnector)])
            .with_clock(|| js_sys::Date::now() as i64)
    }

    fn open_error(name: &'static str, err: &JsValue) -> TransportError {
        TransportError::Open { name, reason: format!("{err:?}") }
    }

    // =============================================================
    // BroadcastChannel
    // =============================================================

    pub struct BroadcastConnector;

    impl Connector for BroadcastConnector {
        fn name(&self) -> &'static str {
            "broadcast-channel"
        }

        fn open(&self, inbound: Inbound) -> Result<Box<dyn Transport>, TransportError> {
            let supported = js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("BroadcastChannel")).unwrap_or(false);
            if !supported {
                return Err(TransportError::Unsupported("BroadcastChannel"));
            }
            let channel = BroadcastChannel::new(CHANNEL_NAME).map_err(|e| open_error(self.name(), &e))?;

            let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
                let data = ev.data();
                // Older tabs may post the event as a structured object.
                let raw = data.as_string().or_else(|| js_sys::JSON::stringify(&data).ok().and_then(|s| s.as_string()));
                match raw.as_deref().and_then(AuthEvent::decode) {
                    Some(event) => inbound(event),
                    None => log::debug!("dropping malformed auth event from {CHANNEL_NAME}"),
                }
            });
            channel.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

            Ok(Box::new(BroadcastTransport { channel, on_message: Some(on_message) }))
        }
    }

    struct BroadcastTransport {
        channel: BroadcastChannel,
        on_message: Option<Closure<dyn FnMut(MessageEvent)>>,
    }

    impl Transport for BroadcastTransport {
        fn kind(&self) -> TransportKind {
            TransportKind::Broadcast
        }

        fn post(&self, event: &AuthEvent) {
            if let Err(e) = self.channel.post_message(&JsValue::from_str(&event.encode())) {
                log::warn!("auth event post failed on {CHANNEL_NAME}: {e:?}");
            }
        }

        fn close(&mut self) {
            if self.on_message.take().is_some() {
                self.channel.set_onmessage(None);
                self.channel.close();
            }
        }
    }

    impl Drop for BroadcastTransport {
        fn drop(&mut self) {
            self.close();
        }
    }

    // =============================================================
    // localStorage + storage event
    // =============================================================

    pub struct StorageConnector;

    impl Connector for StorageConnector {
        fn name(&self) -> &'static str {
            "local-storage"
        }

        fn open(&self, inbound: Inbound) -> Result<Box<dyn Transport>, TransportError> {
            let window = web_sys::window().ok_or(TransportError::Unsupported("window"))?;
            let storage = match window.local_storage() {
                Ok(Some(storage)) => storage,
                Ok(None) => return Err(TransportError::Unsupported("localStorage")),
                Err(e) => return Err(open_error(self.name(), &e)),
            };

            let on_storage = Closure::<dyn FnMut(StorageEvent)>::new(move |ev: StorageEvent| {
                let key = ev.key();
                let new_value = ev.new_value();
                if let Some(event) = decode_storage_change(key.as_deref(), new_value.as_deref()) {
                    inbound(event);
                } else if key.as_deref() == Some(STORAGE_KEY) && new_value.is_some() {
                    log::debug!("dropping malformed auth event from {STORAGE_KEY}");
                }
            });
            window
                .add_event_listener_with_callback("storage", on_storage.as_ref().unchecked_ref())
                .map_err(|e| open_error(self.name(), &e))?;

            Ok(Box::new(StorageTransport { window, storage, on_storage: Some(on_storage) }))
        }
    }

    struct StorageTransport {
        window: Window,
        storage: Storage,
        on_storage: Option<Closure<dyn FnMut(StorageEvent)>>,
    }

    impl Transport for StorageTransport {
        fn kind(&self) -> TransportKind {
            TransportKind::Storage
        }

        fn post(&self, event: &AuthEvent) {
            if let Err(e) = self.storage.set_item(STORAGE_KEY, &event.encode()) {
                log::warn!("auth event write to {STORAGE_KEY} failed: {e:?}");
                return;
            }
            let _ = self.storage.remove_item(STORAGE_KEY);
        }

        fn close(&mut self) {
            if let Some(listener) = self.on_storage.take() {
                let _ = self.window.remove_event_listener_with_callback("storage", listener.as_ref().unchecked_ref());
            }
        }
    }

    impl Drop for StorageTransport {
        fn drop(&mut self) {
            self.close();
        }
    }
}
