//! Cross-tab session broadcast bus.
//!
//! DESIGN
//! ======
//! One logical stream of "session updated" events, carried between all
//! same-origin browser contexts on a fixed channel name. The bus is an
//! injectable dependency rather than an ambient global so the provider can
//! be exercised against an in-memory implementation.
//!
//! Delivery is at-least-once with no ordering guarantee across publishers;
//! subscribers enforce ordering themselves by comparing snapshot timestamps.
//!
//! A browser `BroadcastChannel` never observes its own posts, so the
//! channel-backed bus keeps a dedicated outbound handle for publishing and
//! opens a fresh inbound handle per subscription. That pairing is what
//! makes a local publish loop back to the publishing tab as well as to
//! every other tab.

#[cfg(test)]
#[path = "broadcast_test.rs"]
mod broadcast_test;

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "hydrate")]
use std::cell::RefCell;

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};

use crate::net::types::Session;

/// Channel name shared by every browser context of the same origin.
pub const SESSION_CHANNEL: &str = "auth/session";

/// Subscriber callback invoked with each received session snapshot.
pub type SessionHandler = Rc<dyn Fn(Session)>;

/// Publish/subscribe bus for session updates in the current browser context.
pub trait SessionBus {
    /// Publish a snapshot to every live subscriber, including subscribers
    /// in the publishing context itself.
    fn publish(&self, session: &Session);

    /// Register a handler for subsequent snapshots. Delivery stops when the
    /// returned [`Subscription`] ends.
    #[must_use]
    fn subscribe(&self, handler: SessionHandler) -> Subscription;

    /// Shut the bus down. Publishes after close are dropped.
    fn close(&self);
}

/// Handle for one bus subscription.
///
/// Ending the subscription (explicitly or by drop) stops delivery
/// immediately; the implementation releases its underlying resources
/// lazily. The handle is `Send + Sync` so it can travel into cleanup
/// callbacks regardless of what the bus itself is made of.
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Subscription {
    fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    fn ended() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stop delivery to this subscription's handler.
    pub fn end(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    /// Whether the handler is still receiving snapshots.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.end();
    }
}

/// In-process bus used by native tests and as the degraded fallback when
/// the browser broadcast primitive is unavailable. Publishes still loop
/// back to local subscribers, so single-tab behavior is preserved.
#[derive(Default)]
pub struct MemoryBus {
    subscribers: std::cell::RefCell<Vec<MemorySubscriber>>,
    closed: std::cell::Cell<bool>,
}

struct MemorySubscriber {
    active: Arc<AtomicBool>,
    handler: SessionHandler,
}

impl SessionBus for MemoryBus {
    fn publish(&self, session: &Session) {
        if self.closed.get() {
            return;
        }
        // Snapshot the live handler list before invoking anything, so a
        // handler that publishes or subscribes re-entrantly cannot observe
        // a held borrow.
        let live: Vec<(Arc<AtomicBool>, SessionHandler)> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|s| s.active.load(Ordering::Relaxed));
            subscribers
                .iter()
                .map(|s| (Arc::clone(&s.active), Rc::clone(&s.handler)))
                .collect()
        };
        for (active, handler) in live {
            if active.load(Ordering::Relaxed) {
                handler(session.clone());
            }
        }
    }

    fn subscribe(&self, handler: SessionHandler) -> Subscription {
        if self.closed.get() {
            return Subscription::ended();
        }
        let subscription = Subscription::new();
        self.subscribers.borrow_mut().push(MemorySubscriber {
            active: Arc::clone(&subscription.active),
            handler,
        });
        subscription
    }

    fn close(&self) {
        self.closed.set(true);
        self.subscribers.borrow_mut().clear();
    }
}

/// Bus backed by the browser `BroadcastChannel` API.
///
/// Payloads travel as JSON strings; non-string or malformed payloads are
/// logged and dropped. Ended subscriptions close their inbound channel on
/// the next delivery rather than eagerly.
#[cfg(feature = "hydrate")]
pub struct BroadcastChannelBus {
    name: String,
    outbound: web_sys::BroadcastChannel,
}

#[cfg(feature = "hydrate")]
impl BroadcastChannelBus {
    /// Open the bus on a named channel.
    ///
    /// # Errors
    ///
    /// Returns an error string when the browser refuses to create the
    /// channel (e.g. an opaque origin).
    pub fn open(name: &str) -> Result<Self, String> {
        let outbound = web_sys::BroadcastChannel::new(name)
            .map_err(|_| format!("broadcast channel {name:?} unavailable"))?;
        Ok(Self {
            name: name.to_owned(),
            outbound,
        })
    }
}

#[cfg(feature = "hydrate")]
impl SessionBus for BroadcastChannelBus {
    fn publish(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(json) => {
                if self.outbound.post_message(&JsValue::from_str(&json)).is_err() {
                    leptos::logging::warn!("session broadcast: publish failed (channel closed?)");
                }
            }
            Err(e) => leptos::logging::warn!("session broadcast: encode failed: {e}"),
        }
    }

    fn subscribe(&self, handler: SessionHandler) -> Subscription {
        let Ok(inbound) = web_sys::BroadcastChannel::new(&self.name) else {
            leptos::logging::warn!("session broadcast: subscribe failed on {:?}", self.name);
            return Subscription::ended();
        };

        let subscription = Subscription::new();
        let active = Arc::clone(&subscription.active);

        // The closure owns itself through the holder and tears the channel
        // down on the first delivery after the subscription ends.
        let holder: Rc<RefCell<Option<Closure<dyn FnMut(web_sys::MessageEvent)>>>> =
            Rc::new(RefCell::new(None));
        let holder_cb = Rc::clone(&holder);
        let inbound_cb = inbound.clone();
        let cb = Closure::wrap(Box::new(move |ev: web_sys::MessageEvent| {
            if !active.load(Ordering::Relaxed) {
                inbound_cb.set_onmessage(None);
                inbound_cb.close();
                holder_cb.borrow_mut().take();
                return;
            }
            let Some(raw) = ev.data().as_string() else {
                leptos::logging::warn!("session broadcast: non-string payload dropped");
                return;
            };
            match serde_json::from_str::<Session>(&raw) {
                Ok(session) => handler(session),
                Err(e) => leptos::logging::warn!("session broadcast: malformed payload: {e}"),
            }
        }) as Box<dyn FnMut(web_sys::MessageEvent)>);

        inbound.set_onmessage(Some(cb.as_ref().unchecked_ref()));
        *holder.borrow_mut() = Some(cb);

        subscription
    }

    fn close(&self) {
        self.outbound.close();
    }
}
