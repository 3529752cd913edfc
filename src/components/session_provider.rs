//! Session provider — strategy dispatch and cross-tab synchronization.
//!
//! DESIGN
//! ======
//! The provider picks a [`SessionStrategy`] once at mount from the deployment
//! environment. Desktop applies one synthesized session and is done. Cluster
//! subscribes to the session bus, fetches once on mount, and fetches again
//! whenever the tab becomes visible after being hidden.
//!
//! A fetch never writes state directly: the fresh snapshot is published on
//! the bus and loops back through the same subscription that serves other
//! tabs, so every tab applies updates through one code path. Stale snapshots
//! are discarded by the timestamp guard in `SessionState::apply`.
//!
//! All refresh triggers funnel through a single in-flight gate, so a mount
//! racing a visibility event costs one network call, not two.
//!
//! ERROR HANDLING
//! ==============
//! A failed refresh is logged and leaves state untouched; consumers keep
//! seeing the loading state until a later trigger succeeds. No error UI is
//! built here.

use std::rc::Rc;

use leptos::prelude::*;

use crate::config::AppEnvironment;
use crate::net::broadcast::SessionBus;
use crate::state::session::{SessionState, SessionStrategy};
use crate::util::time::now_ms;

#[cfg(feature = "hydrate")]
use std::cell::RefCell;
#[cfg(feature = "hydrate")]
use std::sync::Arc;
#[cfg(feature = "hydrate")]
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, closure::Closure};

#[cfg(feature = "hydrate")]
use crate::net::broadcast::{BroadcastChannelBus, MemoryBus, SESSION_CHANNEL};
#[cfg(feature = "hydrate")]
use crate::net::types::Session;

/// Provide the session context for a UI subtree.
///
/// Environment and bus default to the detected deployment and the platform
/// broadcast channel; both can be injected for embedding and tests. The
/// outbound side of a provider-owned bus stays open for the page lifetime:
/// an in-flight fetch finishing after unmount may still publish, and the
/// ended subscription discards the loop-back.
#[component]
pub fn SessionProvider(
    /// Deployment environment override; detected from the document when absent.
    #[prop(optional)]
    environment: Option<AppEnvironment>,
    /// Session bus override; the platform broadcast channel when absent.
    #[prop(optional)]
    bus: Option<Rc<dyn SessionBus>>,
    children: Children,
) -> impl IntoView {
    let environment = environment.unwrap_or_else(AppEnvironment::detect);
    let strategy = SessionStrategy::for_environment(environment);

    let state = RwSignal::new(SessionState::default());
    provide_context(state);

    if let Some(session) = strategy.initial_session(now_ms()) {
        state.update(|s| {
            let _ = s.apply(session);
        });
    }

    if strategy.synchronizes() {
        // Network and broadcast are browser concerns; a server render stays
        // in the loading state and the hydrated client takes over.
        #[cfg(feature = "hydrate")]
        wire_cluster(state, bus);
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = bus;

    children()
}

/// Subscribe to session updates and install the refresh triggers.
#[cfg(feature = "hydrate")]
fn wire_cluster(state: RwSignal<SessionState>, bus: Option<Rc<dyn SessionBus>>) {
    let bus: Rc<dyn SessionBus> = bus.unwrap_or_else(platform_bus);
    let alive = Arc::new(AtomicBool::new(true));

    // Apply broadcast snapshots; anything not strictly newer is discarded.
    let alive_rx = Arc::clone(&alive);
    let subscription = bus.subscribe(Rc::new(move |incoming: Session| {
        if !alive_rx.load(Ordering::Relaxed) {
            return;
        }
        state.update(|s| {
            if !s.apply(incoming) {
                leptos::logging::log!("session update discarded: older than current snapshot");
            }
        });
    }));

    let in_flight = RwSignal::new(false);

    // Initial fetch on mount.
    refresh_session(&bus, in_flight);

    // Fetch again when the tab regains visibility after inactivity.
    install_visibility_refresh(Rc::clone(&bus), in_flight, Arc::clone(&alive));

    on_cleanup(move || {
        alive.store(false, Ordering::Relaxed);
        subscription.end();
    });
}

/// Platform bus, falling back to a tab-local bus when the broadcast
/// primitive is unavailable so fetches still reach local subscribers.
#[cfg(feature = "hydrate")]
fn platform_bus() -> Rc<dyn SessionBus> {
    match BroadcastChannelBus::open(SESSION_CHANNEL) {
        Ok(bus) => Rc::new(bus),
        Err(err) => {
            leptos::logging::warn!("session broadcast unavailable: {err}; updates stay tab-local");
            Rc::new(MemoryBus::default())
        }
    }
}

/// Fetch the session and publish it, unless a fetch is already in flight.
#[cfg(feature = "hydrate")]
fn refresh_session(bus: &Rc<dyn SessionBus>, in_flight: RwSignal<bool>) {
    if in_flight.get_untracked() {
        return;
    }
    in_flight.set(true);

    let bus = Rc::clone(bus);
    leptos::task::spawn_local(async move {
        if let Err(err) = crate::net::api::get_session(bus.as_ref()).await {
            leptos::logging::warn!("session refresh failed: {err}");
        }
        // The provider may have unmounted while the fetch was in flight.
        let _ = in_flight.try_set(false);
    });
}

/// Listen for `visibilitychange` and refresh on the hidden -> visible edge.
///
/// The listener checks the alive flag instead of being torn down in
/// `on_cleanup` (browser handles are not `Send`); it detaches itself on the
/// first event after the provider unmounts.
#[cfg(feature = "hydrate")]
fn install_visibility_refresh(bus: Rc<dyn SessionBus>, in_flight: RwSignal<bool>, alive: Arc<AtomicBool>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    let holder: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let holder_cb = Rc::clone(&holder);
    let document_cb = document.clone();
    let cb = Closure::wrap(Box::new(move || {
        if !alive.load(Ordering::Relaxed) {
            if let Some(cb) = holder_cb.borrow_mut().take() {
                let _ = document_cb
                    .remove_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref());
            }
            return;
        }
        if document_cb.visibility_state() == web_sys::VisibilityState::Visible {
            refresh_session(&bus, in_flight);
        }
    }) as Box<dyn FnMut()>);

    if document
        .add_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref())
        .is_ok()
    {
        *holder.borrow_mut() = Some(cb);
    }
}
