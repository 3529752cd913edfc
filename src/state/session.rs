//! Session state, sourcing strategy, and the read hook.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session provider owns an `RwSignal<SessionState>` in context; every
//! update path (initial fetch, cross-tab broadcast, visibility refresh)
//! funnels through [`SessionState::apply`], which is the single place the
//! freshness invariant is enforced.
//!
//! INVARIANT
//! =========
//! The observable session is always the applied snapshot with the greatest
//! timestamp. Broadcast messages can arrive out of order across tabs;
//! anything not strictly newer than the current snapshot is discarded.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use crate::config::AppEnvironment;
use crate::net::types::Session;

/// Latest established session for this browser context.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    /// Most recently applied snapshot; `None` until one is established.
    pub session: Option<Session>,
    /// Timestamp of the applied snapshot, kept separately so the guard
    /// survives even if a consumer swaps `session` out.
    last_applied_ms: Option<i64>,
}

impl SessionState {
    /// True until a first snapshot has been established.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.session.is_none()
    }

    /// Apply a snapshot if it is strictly newer than the last applied one.
    ///
    /// The first snapshot always applies. Returns whether the snapshot was
    /// applied; a `false` means a stale update was discarded.
    pub fn apply(&mut self, incoming: Session) -> bool {
        if let Some(last) = self.last_applied_ms
            && incoming.timestamp_ms <= last
        {
            return false;
        }
        self.last_applied_ms = Some(incoming.timestamp_ms);
        self.session = Some(incoming);
        true
    }
}

/// How a provider sources sessions, fixed once at mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStrategy {
    /// Synthesize one constant always-authenticated session; no network,
    /// no broadcast subscription.
    Desktop,
    /// Fetch from the backend and stay in sync with other tabs.
    Cluster,
}

impl SessionStrategy {
    /// Pick the strategy for a deployment environment.
    #[must_use]
    pub fn for_environment(environment: AppEnvironment) -> Self {
        match environment {
            AppEnvironment::Desktop => Self::Desktop,
            AppEnvironment::Cluster => Self::Cluster,
        }
    }

    /// Session available at mount, before any network activity.
    #[must_use]
    pub fn initial_session(self, now_ms: i64) -> Option<Session> {
        match self {
            Self::Desktop => Some(Session::auto(now_ms)),
            Self::Cluster => None,
        }
    }

    /// Whether this strategy fetches and subscribes to broadcasts.
    #[must_use]
    pub fn synchronizes(self) -> bool {
        matches!(self, Self::Cluster)
    }
}

/// Read handle over the provided session context.
#[derive(Clone, Copy)]
pub struct SessionReader {
    state: RwSignal<SessionState>,
}

impl SessionReader {
    /// True iff no session has been established yet.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.get().loading()
    }

    /// Current session snapshot, `None` while loading.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.state.get().session
    }
}

/// Read the nearest provided session context.
///
/// Pure read with no side effects; reactive when called inside a tracking
/// closure. Panics if no `SessionProvider` wraps the calling component.
#[must_use]
pub fn use_session() -> SessionReader {
    SessionReader {
        state: expect_context::<RwSignal<SessionState>>(),
    }
}
