//! Header chrome showing who is signed in and how.

#[cfg(test)]
#[path = "session_badge_test.rs"]
mod session_badge_test;

use leptos::prelude::*;

use crate::net::types::Session;
use crate::state::session::use_session;

/// Compact session indicator for the toolbar.
///
/// Shows the principal and auth mode once a session is established, a
/// placeholder while loading, and surfaces any backend message as a tooltip.
#[component]
pub fn SessionBadge() -> impl IntoView {
    let session = use_session();

    view! {
        <span
            class=move || {
                if session.loading() {
                    "session-badge session-badge--loading"
                } else {
                    "session-badge"
                }
            }
            title=move || session.session().and_then(|s| s.message).unwrap_or_default()
        >
            {move || badge_label(session.session().as_ref())}
        </span>
    }
}

fn badge_label(session: Option<&Session>) -> String {
    match session {
        None => "signing in...".to_owned(),
        Some(session) => match &session.user {
            Some(user) => format!("{user} ({})", session.auth_mode),
            None => format!("anonymous ({})", session.auth_mode),
        },
    }
}
