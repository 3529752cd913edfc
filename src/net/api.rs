//! REST read of the current auth session.
//!
//! Client-side (hydrate): a real HTTP call via `gloo-net` with the browser
//! cache disabled, so every call observes live backend state.
//! Server-side (SSR): a stub error since the session endpoint is only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport, status, and parse failures surface as `Err` to the caller;
//! there is no retry policy here. Each trigger (mount, tab refocus)
//! decides whether to re-invoke.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::net::broadcast::SessionBus;
use crate::net::types::Session;
use crate::util::path::{basename, join_paths};

const SESSION_PATH: &str = "/api/auth/session";

/// Session endpoint under the document's base path.
pub fn session_endpoint() -> String {
    join_paths(&basename(), SESSION_PATH)
}

#[cfg(any(test, feature = "hydrate"))]
fn session_request_failed_message(status: u16) -> String {
    format!("session request failed: {status}")
}

/// Fetch the current session from the backend.
///
/// # Errors
///
/// Returns an error string on transport failure, a non-2xx status, or a
/// malformed response body.
pub async fn fetch_session() -> Result<Session, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&session_endpoint())
            .cache(web_sys::RequestCache::NoStore)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(session_request_failed_message(resp.status()));
        }
        resp.json::<Session>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Fetch the current session and publish it to every subscriber in this
/// browser context, other tabs and the fetching tab alike.
///
/// State updates deliberately flow through the bus rather than being applied
/// directly, so a fetch in any tab refreshes all of them the same way.
///
/// # Errors
///
/// Propagates [`fetch_session`] failures; nothing is published on error.
pub async fn get_session(bus: &dyn SessionBus) -> Result<Session, String> {
    let session = fetch_session().await?;
    bus.publish(&session);
    Ok(session)
}
