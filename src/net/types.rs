//! Wire DTOs for the auth/session boundary.
//!
//! DESIGN
//! ======
//! Timestamps are epoch milliseconds everywhere in the client. The backend
//! may report the snapshot time as either a number or an RFC 3339 string;
//! a custom deserializer normalizes both, and serialization always emits
//! the numeric form so re-broadcast payloads round-trip losslessly.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A point-in-time snapshot of the authenticated session.
///
/// Sessions are immutable values: a fresh fetch produces a new snapshot
/// rather than mutating the old one. Snapshots are totally ordered by
/// [`Session::timestamp_ms`] within a browser context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// How authentication is being performed (e.g. `"auto"`, `"basic"`,
    /// `"token"`).
    pub auth_mode: String,
    /// Authenticated principal, or `None` when unauthenticated.
    #[serde(default)]
    pub user: Option<String>,
    /// Optional human-readable status or error from the backend.
    #[serde(default)]
    pub message: Option<String>,
    /// When the backend produced this snapshot, as epoch milliseconds.
    #[serde(rename = "timestamp", deserialize_with = "deserialize_timestamp_ms")]
    pub timestamp_ms: i64,
}

impl Session {
    /// Synthesize the fixed always-authenticated session used by desktop
    /// deployments, where auth is implicitly trusted and no backend session
    /// endpoint exists.
    pub fn auto(timestamp_ms: i64) -> Self {
        Self {
            auth_mode: "auto".to_owned(),
            user: Some("auto".to_owned()),
            message: None,
            timestamp_ms,
        }
    }
}

fn deserialize_timestamp_ms<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected epoch milliseconds"))
        }
        serde_json::Value::String(text) => chrono::DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.timestamp_millis())
            .map_err(|e| D::Error::custom(format!("unparseable timestamp {text:?}: {e}"))),
        _ => Err(D::Error::custom("expected number or RFC 3339 string")),
    }
}
