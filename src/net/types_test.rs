use super::*;
use serde_json::json;

// =============================================================
// Deserialization
// =============================================================

#[test]
fn deserializes_numeric_timestamp() {
    let session: Session = serde_json::from_value(json!({
        "auth_mode": "basic",
        "user": "alice",
        "message": null,
        "timestamp": 1_735_689_600_000_i64,
    }))
    .unwrap();
    assert_eq!(session.auth_mode, "basic");
    assert_eq!(session.user.as_deref(), Some("alice"));
    assert_eq!(session.message, None);
    assert_eq!(session.timestamp_ms, 1_735_689_600_000);
}

#[test]
fn deserializes_rfc3339_timestamp() {
    let session: Session = serde_json::from_value(json!({
        "auth_mode": "basic",
        "user": "alice",
        "message": null,
        "timestamp": "2025-01-01T00:00:00Z",
    }))
    .unwrap();
    assert_eq!(session.timestamp_ms, 1_735_689_600_000);
}

#[test]
fn deserializes_offset_rfc3339_timestamp() {
    let session: Session = serde_json::from_value(json!({
        "auth_mode": "token",
        "user": null,
        "timestamp": "2025-01-01T01:00:00+01:00",
    }))
    .unwrap();
    assert_eq!(session.timestamp_ms, 1_735_689_600_000);
}

#[test]
fn tolerates_missing_optionals() {
    let session: Session = serde_json::from_value(json!({
        "auth_mode": "token",
        "timestamp": 1_i64,
    }))
    .unwrap();
    assert_eq!(session.user, None);
    assert_eq!(session.message, None);
}

#[test]
fn rejects_unparseable_timestamp() {
    let result: Result<Session, _> = serde_json::from_value(json!({
        "auth_mode": "basic",
        "user": "alice",
        "timestamp": "yesterday",
    }));
    assert!(result.is_err());
}

#[test]
fn rejects_fractional_timestamp() {
    let result: Result<Session, _> = serde_json::from_value(json!({
        "auth_mode": "basic",
        "user": "alice",
        "timestamp": 1.5,
    }));
    assert!(result.is_err());
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn serializes_timestamp_as_millis() {
    let session = Session {
        auth_mode: "basic".to_owned(),
        user: Some("alice".to_owned()),
        message: Some("ok".to_owned()),
        timestamp_ms: 42,
    };
    let value = serde_json::to_value(&session).unwrap();
    assert_eq!(value["timestamp"], json!(42));
}

#[test]
fn broadcast_payload_round_trips() {
    let session = Session {
        auth_mode: "basic".to_owned(),
        user: None,
        message: None,
        timestamp_ms: 1_735_689_600_000,
    };
    let json = serde_json::to_string(&session).unwrap();
    let parsed: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, session);
}

// =============================================================
// Desktop session
// =============================================================

#[test]
fn auto_session_shape() {
    let session = Session::auto(7);
    assert_eq!(session.auth_mode, "auto");
    assert_eq!(session.user.as_deref(), Some("auto"));
    assert_eq!(session.message, None);
    assert_eq!(session.timestamp_ms, 7);
}
