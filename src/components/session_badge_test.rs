use super::*;

fn session(user: Option<&str>, auth_mode: &str) -> Session {
    Session {
        auth_mode: auth_mode.to_owned(),
        user: user.map(str::to_owned),
        message: None,
        timestamp_ms: 0,
    }
}

#[test]
fn label_while_loading() {
    assert_eq!(badge_label(None), "signing in...");
}

#[test]
fn label_with_user() {
    assert_eq!(badge_label(Some(&session(Some("alice"), "basic"))), "alice (basic)");
}

#[test]
fn label_without_user() {
    assert_eq!(badge_label(Some(&session(None, "token"))), "anonymous (token)");
}
