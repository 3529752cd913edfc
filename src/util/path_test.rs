use super::*;

// =============================================================
// join_paths
// =============================================================

#[test]
fn join_paths_inserts_single_separator() {
    assert_eq!(join_paths("/dash", "api/auth/session"), "/dash/api/auth/session");
}

#[test]
fn join_paths_collapses_duplicate_slashes() {
    assert_eq!(join_paths("/dash/", "/api/auth/session"), "/dash/api/auth/session");
}

#[test]
fn join_paths_with_root_base() {
    assert_eq!(join_paths("/", "/api/auth/session"), "/api/auth/session");
}

// =============================================================
// basename_from_href
// =============================================================

#[test]
fn basename_defaults_to_root() {
    assert_eq!(basename_from_href(None), "/");
}

#[test]
fn basename_keeps_rooted_path() {
    assert_eq!(basename_from_href(Some("/sub/")), "/sub");
}

#[test]
fn basename_strips_origin_from_absolute_href() {
    assert_eq!(basename_from_href(Some("https://example.com/sub/")), "/sub");
}

#[test]
fn basename_of_origin_only_href_is_root() {
    assert_eq!(basename_from_href(Some("https://example.com")), "/");
}

#[test]
fn basename_of_root_href_is_root() {
    assert_eq!(basename_from_href(Some("/")), "/");
}
