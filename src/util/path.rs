//! URL path helpers for deployments served under a sub-path.
//!
//! The dashboard can be mounted behind a reverse proxy at a non-root path;
//! the document's `<base href>` carries that prefix and every API path is
//! joined onto it.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

/// Join a base path and a sub-path with exactly one separator.
pub fn join_paths(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if base.is_empty() {
        format!("/{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Read the path prefix from the document's `<base>` element.
///
/// Returns `"/"` when no base element is present or on the server.
pub fn basename() -> String {
    #[cfg(feature = "hydrate")]
    {
        let href = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector("base").ok().flatten())
            .and_then(|el| el.get_attribute("href"));
        basename_from_href(href.as_deref())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        basename_from_href(None)
    }
}

/// Extract the path portion of a `<base href>` value.
///
/// The href may be a rooted path (`/sub/`) or an absolute URL
/// (`https://host/sub/`); a trailing slash never survives so the result
/// composes with [`join_paths`].
fn basename_from_href(href: Option<&str>) -> String {
    let Some(href) = href else {
        return "/".to_owned();
    };
    let path = if let Some(idx) = href.find("://") {
        match href[idx + 3..].find('/') {
            Some(slash) => &href[idx + 3 + slash..],
            None => "/",
        }
    } else {
        href
    };
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else {
        trimmed.to_owned()
    }
}
