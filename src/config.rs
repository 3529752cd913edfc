//! Deployment environment configuration.
//!
//! DESIGN
//! ======
//! The deployment injects a `data-environment` attribute on the document
//! element. It is read exactly once, at provider mount, to pick the
//! session-sourcing strategy; nothing else in the client branches on it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Where this client is deployed, which decides how sessions are sourced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppEnvironment {
    /// Local desktop deployment: auth is implicitly trusted, no backend
    /// session endpoint exists.
    Desktop,
    /// In-cluster deployment: sessions come from the backend and are kept
    /// in sync across tabs.
    #[default]
    Cluster,
}

impl AppEnvironment {
    /// Map a `data-environment` attribute value to an environment.
    ///
    /// Only the exact tag `"desktop"` selects [`AppEnvironment::Desktop`];
    /// anything else, including an absent attribute, is a cluster deployment.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("desktop") => Self::Desktop,
            _ => Self::Cluster,
        }
    }

    /// Read the environment from the document element.
    ///
    /// Server renders have no document and report [`AppEnvironment::Cluster`];
    /// desktop deployments do not server-render.
    pub fn detect() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let attr = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.document_element())
                .and_then(|el| el.get_attribute("data-environment"));
            Self::from_attr(attr.as_deref())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::Cluster
        }
    }
}
