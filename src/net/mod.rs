//! Networking modules for the session endpoint and cross-tab broadcast.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the REST read of the current session, `broadcast` carries
//! session updates between same-origin browser contexts, and `types` defines
//! the shared wire schema.

pub mod api;
pub mod broadcast;
pub mod types;
