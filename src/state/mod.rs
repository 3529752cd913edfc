//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State lives in plain structs provided via Leptos context as `RwSignal`s,
//! so the logic stays testable without a browser.

pub mod session;
