//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session_provider` owns the session context for the subtree it wraps;
//! the remaining components are consumers reading that context.

pub mod session_badge;
pub mod session_provider;
