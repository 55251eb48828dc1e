//! Runtime state
//!
//! Built once at startup, shared read-only by all request handlers

pub mod app_state;

pub use app_state::AppState;
