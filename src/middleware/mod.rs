//! Request middleware / extractors

pub mod auth;

pub use auth::{verify_application_id, VerifiedRequest};
