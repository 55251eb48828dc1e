//! Domain models
//!
//! Plain data structures, independent of axum/tokio

pub mod deploy;
pub mod intent;

// Re-exports for convenience
pub use deploy::{DeployStatus, DeploymentResult};
pub use intent::{Request, Response, ServiceRequest, ServiceResponse};
