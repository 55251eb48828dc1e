//! Service layer
//!
//! Core business logic: name matching, localization and intent handling

pub mod intent;
pub mod localization;
pub mod matcher;

pub use intent::{IntentError, IntentHandler, IntentHandlerRegistry};
pub use localization::{Localization, LocalizationCatalog, LocalizationError};
pub use matcher::{normalize_project_name, MatchError, ProjectResolver};
