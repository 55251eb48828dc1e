//! Configuration module
//!
//! Environment variables plus the JSON config file

pub mod env;
pub mod file;
pub mod project;

pub use env::EnvConfig;
pub use file::{load_from_file, save_to_file, AppConfig, ConfigError, SkillConfig};
pub use project::{GlobalParameters, ProjectConfig};
