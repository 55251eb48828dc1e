//! Infrastructure module
//!
//! Wraps external effects (process execution)

pub mod command;

pub use command::{CommandError, CommandRunner, TransientScript};
