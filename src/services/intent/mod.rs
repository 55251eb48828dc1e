//! Intent handlers
//!
//! Every supported intent is one variant of [`IntentHandler`]; the
//! registry maps intent names to handlers and is read-only after startup.

pub mod deployment;

use std::collections::HashMap;
use thiserror::Error;

use crate::config::{AppConfig, EnvConfig};
use crate::domain::{Request, Response};
use crate::services::localization::LocalizationError;

pub use deployment::DeploymentHandler;

/// Intent handling errors
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("Handler {0:?} is unknown")]
    UnknownIntent(String),

    /// The message catalog cannot produce a response text
    #[error("Localization failed: {0}")]
    Localization(#[from] LocalizationError),
}

/// Supported intent operations
#[derive(Debug)]
pub enum IntentHandler {
    Deployment(DeploymentHandler),
}

impl IntentHandler {
    /// Intent name this handler answers to
    pub fn name(&self) -> &'static str {
        match self {
            IntentHandler::Deployment(handler) => handler.name(),
        }
    }

    /// Execute the intent with the given request
    pub async fn handle(&self, request: &Request) -> Result<Response, IntentError> {
        match self {
            IntentHandler::Deployment(handler) => handler.handle(request).await,
        }
    }
}

impl From<DeploymentHandler> for IntentHandler {
    fn from(handler: DeploymentHandler) -> Self {
        IntentHandler::Deployment(handler)
    }
}

/// Intent name -> handler
#[derive(Debug, Default)]
pub struct IntentHandlerRegistry {
    handlers: HashMap<String, IntentHandler>,
}

impl IntentHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry with every handler the configuration supports
    pub fn from_config(config: &AppConfig, env: &EnvConfig) -> Self {
        let mut registry = Self::new();

        // deployment
        registry.register(DeploymentHandler::from_config(config, env));

        registry
    }

    /// Register a handler under its own name, returning the one it replaces
    pub fn register(&mut self, handler: impl Into<IntentHandler>) -> Option<IntentHandler> {
        let handler = handler.into();
        let name = handler.name();
        let replaced = self.handlers.insert(name.to_string(), handler);
        if replaced.is_some() {
            tracing::warn!(intent = %name, "Intent handler registered twice, keeping the latest");
        }
        replaced
    }

    /// Handler matching the given intent name
    pub fn get(&self, intent_name: &str) -> Result<&IntentHandler, IntentError> {
        self.handlers
            .get(intent_name)
            .ok_or_else(|| IntentError::UnknownIntent(intent_name.to_string()))
    }

    /// Registered intent names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
