//! Application state

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, EnvConfig};
use crate::services::intent::IntentHandlerRegistry;

/// Global shutdown token, cancelled on Ctrl-C
static GLOBAL_SHUTDOWN: std::sync::OnceLock<CancellationToken> = std::sync::OnceLock::new();

/// Get the global shutdown token
pub fn get_shutdown_token() -> CancellationToken {
    GLOBAL_SHUTDOWN
        .get_or_init(CancellationToken::new)
        .clone()
}

/// Trigger global shutdown
pub fn trigger_shutdown() {
    if let Some(token) = GLOBAL_SHUTDOWN.get() {
        token.cancel();
    }
}

/// Application state
pub struct AppState {
    /// Application id every inbound request must carry
    pub skill_id: String,
    /// Environment configuration
    pub config: EnvConfig,
    /// Intent name -> handler
    pub registry: IntentHandlerRegistry,
    /// Configured project names, in config order
    pub project_names: Vec<String>,
    /// Service start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: EnvConfig, app_config: AppConfig) -> Self {
        let registry = IntentHandlerRegistry::from_config(&app_config, &config);

        tracing::info!(
            listen_address = %config.listen_address,
            shell = %config.shell,
            script_timeout = ?config.script_timeout,
            default_culture = %config.default_culture,
            global_parameters = app_config.parameters.len(),
            project_count = app_config.projects.len(),
            intents = ?registry.names(),
            "Loaded configuration"
        );

        for project in &app_config.projects {
            tracing::info!(
                project = %project.name,
                work_dir = ?project.work_dir,
                parameters = project.parameters.len(),
                "Registered project"
            );
        }

        if app_config.skill.app_id.is_empty() {
            tracing::warn!("No skill application id configured, every request will be rejected");
        }

        Self {
            skill_id: app_config.skill.app_id,
            project_names: app_config.projects.iter().map(|p| p.name.clone()).collect(),
            registry,
            config,
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;

    #[test]
    fn test_new_state() {
        let mut app_config = AppConfig::default();
        app_config.skill.app_id = "amzn1.ask.skill.test".to_string();
        app_config.projects.push(ProjectConfig::new("ak7.io", "exit 0"));

        let state = AppState::new(EnvConfig::default(), app_config);

        assert_eq!(state.skill_id, "amzn1.ask.skill.test");
        assert_eq!(state.project_names, vec!["ak7.io"]);
        assert!(state.registry.get("Deployment").is_ok());
    }

    #[test]
    fn test_shutdown_token() {
        let token = get_shutdown_token();
        assert!(!token.is_cancelled());
    }
}
