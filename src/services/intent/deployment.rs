//! Deployment intent
//!
//! Resolves the spoken project name, runs the project's deploy script and
//! answers with a localized success or failure message. A missing project
//! or a failing script is a normal outcome reported to the user; only a
//! broken message catalog is returned as an error.

use std::path::Path;
use tracing::{error, info, warn};

use crate::config::env::constants::{CULTURE_ENGLISH, CULTURE_GERMAN};
use crate::config::{AppConfig, EnvConfig, GlobalParameters};
use crate::domain::{DeploymentResult, Request, Response};
use crate::infra::CommandRunner;
use crate::services::localization::{Localization, LocalizationCatalog};
use crate::services::matcher::ProjectResolver;

use super::IntentError;

pub const DEPLOYMENT_SUCCEEDED: &str = "deployment_of_%s_succeeded";
pub const DEPLOYMENT_FAILED: &str = "deployment_of_%s_failed";

/// Card title of every deployment response
pub const CARD_TITLE: &str = "Deploy";

/// Handles deployment intent requests
#[derive(Debug)]
pub struct DeploymentHandler {
    resolver: ProjectResolver,
    global_parameters: GlobalParameters,
    runner: CommandRunner,
    catalog: LocalizationCatalog,
}

impl DeploymentHandler {
    pub const NAME: &'static str = "Deployment";

    pub fn new(
        resolver: ProjectResolver,
        global_parameters: GlobalParameters,
        runner: CommandRunner,
        catalog: LocalizationCatalog,
    ) -> Self {
        Self {
            resolver,
            global_parameters,
            runner,
            catalog,
        }
    }

    pub fn from_config(config: &AppConfig, env: &EnvConfig) -> Self {
        let runner = CommandRunner::new(env.shell.clone())
            .with_script_dir(env.script_dir.clone())
            .with_timeout(env.script_timeout);

        Self::new(
            ProjectResolver::new(config.projects.clone()),
            config.parameters.clone(),
            runner,
            deployment_localizations(&env.default_culture),
        )
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Deploy the project matching `project_name`
    pub async fn deploy(&self, project_name: &str) -> DeploymentResult {
        let project = match self.resolver.resolve(project_name) {
            Ok(project) => project,
            Err(e) => {
                warn!(project = %project_name, error = %e, "Deployment target not found");
                return DeploymentResult::failed(project_name);
            }
        };

        info!(
            project = %project.name,
            requested = %project_name,
            parameters = project.parameters.len(),
            "Starting deployment"
        );

        let env = project.environment(&self.global_parameters);
        let work_dir = project.work_dir.as_deref().map(Path::new);

        match self.runner.run_script(&project.deploy, &env, work_dir).await {
            Ok(()) => {
                info!(project = %project.name, "Deployment finished successfully");
                DeploymentResult::succeeded(project_name)
            }
            Err(e) => {
                error!(project = %project.name, error = %e, "Deployment failed");
                DeploymentResult::failed(project_name)
            }
        }
    }

    /// Execute the deployment intent
    pub async fn handle(&self, request: &Request) -> Result<Response, IntentError> {
        let culture = request.locale.as_str();
        let result = self.deploy(&request.slot_value).await;

        let key = if result.is_success() {
            DEPLOYMENT_SUCCEEDED
        } else {
            DEPLOYMENT_FAILED
        };

        let text = self
            .catalog
            .localize(key, culture, &[&result.project])
            .map_err(|e| {
                error!(key = %key, culture = %culture, error = %e, "Localization failed");
                e
            })?;

        Ok(Response::speech(CARD_TITLE, text))
    }
}

/// Messages used by the deployment handler
///
/// `default_culture` only selects the fallback for cultures without a
/// template of their own.
pub fn deployment_localizations(default_culture: &str) -> LocalizationCatalog {
    LocalizationCatalog::builder(default_culture)
        .entry(
            Localization::new(DEPLOYMENT_SUCCEEDED, CULTURE_ENGLISH, "The deployment of %s has finished")
                .with(CULTURE_GERMAN, "Das Deployment von %s wurde abgeschlossen"),
        )
        .entry(
            Localization::new(DEPLOYMENT_FAILED, CULTURE_ENGLISH, "The deployment of %s failed")
                .with(CULTURE_GERMAN, "Das Deployment von %s ist fehlgeschlagen"),
        )
        .build()
}
