//! Config file (JSON) loading and saving

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use super::project::{GlobalParameters, ProjectConfig};

/// Config file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("The config file {0:?} was not found")]
    NotFound(String),

    #[error("Failed to access the config file {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse the config file {path:?}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize the config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Skill registration on the assistant platform
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillConfig {
    /// Application id of the skill, e.g. amzn1.ask.skill.abc12345-1111-dddd-aaaa-aaaabbbb3333
    #[serde(rename = "appID", default)]
    pub app_id: String,
}

/// Static gateway configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub skill: SkillConfig,
    /// Parameters passed to every deployment
    #[serde(default)]
    pub parameters: GlobalParameters,
    /// Order matters: the first project whose name matches wins
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
}

impl AppConfig {
    /// Example configuration written by `dump-sample-config`
    pub fn sample() -> Self {
        let mut parameters = GlobalParameters::new();
        parameters.insert("DEPLOY_ENV".to_string(), "production".to_string());

        let docs = ProjectConfig {
            work_dir: Some("/srv/andykdocs".to_string()),
            restart: Some("docker-compose restart".to_string()),
            ..ProjectConfig::new("Andy K. Docs", "git pull && docker-compose up -d --build")
        }
        .with_parameter("DOCKER_HOST", "unix:///var/run/docker.sock");

        let site = ProjectConfig::new("ak7.io", "./deploy.sh").with_parameter("DEPLOY_ENV", "staging");

        Self {
            skill: SkillConfig {
                app_id: "amzn1.ask.skill.abc12345-1111-dddd-aaaa-aaaabbbb3333".to_string(),
            },
            parameters,
            projects: vec![docs, site],
        }
    }
}

/// Read the config from a JSON file
pub fn load_from_file(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound(display.clone())
        } else {
            ConfigError::Io {
                path: display.clone(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

/// Write the config as pretty JSON
pub fn save_to_file(path: impl AsRef<Path>, config: &AppConfig) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(config)?;

    fs::write(path, json).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alexaops.conf");

        let sample = AppConfig::sample();
        save_to_file(&path, &sample).unwrap();

        let loaded = load_from_file(&path).unwrap();
        assert_eq!(loaded, sample);
        assert_eq!(loaded.projects[0].name, "Andy K. Docs");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_file(dir.path().join("missing.conf"));

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.conf");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_wire_field_names() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "skill": { "appID": "amzn1.ask.skill.test" },
                "parameters": { "A": "1" },
                "projects": [
                    { "name": "ak7.io", "deploy": "exit 0", "workDir": "/tmp", "status": "uptime" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.skill.app_id, "amzn1.ask.skill.test");
        assert_eq!(config.parameters["A"], "1");
        assert_eq!(config.projects[0].work_dir.as_deref(), Some("/tmp"));
        assert_eq!(config.projects[0].status.as_deref(), Some("uptime"));
    }
}
