//! Project configuration

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters applied to every deployment, overridden per project
pub type GlobalParameters = HashMap<String, String>;

/// Environment variable carrying the configured project name into scripts
pub const PROJECT_NAME_VAR: &str = "PROJECT_NAME";

/// One deployable project, immutable after load
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Operator-entered name, matched against the spoken name after normalization
    pub name: String,
    /// Injected into the script environment after the global parameters
    #[serde(default)]
    pub parameters: HashMap<String, String>,
    /// Deploy script body (shell text)
    #[serde(default)]
    pub deploy: String,
    /// Working directory for the script
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<String>,
    /// Reserved script slots, no intent uses them yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ProjectConfig {
    pub fn new(name: impl Into<String>, deploy: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deploy: deploy.into(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Environment for a deploy run, in application order
    ///
    /// `PROJECT_NAME` first, then the global parameters, then the project's
    /// own. Later entries win on key collisions, so project parameters
    /// override global ones.
    pub fn environment(&self, global: &GlobalParameters) -> Vec<(String, String)> {
        let mut env = Vec::with_capacity(1 + global.len() + self.parameters.len());
        env.push((PROJECT_NAME_VAR.to_string(), self.name.clone()));
        env.extend(sorted(global));
        env.extend(sorted(&self.parameters));
        env
    }
}

fn sorted(parameters: &HashMap<String, String>) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = parameters
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    pairs.sort();
    pairs
}
