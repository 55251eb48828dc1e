//! Deployment domain model

/// Terminal state of a single deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeployStatus {
    Success,
    Failed,
}

/// Outcome of one deployment request
///
/// Produced per request and dropped once the response is written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentResult {
    /// Project name as it was requested (not normalized)
    pub project: String,
    pub status: DeployStatus,
}

impl DeploymentResult {
    pub fn succeeded(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            status: DeployStatus::Success,
        }
    }

    pub fn failed(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            status: DeployStatus::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DeployStatus::Success
    }
}
