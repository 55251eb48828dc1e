//! Project name matching
//!
//! Spoken project names rarely match the configured spelling exactly, so
//! both sides are compared in normalized form: lower-cased, with all
//! whitespace and periods removed ("Andy K. Docs" == "andykdocs").

use thiserror::Error;

use crate::config::ProjectConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Carries the name as it was requested
    #[error("No matching deployment config found for {0:?}")]
    NotFound(String),
}

/// Normalize a project name for comparison
pub fn normalize_project_name(name: &str) -> String {
    name.to_lowercase()
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect()
}

/// First candidate whose normalized name equals the normalized query
///
/// Candidate order is the tie-break; names are not required to be unique.
pub fn find_by_name<'a>(
    name: &str,
    candidates: &'a [ProjectConfig],
) -> Result<&'a ProjectConfig, MatchError> {
    let wanted = normalize_project_name(name);
    candidates
        .iter()
        .find(|candidate| normalize_project_name(&candidate.name) == wanted)
        .ok_or_else(|| MatchError::NotFound(name.to_string()))
}

/// Looks up configured projects by spoken name
#[derive(Clone, Debug, Default)]
pub struct ProjectResolver {
    projects: Vec<ProjectConfig>,
}

impl ProjectResolver {
    pub fn new(projects: Vec<ProjectConfig>) -> Self {
        Self { projects }
    }

    pub fn resolve(&self, name: &str) -> Result<&ProjectConfig, MatchError> {
        find_by_name(name, &self.projects)
    }
}
