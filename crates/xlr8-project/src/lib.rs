//! # xlr8-project
//!
//! **Tier 1 (Configuration)**
//!
//! Project metadata read from `project.json` and `requirements.txt`, the
//! deployment environments a build can target, and the environment
//! variables that freeze version inputs for builds outside a git checkout.
//!
//! ## What belongs here
//! * Serde types for `project.json`
//! * Names derived from project and package names
//! * Environment name normalisation
//!
//! ## What does NOT belong here
//! * Git access (use xlr8-git)
//! * Packaging or deployment side effects

#![forbid(unsafe_code)]

mod environment;
mod overrides;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xlr8_version::VersionError;

pub use environment::Environment;
pub use overrides::{BASE_VERSION_ENV, COMMIT_COUNT_ENV, VersionOverrides, on_virtualenv};

/// File name of the project descriptor in the project root.
pub const PROJECT_FILE: &str = "project.json";

/// File name of the dependency list in the project root.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Errors from reading project metadata.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{0}` must be defined")]
    MissingProperty(&'static str),

    #[error("'{0}' is not a valid environment (expected dev, stage or prod)")]
    UnknownEnvironment(String),

    #[error("Invalid {name} value '{value}'")]
    InvalidOverride { name: &'static str, value: String },

    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Contents of `project.json`.
///
/// Every property is optional on disk; accessors fail when a required one
/// is absent. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Dotted package name, e.g. `acme.xlr8`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_types: Option<Vec<String>>,
}

impl ProjectConfig {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ProjectError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `project.json` from a project root.
    pub fn load_from_dir(root: &Path) -> Result<Self, ProjectError> {
        Self::load(&root.join(PROJECT_FILE))
    }

    fn require<'a, T: ?Sized>(
        value: Option<&'a T>,
        name: &'static str,
    ) -> Result<&'a T, ProjectError> {
        value.ok_or(ProjectError::MissingProperty(name))
    }

    pub fn description(&self) -> Result<&str, ProjectError> {
        Self::require(self.description.as_deref(), "description")
    }

    pub fn project_name(&self) -> Result<&str, ProjectError> {
        Self::require(self.project_name.as_deref(), "projectName")
    }

    pub fn package_name(&self) -> Result<&str, ProjectError> {
        Self::require(self.package_name.as_deref(), "packageName")
    }

    pub fn deployment_types(&self) -> Result<&[String], ProjectError> {
        Self::require(self.deployment_types.as_deref(), "deploymentTypes")
    }

    /// Source directory of the package: dots become path separators.
    pub fn package_path(&self) -> Result<String, ProjectError> {
        Ok(self.package_name()?.replace('.', "/"))
    }

    /// Function name used for serverless deployments.
    pub fn lambda_function_name(&self) -> Result<String, ProjectError> {
        Ok(self.project_name()?.replace('.', "_"))
    }

    /// Layer name used for serverless deployments.
    pub fn lambda_layer_name(&self) -> Result<String, ProjectError> {
        Ok(self.project_name()?.replace('.', "-"))
    }

    /// Whether the project declares `kind` among its deployment types.
    pub fn is_a(&self, kind: &str) -> Result<bool, ProjectError> {
        Ok(self.deployment_types()?.iter().any(|t| t == kind))
    }
}

/// Split a requirements file into its whitespace-separated entries.
pub fn parse_requirements(content: &str) -> Vec<String> {
    content.split_whitespace().map(str::to_string).collect()
}

pub fn read_requirements(path: &Path) -> Result<Vec<String>, ProjectError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_requirements(&content))
}
