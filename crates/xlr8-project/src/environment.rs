use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProjectError;

/// Deployment target a build is versioned for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    #[default]
    #[serde(rename = "dev")]
    Development,
    #[serde(rename = "stage")]
    Stage,
    #[serde(rename = "prod")]
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "dev",
            Environment::Stage => "stage",
            Environment::Production => "prod",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the canonical names plus common long forms.
impl FromStr for Environment {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" | "develop" | "development" => Ok(Environment::Development),
            "stage" => Ok(Environment::Stage),
            "prod" | "production" => Ok(Environment::Production),
            other => Err(ProjectError::UnknownEnvironment(other.to_string())),
        }
    }
}
