use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::ApiRegionsError;

const DEFAULT_TYPE: &str = "jar";

/// Maven-style artifact coordinate
///
/// Textual form is `group:artifact[:type[:classifier]]:version`. The type
/// defaults to `jar` and is omitted from the textual form when it is the
/// default and no classifier is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactId {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub artifact_type: String,
    pub classifier: Option<String>,
}

impl ArtifactId {
    /// Create a `jar` coordinate without classifier
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            artifact_type: DEFAULT_TYPE.to_string(),
            classifier: None,
        }
    }

    /// Parse `group:artifact[:type[:classifier]]:version`
    ///
    /// # Errors
    /// * `InvalidArtifactId` - fewer than three or more than five segments, or an empty segment
    pub fn parse(value: &str) -> Result<Self, ApiRegionsError> {
        let parts: Vec<&str> = value.trim().split(':').collect();
        let invalid = |reason: &str| ApiRegionsError::InvalidArtifactId {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if parts.len() < 3 || parts.len() > 5 {
            return Err(invalid(
                "expected group:artifact[:type[:classifier]]:version",
            ));
        }
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid("coordinate segments must not be empty"));
        }

        let (artifact_type, classifier) = match parts.len() {
            3 => (DEFAULT_TYPE.to_string(), None),
            4 => (parts[2].to_string(), None),
            _ => (parts[2].to_string(), Some(parts[3].to_string())),
        };

        Ok(Self {
            group_id: parts[0].to_string(),
            artifact_id: parts[1].to_string(),
            version: parts[parts.len() - 1].to_string(),
            artifact_type,
            classifier,
        })
    }

    /// Relative location inside a Maven-layout repository
    ///
    /// `org.example:foo:1.0` maps to `org/example/foo/1.0/foo-1.0.jar`.
    pub fn repository_path(&self) -> PathBuf {
        let mut path: PathBuf = self.group_id.split('.').collect();
        path.push(&self.artifact_id);
        path.push(&self.version);

        let mut file_name = format!("{}-{}", self.artifact_id, self.version);
        if let Some(classifier) = &self.classifier {
            file_name.push('-');
            file_name.push_str(classifier);
        }
        file_name.push('.');
        file_name.push_str(&self.artifact_type);
        path.push(file_name);
        path
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}:{}", self.artifact_type, classifier)?;
        } else if self.artifact_type != DEFAULT_TYPE {
            write!(f, ":{}", self.artifact_type)?;
        }
        write!(f, ":{}", self.version)
    }
}

impl FromStr for ArtifactId {
    type Err = ApiRegionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ArtifactId {
    type Error = ApiRegionsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ArtifactId> for String {
    fn from(id: ArtifactId) -> Self {
        id.to_string()
    }
}
