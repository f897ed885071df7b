//! Clone report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::project::{ConfigurationKind, Scope};

/// Schema version for clone reports
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "xcflavors/clone_report@1";

/// Why a derived configuration was not created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// A configuration with the derived name is already in the scope
    AlreadyExists,
    /// The scope has no configuration with the base name
    MissingBase,
}

/// A configuration added to a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedConfiguration {
    pub id: String,
    pub name: String,
    pub base: String,
    pub kind: ConfigurationKind,
}

/// A derived name that was left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedConfiguration {
    pub name: String,
    pub base: String,
    pub reason: SkipReason,
}

/// Outcome for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeReport {
    pub scope: Scope,
    pub created: Vec<CreatedConfiguration>,
    pub skipped: Vec<SkippedConfiguration>,
}

impl ScopeReport {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            created: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Outcome of a flavor run across all scopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneReport {
    pub schema_version: u32,
    pub schema_id: String,
    pub created_at: DateTime<Utc>,
    /// Descriptor the run operated on
    pub project_path: String,
    pub scopes: Vec<ScopeReport>,
    /// Whether the descriptor was written back
    pub written: bool,
}

impl CloneReport {
    pub fn new(project_path: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            project_path: project_path.into(),
            scopes: Vec::new(),
            written: false,
        }
    }

    pub fn created_count(&self) -> usize {
        self.scopes.iter().map(|s| s.created.len()).sum()
    }

    pub fn skipped_count(&self) -> usize {
        self.scopes.iter().map(|s| s.skipped.len()).sum()
    }

    /// One line per created configuration, in creation order.
    pub fn progress_lines(&self) -> Vec<String> {
        self.scopes
            .iter()
            .flat_map(|s| s.created.iter().map(|c| s.scope.progress_line(&c.name)))
            .collect()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CloneReport {
        let mut report = CloneReport::new("ios/Runner.xcodeproj/project.pbxproj");
        let mut project = ScopeReport::new(Scope::Project {
            name: "Runner".to_string(),
        });
        project.created.push(CreatedConfiguration {
            id: "0123456789ABCDEF01234567".to_string(),
            name: "Debug-dev".to_string(),
            base: "Debug".to_string(),
            kind: ConfigurationKind::Debug,
        });
        project.skipped.push(SkippedConfiguration {
            name: "Profile-dev".to_string(),
            base: "Profile".to_string(),
            reason: SkipReason::MissingBase,
        });
        report.scopes.push(project);

        let mut target = ScopeReport::new(Scope::Target {
            name: "Runner".to_string(),
        });
        target.created.push(CreatedConfiguration {
            id: "76543210FEDCBA9876543210".to_string(),
            name: "Release-prod".to_string(),
            base: "Release".to_string(),
            kind: ConfigurationKind::Release,
        });
        report.scopes.push(target);
        report
    }

    #[test]
    fn test_counts() {
        let report = sample();
        assert_eq!(report.created_count(), 2);
        assert_eq!(report.skipped_count(), 1);
    }

    #[test]
    fn test_progress_lines() {
        assert_eq!(
            sample().progress_lines(),
            vec![
                "Added project configuration: Debug-dev".to_string(),
                "Added target 'Runner' configuration: Release-prod".to_string(),
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(json["schema_id"], SCHEMA_ID);
        assert_eq!(json["written"], false);
        assert_eq!(json["scopes"][0]["scope"]["kind"], "project");
        assert_eq!(json["scopes"][0]["skipped"][0]["reason"], "missing-base");
        assert_eq!(json["scopes"][1]["created"][0]["kind"], "release");
    }
}
