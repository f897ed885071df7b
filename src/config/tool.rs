//! Typed tool configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use super::effective::ConfigError;

/// Fully merged configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// `.xcodeproj` bundle or `project.pbxproj` file
    pub project: PathBuf,

    /// Base configuration names, in processing order
    pub bases: Vec<String>,

    /// Flavor suffixes, in processing order
    pub flavors: Vec<String>,

    pub separator: String,

    /// Workspace named in the next-steps checklist
    pub workspace: String,

    /// Directory named for the per-flavor xcconfig files
    pub xcconfig_dir: String,

    /// Directory named for `pod install`
    pub pod_install_dir: String,
}

impl ToolConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("project must not be empty".to_string()));
        }
        if self.separator.is_empty() {
            return Err(ConfigError::Invalid("separator must not be empty".to_string()));
        }
        check_names("bases", &self.bases)?;
        check_names("flavors", &self.flavors)?;
        check_text("separator", &self.separator)?;
        // Joined names can form `*/` across the separator
        for base in &self.bases {
            for flavor in &self.flavors {
                check_text("derived name", &format!("{}{}{}", base, self.separator, flavor))?;
            }
        }
        Ok(())
    }
}

/// Names are written inside `/* ... */` comments on single lines.
fn check_text(field: &str, text: &str) -> Result<(), ConfigError> {
    if text.contains("*/") || text.contains(['\n', '\r']) {
        return Err(ConfigError::Invalid(format!(
            "{} '{}' must not contain '*/' or line breaks",
            field,
            text.escape_debug()
        )));
    }
    Ok(())
}

fn check_names(field: &str, names: &[String]) -> Result<(), ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::Invalid(format!("{} must not be empty", field)));
    }
    let mut seen = HashSet::new();
    for name in names {
        if name.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("{} contains an empty name", field)));
        }
        check_text(field, name)?;
        if !seen.insert(name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "{} contains '{}' more than once",
                field, name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ToolConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_flavors_rejected() {
        let config = ToolConfig {
            flavors: vec![],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("flavors must not be empty"));
    }

    #[test]
    fn test_duplicate_base_rejected() {
        let config = ToolConfig {
            bases: vec!["Debug".to_string(), "Debug".to_string()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'Debug' more than once"));
    }

    #[test]
    fn test_blank_name_rejected() {
        let config = ToolConfig {
            flavors: vec!["dev".to_string(), " ".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_separator_rejected() {
        let config = ToolConfig {
            separator: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_comment_terminator_rejected() {
        let config = ToolConfig {
            flavors: vec!["dev".to_string(), "a*/b".to_string()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must not contain '*/'"));

        let config = ToolConfig {
            bases: vec!["Debug*".to_string()],
            separator: "/".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_line_break_rejected() {
        let config = ToolConfig {
            bases: vec!["Debug\nRelease".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let value = serde_json::json!({
            "project": "ios/Runner.xcodeproj",
            "bases": ["Debug"],
            "flavors": ["dev"],
            "separator": "-",
            "workspace": "ios/Runner.xcworkspace",
            "xcconfig_dir": "Flutter",
            "pod_install_dir": "ios",
            "flavour": ["typo"]
        });
        assert!(serde_json::from_value::<ToolConfig>(value).is_err());
    }
}
