//! Effective configuration with provenance
//!
//! Records which layers contributed to the merged configuration, with the
//! SHA-256 of any file that was read.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::defaults::{builtin_layer, DEFAULT_CONFIG_FILE};
use super::merge::merge_layers;
use super::tool::ToolConfig;

/// Origin of a configuration layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 of the raw file bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Merged, validated configuration plus the layers it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub config: ToolConfig,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Pick the config file for this run.
///
/// An explicit path must exist. Without one, `.flavors.toml` in `dir` is used
/// when present.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<Option<PathBuf>, ConfigError> {
    match explicit {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigError::NotFound(path.to_path_buf())),
        None => {
            let candidate = dir.join(DEFAULT_CONFIG_FILE);
            Ok(candidate.exists().then_some(candidate))
        }
    }
}

impl EffectiveConfig {
    /// Merge built-in defaults, an optional config file and CLI overrides.
    pub fn build(
        config_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = vec![builtin_layer()];
        let mut sources = vec![ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        }];

        if let Some(path) = config_path {
            let (value, digest) = Self::load_toml_file(path)?;
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);
        let config: ToolConfig =
            serde_json::from_value(merged).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;

        Ok(Self { config, sources })
    }

    /// Load and parse a TOML file, returning the value and digest
    fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::Invalid(format!("{} is not UTF-8: {}", path.display(), e)))?;
        let table: toml::Value = toml::from_str(&contents)?;

        Ok((Self::toml_to_json(table), digest))
    }

    fn toml_to_json(toml: toml::Value) -> Value {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Number(i.into()),
            toml::Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => {
                Value::Array(items.into_iter().map(Self::toml_to_json).collect())
            }
            toml::Value::Table(table) => Value::Object(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::toml_to_json(v)))
                    .collect(),
            ),
        }
    }

    /// Whether a config file contributed
    pub fn file_source(&self) -> Option<&ConfigSource> {
        self.sources.iter().find(|s| s.origin == ConfigOrigin::File)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_build_with_defaults_only() {
        let effective = EffectiveConfig::build(None, None).unwrap();
        assert_eq!(effective.config, ToolConfig::default());
        assert_eq!(effective.sources.len(), 1);
        assert_eq!(effective.sources[0].origin, ConfigOrigin::Builtin);
        assert!(effective.file_source().is_none());
    }

    #[test]
    fn test_file_layer() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "flavors = [\"dev\", \"staging\", \"prod\"]").unwrap();
        writeln!(temp, "xcconfig_dir = \"Config\"").unwrap();

        let effective = EffectiveConfig::build(Some(temp.path()), None).unwrap();

        assert_eq!(effective.config.flavors, vec!["dev", "staging", "prod"]);
        assert_eq!(effective.config.xcconfig_dir, "Config");
        assert_eq!(effective.config.bases, vec!["Debug", "Release", "Profile"]);

        let source = effective.file_source().unwrap();
        assert_eq!(source.digest.as_ref().unwrap().len(), 64);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "project = \"app/ios/Runner.xcodeproj\"").unwrap();

        let cli = serde_json::json!({"project": "other/App.xcodeproj"});
        let effective = EffectiveConfig::build(Some(temp.path()), Some(cli)).unwrap();

        assert_eq!(effective.config.project, PathBuf::from("other/App.xcodeproj"));
        let origins: Vec<_> = effective.sources.iter().map(|s| s.origin).collect();
        assert_eq!(
            origins,
            vec![ConfigOrigin::Builtin, ConfigOrigin::File, ConfigOrigin::Cli]
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "flavours = [\"dev\"]").unwrap();

        let err = EffectiveConfig::build(Some(temp.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("flavours"));
    }

    #[test]
    fn test_invalid_toml() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "flavors = [").unwrap();

        let err = EffectiveConfig::build(Some(temp.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_runs_after_merge() {
        let cli = serde_json::json!({"bases": []});
        let err = EffectiveConfig::build(None, Some(cli)).unwrap_err();
        assert!(err.to_string().contains("bases must not be empty"));
    }

    #[test]
    fn test_resolve_explicit_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = resolve_config_path(Some(&missing), dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_resolve_default_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_config_path(None, dir.path()).unwrap(), None);

        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "separator = \"_\"\n").unwrap();
        assert_eq!(resolve_config_path(None, dir.path()).unwrap(), Some(path));
    }
}
