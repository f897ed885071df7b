//! Build configuration records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use xcflavors_pbxproj::Value;

/// Ordered build settings of one configuration.
pub type BuildSettings = IndexMap<String, Value>;

/// Optimization class of a build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationKind {
    Debug,
    Release,
}

impl ConfigurationKind {
    /// Infer the kind from a configuration's own settings, falling back to
    /// its name. Inherited settings are not consulted.
    pub fn infer(name: &str, settings: &BuildSettings) -> Self {
        let setting = |key: &str| settings.get(key);

        if setting("GCC_PREPROCESSOR_DEFINITIONS").is_some_and(|v| v.contains_str("DEBUG=1")) {
            return Self::Debug;
        }
        if setting("SWIFT_ACTIVE_COMPILATION_CONDITIONS").is_some_and(|v| v.contains_str("DEBUG")) {
            return Self::Debug;
        }
        match setting("SWIFT_OPTIMIZATION_LEVEL").and_then(Value::as_str) {
            Some("-Onone") => return Self::Debug,
            Some(_) => return Self::Release,
            None => {}
        }
        match setting("GCC_OPTIMIZATION_LEVEL").and_then(Value::as_str) {
            Some("0") => return Self::Debug,
            Some(_) => return Self::Release,
            None => {}
        }

        if name.to_ascii_lowercase().contains("debug") {
            Self::Debug
        } else {
            Self::Release
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl std::fmt::Display for ConfigurationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `XCBuildConfiguration` object.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfiguration {
    /// 24-character object id
    pub id: String,
    pub name: String,
    pub kind: ConfigurationKind,
    pub settings: BuildSettings,
    /// Object id of the xcconfig file this configuration is based on
    pub base_configuration_reference: Option<String>,
}

impl BuildConfiguration {
    /// Derive a new configuration from `base`: same kind, same settings,
    /// no xcconfig reference.
    pub fn derive_from(base: &BuildConfiguration, id: String, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: base.kind,
            settings: base.settings.clone(),
            base_configuration_reference: None,
        }
    }
}
