//! Built-in defaults (layer 1)
//!
//! Match the layout of a Flutter app: the Xcode project lives under `ios/`
//! and per-configuration xcconfig files under `ios/Flutter/`.

use serde_json::{json, Value};
use std::path::PathBuf;

use super::tool::ToolConfig;

/// Project bundle, relative to the working directory
pub const DEFAULT_PROJECT: &str = "ios/Runner.xcodeproj";

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = ".flavors.toml";

/// Configurations every flavor is derived from
pub const DEFAULT_BASES: &[&str] = &["Debug", "Release", "Profile"];

pub const DEFAULT_FLAVORS: &[&str] = &["dev", "prod"];

/// Joins base and flavor: `Debug` + `dev` -> `Debug-dev`
pub const DEFAULT_SEPARATOR: &str = "-";

pub const DEFAULT_WORKSPACE: &str = "ios/Runner.xcworkspace";

/// Where the next-steps checklist says the xcconfig files go
pub const DEFAULT_XCCONFIG_DIR: &str = "Flutter";

/// Directory to run `pod install` in
pub const DEFAULT_PODS_DIR: &str = "ios";

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            project: PathBuf::from(DEFAULT_PROJECT),
            bases: owned(DEFAULT_BASES),
            flavors: owned(DEFAULT_FLAVORS),
            separator: DEFAULT_SEPARATOR.to_string(),
            workspace: DEFAULT_WORKSPACE.to_string(),
            xcconfig_dir: DEFAULT_XCCONFIG_DIR.to_string(),
            pod_install_dir: DEFAULT_PODS_DIR.to_string(),
        }
    }
}

/// The defaults as a JSON value for merging
pub fn builtin_layer() -> Value {
    json!({
        "project": DEFAULT_PROJECT,
        "bases": DEFAULT_BASES,
        "flavors": DEFAULT_FLAVORS,
        "separator": DEFAULT_SEPARATOR,
        "workspace": DEFAULT_WORKSPACE,
        "xcconfig_dir": DEFAULT_XCCONFIG_DIR,
        "pod_install_dir": DEFAULT_PODS_DIR,
    })
}
