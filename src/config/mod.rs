//! Tool configuration
//!
//! Three layers, later layers win:
//! 1. Built-in defaults (Flutter `ios/Runner.xcodeproj` layout)
//! 2. Config file (`--config <path>`, or `.flavors.toml` when present)
//! 3. CLI flags

mod defaults;
mod effective;
mod merge;
mod tool;

pub use defaults::{
    builtin_layer, DEFAULT_BASES, DEFAULT_CONFIG_FILE, DEFAULT_FLAVORS, DEFAULT_PODS_DIR,
    DEFAULT_PROJECT, DEFAULT_SEPARATOR, DEFAULT_WORKSPACE, DEFAULT_XCCONFIG_DIR,
};
pub use effective::{resolve_config_path, ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
pub use merge::{deep_merge, merge_layers};
pub use tool::ToolConfig;
