//! xcflavors - flavor build configurations for Xcode projects
//!
//! Duplicates the `Debug`, `Release` and `Profile` build configurations of an
//! Xcode project into `dev` and `prod` flavor variants, at the project level
//! and for every target, then writes the descriptor back with all other
//! content left byte-for-byte intact.

pub mod config;
pub mod flavor;
pub mod pipeline;
pub mod project;
pub mod summary;

pub use config::{ConfigError, EffectiveConfig, ToolConfig};
pub use flavor::{clone_flavors, CloneReport, FlavorPlan, SkipReason};
pub use pipeline::{run, PipelineError, RunOptions, RunOutcome};
pub use project::{BuildConfiguration, ConfigurationKind, Project, ProjectError, Scope, ScopeKey};
