//! Run orchestration
//!
//! One pass, in order:
//! - Resolve and merge configuration
//! - Load the project descriptor
//! - Clone flavor configurations into every scope
//! - Save the descriptor (skipped on dry run)
//!
//! Nothing touches the disk before the final save, so a failure at any
//! earlier step leaves the project file as it was.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{resolve_config_path, ConfigError, EffectiveConfig};
use crate::flavor::{clone_flavors_with_progress, CloneReport, FlavorPlan};
use crate::project::{Project, ProjectError};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Overrides the configured project path
    pub project: Option<PathBuf>,
    /// Explicit config file
    pub config: Option<PathBuf>,
    /// Clone in memory only; do not save
    pub dry_run: bool,
    /// Base for relative paths and config discovery
    pub working_dir: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            project: None,
            config: None,
            dry_run: false,
            working_dir: PathBuf::from("."),
        }
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub config: EffectiveConfig,
    pub plan: FlavorPlan,
    pub report: CloneReport,
}

/// Execute a run. `progress` receives one line per added configuration,
/// as it is added.
pub fn run<F>(options: &RunOptions, mut progress: F) -> PipelineResult<RunOutcome>
where
    F: FnMut(&str),
{
    let config_path = resolve_config_path(options.config.as_deref(), &options.working_dir)?;
    let cli_overrides = options
        .project
        .as_ref()
        .map(|path| serde_json::json!({ "project": path.to_string_lossy() }));
    let config = EffectiveConfig::build(config_path.as_deref(), cli_overrides)?;
    for source in &config.sources {
        tracing::debug!(origin = ?source.origin, path = ?source.path, "config layer");
    }

    let project_path = options.working_dir.join(&config.config.project);
    let mut project = Project::load(&project_path)?;
    let plan = FlavorPlan::from_config(&config.config);

    let mut report = clone_flavors_with_progress(&mut project, &plan, |scope, created| {
        progress(&scope.progress_line(&created.name));
    });

    if options.dry_run {
        tracing::info!(added = project.added_count(), "dry run, project not written");
    } else {
        project.save()?;
        report.written = true;
    }

    Ok(RunOutcome {
        config,
        plan,
        report,
    })
}
