//! Flavor configuration cloning
//!
//! For every scope of a project (the project itself, then each target) and
//! every base configuration, adds one configuration per flavor named
//! `<Base><separator><flavor>`, copying the base's kind and settings.
//! Names already present in a scope are left alone and bases missing from a
//! scope are skipped, so running twice changes nothing the second time.

mod report;

pub use report::{
    CloneReport, CreatedConfiguration, ScopeReport, SkipReason, SkippedConfiguration, SCHEMA_ID,
    SCHEMA_VERSION,
};

use crate::config::ToolConfig;
use crate::project::{Project, Scope};

/// Base configurations and flavors to derive from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorPlan {
    pub bases: Vec<String>,
    pub flavors: Vec<String>,
    pub separator: String,
}

impl Default for FlavorPlan {
    fn default() -> Self {
        Self {
            bases: vec!["Debug".to_string(), "Release".to_string(), "Profile".to_string()],
            flavors: vec!["dev".to_string(), "prod".to_string()],
            separator: "-".to_string(),
        }
    }
}

impl FlavorPlan {
    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            bases: config.bases.clone(),
            flavors: config.flavors.clone(),
            separator: config.separator.clone(),
        }
    }

    /// Derived names for one base, in flavor order.
    pub fn derived_names(&self, base: &str) -> Vec<String> {
        self.flavors
            .iter()
            .map(|flavor| format!("{}{}{}", base, self.separator, flavor))
            .collect()
    }

    /// Every derived name, grouped by base.
    pub fn all_derived_names(&self) -> Vec<String> {
        self.bases
            .iter()
            .flat_map(|base| self.derived_names(base))
            .collect()
    }
}

/// Add flavor configurations to every scope of `project`.
pub fn clone_flavors(project: &mut Project, plan: &FlavorPlan) -> CloneReport {
    clone_flavors_with_progress(project, plan, |_, _| {})
}

/// Like [`clone_flavors`], calling `on_created` as each configuration is
/// added.
pub fn clone_flavors_with_progress<F>(
    project: &mut Project,
    plan: &FlavorPlan,
    mut on_created: F,
) -> CloneReport
where
    F: FnMut(&Scope, &CreatedConfiguration),
{
    let mut report = CloneReport::new(project.path().display().to_string());

    for key in project.scopes() {
        let Some(scope) = project.scope(key) else {
            continue;
        };
        let mut scope_report = ScopeReport::new(scope.clone());

        for base_name in &plan.bases {
            let base = project
                .list(key)
                .and_then(|list| list.find(base_name))
                .cloned();

            for name in plan.derived_names(base_name) {
                let Some(base) = base.as_ref() else {
                    tracing::debug!(%scope, %name, base = %base_name, "base configuration missing, skipping");
                    scope_report.skipped.push(SkippedConfiguration {
                        name,
                        base: base_name.clone(),
                        reason: SkipReason::MissingBase,
                    });
                    continue;
                };

                match project.add_configuration(key, &name, base) {
                    Some(added) => {
                        let created = CreatedConfiguration {
                            id: added.id.clone(),
                            name: added.name.clone(),
                            base: base_name.clone(),
                            kind: added.kind,
                        };
                        tracing::debug!(%scope, name = %created.name, id = %created.id, "added configuration");
                        on_created(&scope, &created);
                        scope_report.created.push(created);
                    }
                    None => {
                        tracing::debug!(%scope, %name, "configuration already exists, skipping");
                        scope_report.skipped.push(SkippedConfiguration {
                            name,
                            base: base_name.clone(),
                            reason: SkipReason::AlreadyExists,
                        });
                    }
                }
            }
        }

        tracing::info!(
            %scope,
            created = scope_report.created.len(),
            skipped = scope_report.skipped.len(),
            "processed scope"
        );
        report.scopes.push(scope_report);
    }

    report
}
