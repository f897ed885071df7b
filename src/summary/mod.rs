//! End-of-run summary
//!
//! The success banner and the manual follow-up checklist printed after the
//! project has been saved.

use crate::config::ToolConfig;
use crate::flavor::FlavorPlan;

/// Manual steps left to the user after flavors are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextSteps {
    pub workspace: String,
    /// `(configuration, xcconfig path)` pairs
    pub xcconfig_files: Vec<(String, String)>,
    pub pod_install_dir: String,
}

impl NextSteps {
    pub fn new(config: &ToolConfig, plan: &FlavorPlan) -> Self {
        let xcconfig_files = plan
            .all_derived_names()
            .into_iter()
            .map(|name| {
                let file = format!("{}/{}.xcconfig", config.xcconfig_dir, name);
                (name, file)
            })
            .collect();
        Self {
            workspace: config.workspace.clone(),
            xcconfig_files,
            pod_install_dir: config.pod_install_dir.clone(),
        }
    }

    /// Checklist text, starting with the `Next steps:` header.
    pub fn to_human(&self) -> String {
        let mut out = String::from("Next steps:\n");
        out.push_str(&format!("1. Open {} in Xcode\n", self.workspace));
        out.push_str("2. Set the xcconfig files for each configuration:\n");
        for (name, file) in &self.xcconfig_files {
            out.push_str(&format!("   - {} → {}\n", name, file));
        }
        out.push_str(&format!("3. Run: cd {} && pod install\n", self.pod_install_dir));
        out
    }
}

/// Full text printed after a successful save.
pub fn success_message(steps: &NextSteps) -> String {
    format!(
        "\n✅ Flavor configurations added successfully!\n\n{}",
        steps.to_human()
    )
}
