//! Configuration lists, targets and scopes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::configuration::BuildConfiguration;

/// An `XCConfigurationList` and the configurations it references, in order.
#[derive(Debug, Clone)]
pub struct ConfigurationList {
    pub id: String,
    pub configurations: Vec<BuildConfiguration>,
    pub(crate) layout: ListLayout,
}

impl ConfigurationList {
    /// Find a configuration by exact name.
    pub fn find(&self, name: &str) -> Option<&BuildConfiguration> {
        self.configurations.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.configurations.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Where new entries go in the source text of a `buildConfigurations` array.
#[derive(Debug, Clone)]
pub(crate) struct ListLayout {
    /// Offset of the closing `)`
    pub close: usize,
    /// Start of the line holding `)` when elements are one per line
    pub line_entry: Option<usize>,
    pub item_indent: String,
    /// End of the last element when it has no trailing comma
    pub missing_comma_at: Option<usize>,
}

impl ListLayout {
    /// Insertions that append `<id> /* <name> */` to the array.
    pub fn entry_insertions(&self, id: &str, name: &str) -> Vec<(usize, String)> {
        let mut out = Vec::new();
        if let Some(at) = self.missing_comma_at {
            out.push((at, ",".to_string()));
        }
        match self.line_entry {
            Some(at) => out.push((at, format!("{}{} /* {} */,\n", self.item_indent, id, name))),
            None => out.push((self.close, format!("{} /* {} */, ", id, name))),
        }
        out
    }
}

/// A buildable target with its own configuration list.
#[derive(Debug, Clone)]
pub struct Target {
    pub id: String,
    pub name: String,
    /// `PBXNativeTarget`, `PBXAggregateTarget` or `PBXLegacyTarget`
    pub isa: String,
    pub configuration_list: ConfigurationList,
}

/// Addresses one configuration scope of a loaded project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    Project,
    /// Index into `Project::targets`
    Target(usize),
}

/// Human-facing identity of a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Scope {
    Project { name: String },
    Target { name: String },
}

impl Scope {
    /// Line printed when a configuration is added to this scope.
    pub fn progress_line(&self, configuration: &str) -> String {
        match self {
            Scope::Project { .. } => format!("Added project configuration: {}", configuration),
            Scope::Target { name } => {
                format!("Added target '{}' configuration: {}", name, configuration)
            }
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Project { name } => write!(f, "project '{}'", name),
            Scope::Target { name } => write!(f, "target '{}'", name),
        }
    }
}
