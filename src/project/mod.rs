//! Xcode project descriptor model
//!
//! Loads `project.pbxproj` into a project-level configuration list plus one
//! list per target. New configurations are recorded as text insertions
//! against the original source, so saving leaves every other byte of the
//! file as it was.

mod configuration;
mod ids;
mod target;

pub use configuration::{BuildConfiguration, BuildSettings, ConfigurationKind};
pub use ids::{derive_object_id, OBJECT_ID_LEN};
pub use target::{ConfigurationList, Scope, ScopeKey, Target};

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use xcflavors_pbxproj::{
    contains_comma, indent, is_trivia, line_indent, line_start, quote, write_value, Node,
    ParseError, TextPatch, Value,
};

use target::ListLayout;

/// File name of the descriptor inside an `.xcodeproj` bundle
pub const DESCRIPTOR_FILE: &str = "project.pbxproj";

const ISA_PROJECT: &str = "PBXProject";
const ISA_CONFIGURATION_LIST: &str = "XCConfigurationList";
const ISA_BUILD_CONFIGURATION: &str = "XCBuildConfiguration";

/// Errors that can occur when loading, rendering or saving a project
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Project file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to access project file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed project file: {0}")]
    Parse(#[from] ParseError),

    #[error("Object '{0}' is referenced but not defined")]
    MissingObject(String),

    #[error("Object '{id}': expected {expected}")]
    UnexpectedShape { id: String, expected: String },

    #[error("Failed to render project file: {0}")]
    Render(String),
}

/// A loaded project descriptor.
#[derive(Debug, Clone)]
pub struct Project {
    path: PathBuf,
    name: String,
    source: String,
    configuration_list: ConfigurationList,
    targets: Vec<Target>,
    object_ids: HashSet<String>,
    anchors: ObjectAnchors,
    patch: TextPatch,
    added: usize,
}

/// Insertion points for new `XCBuildConfiguration` objects.
#[derive(Debug, Clone)]
struct ObjectAnchors {
    /// Existing configuration ids with the offset a new object placed
    /// before them would go, in file order
    entries: Vec<(String, usize)>,
    /// Offset just after the last configuration object
    tail: usize,
    /// Indentation depth of object entries
    depth: usize,
}

impl ObjectAnchors {
    /// Keep the section sorted by id, as Xcode does.
    fn offset_for(&self, id: &str) -> usize {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() > id)
            .map(|(_, offset)| *offset)
            .unwrap_or(self.tail)
    }
}

/// Accept either an `.xcodeproj` bundle or the descriptor file itself.
pub fn resolve_descriptor_path(path: &Path) -> PathBuf {
    if path.is_dir() || path.extension().is_some_and(|ext| ext == "xcodeproj") {
        path.join(DESCRIPTOR_FILE)
    } else {
        path.to_path_buf()
    }
}

impl Project {
    /// Load a project from an `.xcodeproj` bundle or `project.pbxproj` path
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = resolve_descriptor_path(path.as_ref());
        if !path.exists() {
            return Err(ProjectError::NotFound(path));
        }
        let source = fs::read_to_string(&path)?;
        let project = Self::from_source(path, source)?;
        tracing::debug!(
            path = %project.path.display(),
            targets = project.targets.len(),
            "loaded project"
        );
        Ok(project)
    }

    /// Build a project from descriptor text. `path` is where `save` writes.
    pub fn from_source(path: impl Into<PathBuf>, source: String) -> Result<Self, ProjectError> {
        let path = path.into();
        let root = xcflavors_pbxproj::parse(&source)?;
        let loader = Loader::new(&source, &root)?;

        let root_id = root.get_str("rootObject").ok_or_else(|| ProjectError::UnexpectedShape {
            id: "<root>".to_string(),
            expected: "a rootObject reference".to_string(),
        })?;
        let project_object = loader.object(root_id, Some(ISA_PROJECT))?;
        let configuration_list = loader.configuration_list(root_id, project_object)?;

        let mut targets = Vec::new();
        if let Some(target_ids) = project_object.get("targets") {
            let target_ids = target_ids.as_array().ok_or_else(|| shape(root_id, "a targets array"))?;
            for node in target_ids {
                let id = node.as_str().ok_or_else(|| shape(root_id, "target ids"))?;
                let object = loader.object(id, None)?;
                targets.push(Target {
                    id: id.to_string(),
                    name: object.get_str("name").unwrap_or(id).to_string(),
                    isa: object.get_str("isa").unwrap_or_default().to_string(),
                    configuration_list: loader.configuration_list(id, object)?,
                });
            }
        }

        let anchors = loader.anchors();
        let object_ids = loader.objects.keys().map(|id| id.to_string()).collect();

        Ok(Self {
            name: project_name(&path),
            path,
            source,
            configuration_list,
            targets,
            object_ids,
            anchors,
            patch: TextPatch::new(),
            added: 0,
        })
    }

    /// Path of the descriptor file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Project name, taken from the `.xcodeproj` bundle name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Original descriptor text as loaded
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Project-level configuration list
    pub fn configuration_list(&self) -> &ConfigurationList {
        &self.configuration_list
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Number of configurations added since load
    pub fn added_count(&self) -> usize {
        self.added
    }

    /// Project scope first, then targets in descriptor order.
    pub fn scopes(&self) -> Vec<ScopeKey> {
        std::iter::once(ScopeKey::Project)
            .chain((0..self.targets.len()).map(ScopeKey::Target))
            .collect()
    }

    pub fn scope(&self, key: ScopeKey) -> Option<Scope> {
        match key {
            ScopeKey::Project => Some(Scope::Project {
                name: self.name.clone(),
            }),
            ScopeKey::Target(i) => self.targets.get(i).map(|t| Scope::Target {
                name: t.name.clone(),
            }),
        }
    }

    pub fn list(&self, key: ScopeKey) -> Option<&ConfigurationList> {
        match key {
            ScopeKey::Project => Some(&self.configuration_list),
            ScopeKey::Target(i) => self.targets.get(i).map(|t| &t.configuration_list),
        }
    }

    fn list_mut(&mut self, key: ScopeKey) -> Option<&mut ConfigurationList> {
        match key {
            ScopeKey::Project => Some(&mut self.configuration_list),
            ScopeKey::Target(i) => self.targets.get_mut(i).map(|t| &mut t.configuration_list),
        }
    }

    /// Add a configuration named `name` to scope `key`, copying `base`.
    ///
    /// Returns `None` without changing anything when the scope already has a
    /// configuration with that name, or when `key` is not a scope of this
    /// project.
    pub fn add_configuration(
        &mut self,
        key: ScopeKey,
        name: &str,
        base: &BuildConfiguration,
    ) -> Option<&BuildConfiguration> {
        let list = self.list(key)?;
        if list.contains(name) {
            return None;
        }

        let id = derive_object_id(&list.id, name, &self.object_ids);
        let configuration = BuildConfiguration::derive_from(base, id, name);
        let entry_edits = list.layout.entry_insertions(&configuration.id, name);

        let object_text = self.render_object(&configuration);
        let offset = self.anchors.offset_for(&configuration.id);
        self.patch
            .insert_sorted(offset, configuration.id.clone(), object_text);
        for (at, text) in entry_edits {
            self.patch.insert(at, text);
        }
        self.object_ids.insert(configuration.id.clone());
        self.added += 1;

        let list = self.list_mut(key)?;
        list.layout.missing_comma_at = None;
        list.configurations.push(configuration);
        list.configurations.last()
    }

    fn render_object(&self, configuration: &BuildConfiguration) -> String {
        let depth = self.anchors.depth;
        let pad = indent(depth);
        let mut out = String::new();
        out.push_str(&format!(
            "{}{} /* {} */ = {{\n",
            pad, configuration.id, configuration.name
        ));
        out.push_str(&format!("{}\tisa = {};\n", pad, ISA_BUILD_CONFIGURATION));
        out.push_str(&format!("{}\tbuildSettings = ", pad));
        write_value(&mut out, &Value::Dict(configuration.settings.clone()), depth + 1);
        out.push_str(";\n");
        out.push_str(&format!("{}\tname = {};\n", pad, quote(&configuration.name)));
        out.push_str(&format!("{}}};\n", pad));
        out
    }

    /// Descriptor text with all added configurations spliced in.
    ///
    /// The result is re-parsed before it is returned.
    pub fn render(&self) -> Result<String, ProjectError> {
        if self.patch.is_empty() {
            return Ok(self.source.clone());
        }
        let text = self
            .patch
            .apply(&self.source)
            .map_err(|e| ProjectError::Render(e.to_string()))?;
        xcflavors_pbxproj::parse(&text)
            .map_err(|e| ProjectError::Render(format!("output does not parse: {}", e)))?;
        Ok(text)
    }

    /// Overwrite the descriptor file (write-then-rename).
    pub fn save(&self) -> Result<(), ProjectError> {
        let text = self.render()?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &text)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::info!(
            path = %self.path.display(),
            added = self.added,
            "saved project"
        );
        Ok(())
    }
}

fn shape(id: &str, expected: &str) -> ProjectError {
    ProjectError::UnexpectedShape {
        id: id.to_string(),
        expected: expected.to_string(),
    }
}

fn project_name(path: &Path) -> String {
    path.parent()
        .filter(|dir| dir.extension().is_some_and(|ext| ext == "xcodeproj"))
        .and_then(|dir| dir.file_stem())
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "Project".to_string())
}

/// Read-only view over the parsed `objects` dictionary.
struct Loader<'a> {
    src: &'a str,
    objects_node: &'a Node,
    objects: HashMap<&'a str, &'a Node>,
}

impl<'a> Loader<'a> {
    fn new(src: &'a str, root: &'a Node) -> Result<Self, ProjectError> {
        let objects_node = root
            .get("objects")
            .filter(|node| node.as_dict().is_some())
            .ok_or_else(|| shape("<root>", "an objects dictionary"))?;
        let objects = objects_node
            .as_dict()
            .unwrap_or_default()
            .iter()
            .map(|entry| (entry.key.as_str(), &entry.value))
            .collect();
        Ok(Self {
            src,
            objects_node,
            objects,
        })
    }

    fn object(&self, id: &str, isa: Option<&str>) -> Result<&'a Node, ProjectError> {
        let node = *self
            .objects
            .get(id)
            .ok_or_else(|| ProjectError::MissingObject(id.to_string()))?;
        if let Some(isa) = isa {
            if node.get_str("isa") != Some(isa) {
                return Err(shape(id, &format!("isa = {}", isa)));
            }
        }
        Ok(node)
    }

    fn configuration_list(
        &self,
        owner_id: &str,
        owner: &Node,
    ) -> Result<ConfigurationList, ProjectError> {
        let list_id = owner
            .get_str("buildConfigurationList")
            .ok_or_else(|| shape(owner_id, "a buildConfigurationList reference"))?;
        let list = self.object(list_id, Some(ISA_CONFIGURATION_LIST))?;
        let array = list
            .get("buildConfigurations")
            .filter(|node| node.as_array().is_some())
            .ok_or_else(|| shape(list_id, "a buildConfigurations array"))?;
        let items = array.as_array().unwrap_or_default();

        let mut configurations = Vec::with_capacity(items.len());
        for item in items {
            let id = item
                .as_str()
                .ok_or_else(|| shape(list_id, "configuration ids"))?;
            configurations.push(self.build_configuration(id)?);
        }

        Ok(ConfigurationList {
            id: list_id.to_string(),
            configurations,
            layout: self.list_layout(array, items),
        })
    }

    fn build_configuration(&self, id: &str) -> Result<BuildConfiguration, ProjectError> {
        let object = self.object(id, Some(ISA_BUILD_CONFIGURATION))?;
        let name = object
            .get_str("name")
            .ok_or_else(|| shape(id, "a name"))?
            .to_string();
        let settings = match object.get("buildSettings").map(Node::to_value) {
            None => BuildSettings::new(),
            Some(Value::Dict(map)) => map,
            Some(_) => return Err(shape(id, "a buildSettings dictionary")),
        };
        Ok(BuildConfiguration {
            id: id.to_string(),
            kind: ConfigurationKind::infer(&name, &settings),
            name,
            settings,
            base_configuration_reference: object
                .get_str("baseConfigurationReference")
                .map(str::to_string),
        })
    }

    fn list_layout(&self, array: &Node, items: &[Node]) -> ListLayout {
        let src = self.src;
        let close = array.span.end - 1;
        let close_line = line_start(src, close);
        let own_line = close_line > array.span.start && src[close_line..close].trim().is_empty();

        let item_indent = match items.first() {
            Some(first) if own_line => line_indent(src, first.span.start).to_string(),
            _ => format!("{}\t", line_indent(src, close)),
        };
        let missing_comma_at = items
            .last()
            .filter(|last| !contains_comma(&src[last.span.end..close]))
            .map(|last| last.span.end);

        ListLayout {
            close,
            line_entry: own_line.then_some(close_line),
            item_indent,
            missing_comma_at,
        }
    }

    fn anchors(&self) -> ObjectAnchors {
        let src = self.src;
        let entries: Vec<_> = self
            .objects_node
            .as_dict()
            .unwrap_or_default()
            .iter()
            .filter(|entry| entry.value.get_str("isa") == Some(ISA_BUILD_CONFIGURATION))
            .collect();

        let depth = entries
            .first()
            .map(|entry| {
                line_indent(src, entry.span.start)
                    .chars()
                    .filter(|c| *c == '\t')
                    .count()
            })
            .filter(|depth| *depth > 0)
            .unwrap_or(2);

        let tail = match entries.last() {
            Some(last) => {
                let end = last.span.end;
                match src[end..].find('\n') {
                    Some(nl) if is_trivia(&src[end..end + nl]) => end + nl + 1,
                    _ => end,
                }
            }
            None => line_start(src, self.objects_node.span.end - 1),
        };

        let entries = entries
            .iter()
            .map(|entry| {
                let begin = line_start(src, entry.span.start);
                let offset = if src[begin..entry.span.start].trim().is_empty() {
                    begin
                } else {
                    entry.span.start
                };
                (entry.key.clone(), offset)
            })
            .collect();

        ObjectAnchors {
            entries,
            tail,
            depth,
        }
    }
}
