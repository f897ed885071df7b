//! Test fixtures
//!
//! - A Flutter `Runner.xcodeproj` descriptor (project plus `Runner` and
//!   `RunnerTests` targets, each with Debug/Release/Profile)
//! - A builder for small synthetic descriptors

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use xcflavors::{Project, ScopeKey};
use xcflavors_pbxproj::{quote, Value};

/// Path to the Runner fixture descriptor
pub fn runner_fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Runner.xcodeproj/project.pbxproj")
}

pub fn runner_fixture_source() -> String {
    fs::read_to_string(runner_fixture_path()).expect("Runner fixture missing")
}

/// Copy the Runner fixture to `<dir>/ios/Runner.xcodeproj/project.pbxproj`,
/// the default location, and return the descriptor path.
pub fn install_runner_fixture(dir: &Path) -> PathBuf {
    let bundle = dir.join("ios/Runner.xcodeproj");
    fs::create_dir_all(&bundle).unwrap();
    let path = bundle.join("project.pbxproj");
    fs::write(&path, runner_fixture_source()).unwrap();
    path
}

/// Configuration names of a scope, in order
pub fn names(project: &Project, key: ScopeKey) -> Vec<String> {
    project
        .list(key)
        .map(|list| list.names().into_iter().map(String::from).collect())
        .unwrap_or_default()
}

/// Key of the target called `name`
pub fn target_key(project: &Project, name: &str) -> ScopeKey {
    let index = project
        .targets()
        .iter()
        .position(|t| t.name == name)
        .unwrap_or_else(|| panic!("no target named {}", name));
    ScopeKey::Target(index)
}

/// Lines of `output` that are not in `original`, if `original`'s lines
/// appear in `output` in order; `None` otherwise.
pub fn added_lines<'a>(original: &str, output: &'a str) -> Option<Vec<&'a str>> {
    let mut expected = original.lines().peekable();
    let mut added = Vec::new();
    for line in output.lines() {
        if expected.peek() == Some(&line) {
            expected.next();
        } else {
            added.push(line);
        }
    }
    expected.peek().is_none().then_some(added)
}

type Settings = Vec<(String, String)>;

/// Builds minimal descriptors with chosen configurations per scope.
#[derive(Default)]
pub struct DescriptorBuilder {
    project: Vec<(String, Settings)>,
    targets: Vec<(String, Vec<(String, Settings)>)>,
}

fn owned(settings: &[(&str, &str)]) -> Settings {
    settings
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl DescriptorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_config(mut self, name: &str, settings: &[(&str, &str)]) -> Self {
        self.project.push((name.to_string(), owned(settings)));
        self
    }

    /// Start a new target; following `target_config` calls add to it.
    pub fn target(mut self, name: &str) -> Self {
        self.targets.push((name.to_string(), Vec::new()));
        self
    }

    pub fn target_config(mut self, name: &str, settings: &[(&str, &str)]) -> Self {
        let (_, configs) = self.targets.last_mut().expect("target_config before target");
        configs.push((name.to_string(), owned(settings)));
        self
    }

    pub fn build(&self) -> String {
        let mut next = 0u64;
        let mut id = || {
            next += 1;
            format!("{:024X}", next)
        };

        let project_id = id();
        let project_list = id();
        let mut configs = Vec::new();
        let mut lists = Vec::new();
        let mut target_blocks = Vec::new();
        let mut target_refs = Vec::new();

        let project_config_ids: Vec<String> = self
            .project
            .iter()
            .map(|(name, settings)| {
                let cid = id();
                configs.push((cid.clone(), name.clone(), settings.clone()));
                cid
            })
            .collect();
        lists.push((project_list.clone(), project_config_ids, self.project.clone()));

        for (target, target_configs) in &self.targets {
            let tid = id();
            let lid = id();
            let ids: Vec<String> = target_configs
                .iter()
                .map(|(name, settings)| {
                    let cid = id();
                    configs.push((cid.clone(), name.clone(), settings.clone()));
                    cid
                })
                .collect();
            lists.push((lid.clone(), ids, target_configs.clone()));
            target_blocks.push(format!(
                "\t\t{tid} /* {t} */ = {{\n\t\t\tisa = PBXNativeTarget;\n\t\t\tbuildConfigurationList = {lid};\n\t\t\tname = {name};\n\t\t}};\n",
                tid = tid,
                t = target,
                lid = lid,
                name = quote(target),
            ));
            target_refs.push(format!("\t\t\t\t{} /* {} */,\n", tid, target));
        }

        let mut out = String::from("// !$*UTF8*$!\n{\n\tarchiveVersion = 1;\n\tclasses = {\n\t};\n\tobjectVersion = 54;\n\tobjects = {\n\n");

        out.push_str("/* Begin PBXNativeTarget section */\n");
        for block in &target_blocks {
            out.push_str(block);
        }
        out.push_str("/* End PBXNativeTarget section */\n\n");

        out.push_str("/* Begin PBXProject section */\n");
        out.push_str(&format!(
            "\t\t{} /* Project object */ = {{\n\t\t\tisa = PBXProject;\n\t\t\tbuildConfigurationList = {};\n\t\t\ttargets = (\n{}\t\t\t);\n\t\t}};\n",
            project_id,
            project_list,
            target_refs.concat()
        ));
        out.push_str("/* End PBXProject section */\n\n");

        out.push_str("/* Begin XCBuildConfiguration section */\n");
        for (cid, name, settings) in &configs {
            out.push_str(&format!(
                "\t\t{} /* {} */ = {{\n\t\t\tisa = XCBuildConfiguration;\n\t\t\tbuildSettings = {{\n",
                cid, name
            ));
            for (k, v) in settings {
                out.push_str(&format!("\t\t\t\t{} = {};\n", quote(k), quote(v)));
            }
            out.push_str(&format!("\t\t\t}};\n\t\t\tname = {};\n\t\t}};\n", quote(name)));
        }
        out.push_str("/* End XCBuildConfiguration section */\n\n");

        out.push_str("/* Begin XCConfigurationList section */\n");
        for (lid, ids, named) in &lists {
            out.push_str(&format!(
                "\t\t{} = {{\n\t\t\tisa = XCConfigurationList;\n\t\t\tbuildConfigurations = (\n",
                lid
            ));
            for (cid, (name, _)) in ids.iter().zip(named.iter()) {
                out.push_str(&format!("\t\t\t\t{} /* {} */,\n", cid, name));
            }
            out.push_str("\t\t\t);\n\t\t\tdefaultConfigurationIsVisible = 0;\n\t\t};\n");
        }
        out.push_str("/* End XCConfigurationList section */\n");

        out.push_str(&format!(
            "\t}};\n\trootObject = {} /* Project object */;\n}}\n",
            project_id
        ));
        out
    }

    /// Build and load as `<name>.xcodeproj/project.pbxproj`
    pub fn load(&self, name: &str) -> Project {
        Project::from_source(format!("{}.xcodeproj/project.pbxproj", name), self.build())
            .expect("builder produced an invalid descriptor")
    }
}

/// `{key: value}` settings as a plain value map, for comparisons
pub fn settings(pairs: &[(&str, &str)]) -> indexmap::IndexMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::from(*v)))
        .collect()
}
