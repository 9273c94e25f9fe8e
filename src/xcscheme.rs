//! Reader for `.xcscheme` files.
//!
//! Schemes are small XML documents listing what to build for each action and
//! with which build configuration. Only the attributes needed to find targets
//! and configurations are read.

use roxmltree::{Document, Node};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BuildableReference {
  pub buildable_identifier: String,
  pub blueprint_identifier: String,
  pub buildable_name:       String,
  pub blueprint_name:       String,
  pub referenced_container: String
}

impl BuildableReference {
  pub fn is_app(&self) -> bool {
    Path::new(&self.buildable_name).extension().map_or(false, |x| x == "app")
  }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BuildActionEntry {
  pub build_for_testing:   bool,
  pub build_for_running:   bool,
  pub build_for_profiling: bool,
  pub build_for_archiving: bool,
  pub build_for_analyzing: bool,
  pub buildable_reference: BuildableReference
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BuildAction {
  pub parallelize_buildables:      bool,
  pub build_implicit_dependencies: bool,
  pub entries:                     Vec<BuildActionEntry>
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TestableReference {
  pub skipped:             bool,
  pub buildable_reference: BuildableReference
}

/// Any of the test, launch, profile, analyze or archive actions.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Action {
  pub build_configuration: String,

  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub testables: Vec<TestableReference>
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scheme {
  pub name: String,
  pub path: PathBuf,

  pub build_action:   BuildAction,
  pub test_action:    Option<Action>,
  pub launch_action:  Option<Action>,
  pub profile_action: Option<Action>,
  pub analyze_action: Option<Action>,
  pub archive_action: Option<Action>
}

impl Scheme {
  pub fn open(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let name = path.file_stem().and_then(|x| x.to_str()).unwrap_or_default();
    Self::parse(name, path, &text)
  }

  pub fn parse(name: &str, path: &Path, text: &str) -> Result<Self> {
    let doc  = Document::parse(text)?;
    let root = doc.root_element();
    if !root.has_tag_name("Scheme") {
      return Err(Error::UnexpectedEntityType {
        id:       path.display().to_string(),
        expected: "Scheme",
        found:    root.tag_name().name().to_string()
      });
    }

    let build_action = match child(root, "BuildAction") {
      None    => BuildAction::default(),
      Some(n) => BuildAction {
        parallelize_buildables:      flag(n, "parallelizeBuildables"),
        build_implicit_dependencies: flag(n, "buildImplicitDependencies"),
        entries: child(n, "BuildActionEntries")
          .map(|x| children(x, "BuildActionEntry").map(build_action_entry).collect())
          .unwrap_or_default()
      }
    };

    Ok(Scheme {
      name:           name.to_string(),
      path:           path.to_path_buf(),
      test_action:    child(root, "TestAction").map(action),
      launch_action:  child(root, "LaunchAction").map(action),
      profile_action: child(root, "ProfileAction").map(action),
      analyze_action: child(root, "AnalyzeAction").map(action),
      archive_action: child(root, "ArchiveAction").map(action),
      build_action
    })
  }

  /// The first entry built for archiving that produces an application.
  pub fn app_build_action_entry(&self) -> Option<&BuildActionEntry> {
    self.build_action.entries.iter()
      .find(|x| x.build_for_archiving && x.buildable_reference.is_app())
  }
}

/// Shared schemes of a project bundle, sorted by file name.
pub fn schemes(project_path: &Path) -> Result<Vec<Scheme>> {
  let dir = project_path.join("xcshareddata").join("xcschemes");
  let dir = dir.to_str()
    .ok_or_else(|| Error::path_failed("xcschemes", "project path is not valid UTF-8"))?;

  let mut schemes = Vec::new();
  for entry in glob::glob(&[glob::Pattern::escape(dir).as_str(), "/*.xcscheme"].join(""))? {
    let path = entry.map_err(|e| Error::path_failed("xcschemes", e.to_string()))?;
    schemes.push(Scheme::open(&path)?);
  }
  debug!(project = %project_path.display(), count = schemes.len(), "loaded shared schemes");
  Ok(schemes)
}

fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
  node.children().find(|x| x.is_element() && x.has_tag_name(name))
}

fn children<'a, 'i: 'a>(node: Node<'a, 'i>, name: &'a str) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
  node.children().filter(move |x| x.is_element() && x.has_tag_name(name))
}

fn attr(node: Node<'_, '_>, name: &str) -> String {
  node.attribute(name).unwrap_or_default().to_string()
}

fn flag(node: Node<'_, '_>, name: &str) -> bool {
  node.attribute(name) == Some("YES")
}

fn buildable_reference(node: Node<'_, '_>) -> BuildableReference {
  match child(node, "BuildableReference") {
    None    => BuildableReference::default(),
    Some(n) => BuildableReference {
      buildable_identifier: attr(n, "BuildableIdentifier"),
      blueprint_identifier: attr(n, "BlueprintIdentifier"),
      buildable_name:       attr(n, "BuildableName"),
      blueprint_name:       attr(n, "BlueprintName"),
      referenced_container: attr(n, "ReferencedContainer")
    }
  }
}

fn build_action_entry(node: Node<'_, '_>) -> BuildActionEntry {
  BuildActionEntry {
    build_for_testing:   flag(node, "buildForTesting"),
    build_for_running:   flag(node, "buildForRunning"),
    build_for_profiling: flag(node, "buildForProfiling"),
    build_for_archiving: flag(node, "buildForArchiving"),
    build_for_analyzing: flag(node, "buildForAnalyzing"),
    buildable_reference: buildable_reference(node)
  }
}

fn action(node: Node<'_, '_>) -> Action {
  Action {
    build_configuration: attr(node, "buildConfiguration"),
    testables: child(node, "Testables")
      .map(|x| children(x, "TestableReference")
           .map(|t| TestableReference {
             skipped:             flag(t, "skipped"),
             buildable_reference: buildable_reference(t)
           })
           .collect())
      .unwrap_or_default()
  }
}
