//! Absolute paths for file elements.
//!
//! A file element stores a path along with a `sourceTree` telling what that
//! path is relative to. The common case, `<group>`, makes it relative to the
//! enclosing group, which is itself resolved the same way up to the project's
//! main group. Since groups only list their children, the enclosing group of
//! every element is indexed up front.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::pbx::{ElementKind, Project, SourceTree};
use crate::store::Objects;

pub struct PathResolver<'a> {
  objects:      &'a Objects,
  source_root:  PathBuf,
  main_group:   String,
  parents:      HashMap<&'a str, &'a str>,
  source_trees: &'a BTreeMap<String, PathBuf>
}

impl<'a> PathResolver<'a> {
  /// `project_path` is the absolute path of the `.xcodeproj` bundle.
  /// `source_trees` maps named trees such as BUILT_PRODUCTS_DIR to directories.
  pub fn new(objects: &'a Objects, project: &Project, project_path: &Path,
             source_trees: &'a BTreeMap<String, PathBuf>) -> Self
  {
    let project_dir = project_path.parent().unwrap_or_else(|| Path::new("/"));
    PathResolver {
      objects,
      source_trees,
      source_root: normalize(&project_dir.join(&project.project_dir_path)),
      main_group:  project.main_group.clone(),
      parents:     index_parents(objects)
    }
  }

  pub fn source_root(&self) -> &Path {
    &self.source_root
  }

  /// The group listing the given element as a child, if any.
  pub fn parent(&self, id: &str) -> Option<&'a str> {
    self.parents.get(id).copied()
  }

  pub fn resolve(&self, id: &str) -> Result<PathBuf> {
    self.resolve_in(id, &mut HashSet::new())
  }

  fn resolve_in(&self, id: &str, visited: &mut HashSet<String>) -> Result<PathBuf> {
    if !visited.insert(id.to_string()) {
      return Err(Error::path_failed(id, "group hierarchy contains a cycle"));
    }

    let raw = self.objects.object(id).map_err(|e| Error::path_failed(id, e.to_string()))?;
    let isa = raw.isa().map_err(|e| Error::path_failed(id, e.to_string()))?;
    if ElementKind::from_isa(isa).is_none() {
      return Err(Error::path_failed(id, format!("'{}' is not a file element", isa)));
    }

    let path = raw.optional_string("path").map_err(|e| Error::path_failed(id, e.to_string()))?;
    let tree = raw.string("sourceTree")
      .map(SourceTree::parse)
      .map_err(|e| Error::path_failed(id, e.to_string()))?;

    let base = match &tree {
      SourceTree::Group => match self.parent(id) {
        Some(parent)                   => self.resolve_in(parent, visited)?,
        None if id == self.main_group  => self.source_root.clone(),
        None                           => return Err(Error::path_failed(id, "no enclosing group"))
      },
      SourceTree::SourceRoot => self.source_root.clone(),
      SourceTree::Absolute   => match path {
        Some(p) => return Ok(normalize(Path::new(p))),
        None    => return Err(Error::path_failed(id, "absolute element without a path"))
      },
      SourceTree::Named(name) => match self.source_trees.get(name) {
        Some(dir) => dir.clone(),
        None      => return Err(Error::path_failed(id, format!("unknown source tree '{}'", name)))
      }
    };

    let resolved = match path {
      Some(p) => normalize(&base.join(p)),
      None    => base
    };
    trace!(id, tree = tree.as_str(), path = %resolved.display(), "resolved element path");
    Ok(resolved)
  }
}

fn index_parents(objects: &Objects) -> HashMap<&str, &str> {
  let mut parents = HashMap::new();
  for record in objects.records() {
    let is_group = record.isa().ok()
      .and_then(ElementKind::from_isa)
      .map_or(false, ElementKind::is_group);
    if !is_group {
      continue;
    }

    match record.optional_identifier_list("children") {
      Ok(children) => for child in children.unwrap_or_default() {
        parents.entry(child).or_insert(record.id);
      },
      Err(e) => warn!(group = record.id, error = %e, "ignoring malformed group children")
    }
  }
  parents
}

/// Lexically removes `.` and `..` components. Symlinks are not followed.
pub fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for c in path.components() {
    match c {
      Component::CurDir    => {},
      Component::ParentDir => match out.components().next_back() {
        Some(Component::Normal(_))                          => { out.pop(); },
        Some(Component::RootDir) | Some(Component::Prefix(_)) => {},
        _                                                   => out.push("..")
      },
      c => out.push(c.as_os_str())
    }
  }
  out
}

/// Makes a path absolute against the current directory, then normalizes it.
pub fn absolute(path: &Path) -> Result<PathBuf> {
  match path.is_absolute() {
    true  => Ok(normalize(path)),
    false => {
      let cwd = std::env::current_dir().map_err(|e| Error::io(path, e))?;
      Ok(normalize(&cwd.join(path)))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::pbx::{fixtures::objects, parse_project};

  const RAW: &str = r#"{
    P  = { isa = PBXProject; mainGroup = G0; projectDirPath = ""; targets = ( ); };
    G0 = { isa = PBXGroup; children = ( G1, F3, G4 ); sourceTree = "<group>"; };
    G1 = { isa = PBXGroup; children = ( G2 ); path = App; sourceTree = "<group>"; };
    G2 = { isa = PBXGroup; children = ( F1, V1 ); path = Resources; sourceTree = "<group>"; };
    F1 = { isa = PBXFileReference; path = Assets.xcassets; sourceTree = "<group>"; };
    V1 = { isa = PBXVariantGroup; children = ( F2 ); name = Main.storyboard; sourceTree = "<group>"; };
    F2 = { isa = PBXFileReference; name = Base; path = Base.lproj/Main.storyboard; sourceTree = "<group>"; };
    F3 = { isa = PBXFileReference; path = ./Shared/Icons.xcassets; sourceTree = SOURCE_ROOT; };
    G4 = { isa = PBXGroup; children = ( F4 ); path = /opt/assets; sourceTree = "<absolute>"; };
    F4 = { isa = PBXFileReference; path = ../Brand.xcassets; sourceTree = "<group>"; };
    F5 = { isa = PBXFileReference; path = Orphan.xcassets; sourceTree = "<group>"; };
    F6 = { isa = PBXFileReference; path = Gen.xcassets; sourceTree = BUILT_PRODUCTS_DIR; };
    C1 = { isa = PBXGroup; children = ( C2 ); path = a; sourceTree = "<group>"; };
    C2 = { isa = PBXGroup; children = ( C1, F7 ); path = b; sourceTree = "<group>"; };
    F7 = { isa = PBXFileReference; path = Loop.xcassets; sourceTree = "<group>"; };
    B1 = { isa = PBXBuildFile; fileRef = F1; };
  }"#;

  fn check<F>(trees: &BTreeMap<String, PathBuf>, f: F) where F: FnOnce(&PathResolver<'_>) {
    let objects  = objects("P", RAW);
    let project  = parse_project(&objects).unwrap();
    let resolver = PathResolver::new(&objects, &project, Path::new("/work/Demo.xcodeproj"), trees);
    f(&resolver);
  }

  #[test]
  fn group_relative_paths() {
    check(&BTreeMap::new(), |r| {
      assert_eq!(r.source_root(), Path::new("/work"));
      assert_eq!(r.resolve("G0").unwrap(), PathBuf::from("/work"));
      assert_eq!(r.resolve("F1").unwrap(), PathBuf::from("/work/App/Resources/Assets.xcassets"));
      assert_eq!(r.resolve("F2").unwrap(), PathBuf::from("/work/App/Resources/Base.lproj/Main.storyboard"));
    });
  }

  #[test]
  fn anchored_paths() {
    check(&BTreeMap::new(), |r| {
      assert_eq!(r.resolve("F3").unwrap(), PathBuf::from("/work/Shared/Icons.xcassets"));
      assert_eq!(r.resolve("G4").unwrap(), PathBuf::from("/opt/assets"));
      assert_eq!(r.resolve("F4").unwrap(), PathBuf::from("/opt/Brand.xcassets"));
    });
  }

  #[test]
  fn named_source_trees() {
    check(&BTreeMap::new(), |r| {
      assert!(matches!(r.resolve("F6"), Err(Error::PathResolutionFailed { .. })));
    });

    let mut trees = BTreeMap::new();
    trees.insert("BUILT_PRODUCTS_DIR".to_string(), PathBuf::from("/build/Release"));
    check(&trees, |r| {
      assert_eq!(r.resolve("F6").unwrap(), PathBuf::from("/build/Release/Gen.xcassets"));
    });
  }

  #[test]
  fn unresolvable_paths() {
    check(&BTreeMap::new(), |r| {
      for id in &["F5", "F7", "B1", "MISSING"] {
        match r.resolve(id) {
          Err(Error::PathResolutionFailed { .. }) => {},
          other => panic!("{} resolved to {:?}", id, other)
        }
      }
    });
  }

  #[test]
  fn normalization() {
    assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
    assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    assert_eq!(normalize(Path::new("../a/..")), PathBuf::from(".."));
    assert_eq!(absolute(Path::new("/x/y/../z")).unwrap(), PathBuf::from("/x/z"));
  }
}
