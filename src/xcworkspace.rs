//! Reader for `.xcworkspace` bundles.
//!
//! A workspace is a folder holding `contents.xcworkspacedata`, an XML document
//! of file references optionally organized into groups. Each `location` is a
//! path prefixed by what it is relative to.

use roxmltree::{Document, Node};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::path::{absolute, normalize};

const CONTENTS: &str = "contents.xcworkspacedata";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Workspace {
  pub name:      String,
  pub path:      PathBuf,
  pub file_refs: Vec<FileRef>,
  pub groups:    Vec<Group>
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileRef {
  pub location: String
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Group {
  pub location:  String,
  pub name:      Option<String>,
  pub file_refs: Vec<FileRef>,
  pub groups:    Vec<Group>
}

impl FileRef {
  /// `parent` is the resolved path of the enclosing group, or the workspace's
  /// directory at the top level.
  pub fn abs_path(&self, parent: &Path, workspace: &Path) -> Result<PathBuf> {
    resolve_location(&self.location, parent, workspace)
  }
}

impl Group {
  pub fn abs_path(&self, parent: &Path, workspace: &Path) -> Result<PathBuf> {
    resolve_location(&self.location, parent, workspace)
  }
}

impl Workspace {
  pub fn open(path: &Path) -> Result<Self> {
    let path = absolute(path)?;
    let file = path.join(CONTENTS);
    let text = std::fs::read_to_string(&file).map_err(|e| Error::io(&file, e))?;
    let doc  = Document::parse(&text)?;
    let root = doc.root_element();
    if !root.has_tag_name("Workspace") {
      return Err(Error::UnexpectedEntityType {
        id:       file.display().to_string(),
        expected: "Workspace",
        found:    root.tag_name().name().to_string()
      });
    }

    let (file_refs, groups) = contents(root);
    debug!(path = %path.display(), file_refs = file_refs.len(), groups = groups.len(), "loaded workspace");

    Ok(Workspace {
      name: path.file_stem().and_then(|x| x.to_str()).unwrap_or_default().to_string(),
      path,
      file_refs,
      groups
    })
  }

  /// The folder containing the workspace bundle.
  pub fn dir(&self) -> &Path {
    self.path.parent().unwrap_or_else(|| Path::new("/"))
  }

  /// Every referenced `.xcodeproj`, in document order.
  pub fn project_paths(&self) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    self.collect_projects(self.dir(), &self.file_refs, &self.groups, &mut paths)?;
    Ok(paths)
  }

  fn collect_projects(&self, parent: &Path, file_refs: &[FileRef], groups: &[Group],
                      out: &mut Vec<PathBuf>) -> Result<()>
  {
    for file_ref in file_refs {
      let path = file_ref.abs_path(parent, &self.path)?;
      if path.extension().map_or(false, |x| x == "xcodeproj") {
        out.push(path);
      }
    }
    for group in groups {
      let dir = group.abs_path(parent, &self.path)?;
      self.collect_projects(&dir, &group.file_refs, &group.groups, out)?;
    }
    Ok(())
  }
}

fn resolve_location(location: &str, parent: &Path, workspace: &Path) -> Result<PathBuf> {
  let (kind, rest) = match location.find(':') {
    Some(i) => (&location[.. i], &location[i + 1 ..]),
    None    => return Err(Error::UnsupportedLocation(location.to_string()))
  };

  let path = match kind {
    "group"     => parent.join(rest),
    "container" => workspace.parent().unwrap_or_else(|| Path::new("/")).join(rest),
    "absolute"  => PathBuf::from(rest),
    "self"      => workspace.join(rest),
    _           => return Err(Error::UnsupportedLocation(location.to_string()))
  };
  Ok(normalize(&path))
}

fn contents(node: Node<'_, '_>) -> (Vec<FileRef>, Vec<Group>) {
  let mut file_refs = Vec::new();
  let mut groups    = Vec::new();
  for child in node.children().filter(Node::is_element) {
    let location = child.attribute("location").unwrap_or_default().to_string();
    match child.tag_name().name() {
      "FileRef" => file_refs.push(FileRef { location }),
      "Group"   => {
        let (file_refs, nested) = contents(child);
        groups.push(Group {
          location,
          name:   child.attribute("name").map(str::to_string),
          file_refs,
          groups: nested
        });
      },
      _ => {}
    }
  }
  (file_refs, groups)
}
