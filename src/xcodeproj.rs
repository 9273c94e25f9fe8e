use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::path::{PathResolver, absolute};
use crate::pbx::{Project, parse_project};
use crate::plist;
use crate::store::Objects;
use crate::xcscheme::{self, Scheme};

const PBXPROJ: &str = "project.pbxproj";

/// A loaded `.xcodeproj` bundle.
#[derive(Debug)]
pub struct XcodeProj {
  pub path:    PathBuf,
  pub objects: Objects,
  pub project: Project
}

impl XcodeProj {
  /// Opens either the bundle itself or the project.pbxproj file inside it.
  pub fn open(path: &Path) -> Result<Self> {
    let path = absolute(path)?;
    let path = match path.file_name().map_or(false, |x| x == PBXPROJ) {
      true  => path.parent().map(Path::to_path_buf).unwrap_or_default(),
      false => path
    };

    let objects = Objects::from_document(plist::open(&path.join(PBXPROJ))?)?;
    let project = parse_project(&objects)?;
    debug!(path = %path.display(), objects = objects.len(), targets = project.targets.len(),
           "loaded project");

    Ok(XcodeProj { path, objects, project })
  }

  pub fn resolver<'a>(&'a self, source_trees: &'a BTreeMap<String, PathBuf>) -> PathResolver<'a> {
    PathResolver::new(&self.objects, &self.project, &self.path, source_trees)
  }

  /// Shared schemes stored in the bundle, sorted by file name.
  pub fn schemes(&self) -> Result<Vec<Scheme>> {
    xcscheme::schemes(&self.path)
  }
}
