use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::store::{Objects, Record};

use super::{FileReference, expect_isa, parse_file_element};

const RESOURCES_BUILD_PHASE: &str = "PBXResourcesBuildPhase";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourcesBuildPhase {
  pub id:    String,
  pub files: Vec<String>
}

impl ResourcesBuildPhase {
  /// Resolves the phase's build files to the file references they point to.
  ///
  /// Build files without a file reference, pointing to a missing object, or
  /// pointing to anything but a file reference are dropped: Xcode keeps such
  /// entries around after a resource is removed or when it is localized.
  pub fn file_references(&self, objects: &Objects) -> Result<Vec<FileReference>> {
    let mut refs = Vec::new();
    for id in &self.files {
      let build_file = match parse_build_file(id, objects)? {
        Some(x) => x,
        None    => continue
      };

      match parse_file_element(&build_file.file_ref, objects) {
        Ok(Some(f)) => refs.push(f),
        Ok(None)    => {},
        Err(e) if e.is_not_found() => {
          warn!(build_file = %build_file.id, file_ref = %build_file.file_ref,
                "build file points to a missing object");
        },
        Err(e) => return Err(e)
      }
    }
    Ok(refs)
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuildFile {
  pub id:       String,
  pub file_ref: String
}

pub fn is_resources_build_phase(record: &Record<'_>) -> Result<bool> {
  let isa = record.isa().map_err(|e| Error::malformed(record.id, "isa", e))?;
  Ok(isa == RESOURCES_BUILD_PHASE)
}

pub fn parse_resources_build_phase(id: &str, objects: &Objects) -> Result<ResourcesBuildPhase> {
  let raw = objects.object(id)?;
  expect_isa(&raw, RESOURCES_BUILD_PHASE)?;

  let files = raw.identifier_list("files").map_err(|e| Error::malformed(id, "files", e))?;

  Ok(ResourcesBuildPhase {
    id:    id.to_string(),
    files: files.into_iter().map(str::to_string).collect()
  })
}

/// Parses a build file, giving `None` for placeholders without a file reference.
///
/// ```text
/// D0177B971F26869C0044446D /* (null) in Resources */ = {isa = PBXBuildFile; };
/// ```
pub fn parse_build_file(id: &str, objects: &Objects) -> Result<Option<BuildFile>> {
  let raw = objects.object(id)?;
  expect_isa(&raw, "PBXBuildFile")?;

  let file_ref = raw.optional_string("fileRef").map_err(|e| Error::malformed(id, "fileRef", e))?;
  Ok(file_ref.map(|x| BuildFile { id: id.to_string(), file_ref: x.to_string() }))
}
