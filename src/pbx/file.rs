use serde::{Serialize, Serializer};
use tracing::{trace, warn};

use crate::error::{Error, Result};
use crate::store::Objects;

/// How the stored path of a file element combines with its surroundings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceTree {
  /// Relative to the enclosing group.
  Group,
  /// Relative to the project's source root.
  SourceRoot,
  /// The stored path is already absolute.
  Absolute,
  /// Relative to a build setting such as BUILT_PRODUCTS_DIR or SDKROOT.
  Named(String)
}

impl SourceTree {
  pub fn parse(s: &str) -> Self {
    match s {
      "<group>"     => SourceTree::Group,
      "SOURCE_ROOT" => SourceTree::SourceRoot,
      "<absolute>"  => SourceTree::Absolute,
      _             => SourceTree::Named(s.to_string())
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      SourceTree::Group      => "<group>",
      SourceTree::SourceRoot => "SOURCE_ROOT",
      SourceTree::Absolute   => "<absolute>",
      SourceTree::Named(s)   => s
    }
  }
}

impl Serialize for SourceTree {
  fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(self.as_str())
  }
}

/// The file element types a PBXBuildFile or PBXGroup may point to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
  FileReference,
  Group,
  VariantGroup,
  VersionGroup,
  ReferenceProxy
}

impl ElementKind {
  pub fn from_isa(isa: &str) -> Option<Self> {
    match isa {
      "PBXFileReference"  => Some(ElementKind::FileReference),
      "PBXGroup"          => Some(ElementKind::Group),
      "PBXVariantGroup"   => Some(ElementKind::VariantGroup),
      "XCVersionGroup"    => Some(ElementKind::VersionGroup),
      "PBXReferenceProxy" => Some(ElementKind::ReferenceProxy),
      _                   => None
    }
  }

  /// Whether elements of this kind hold a `children` list.
  pub fn is_group(self) -> bool {
    match self {
      ElementKind::Group | ElementKind::VariantGroup | ElementKind::VersionGroup => true,
      ElementKind::FileReference | ElementKind::ReferenceProxy                   => false
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileReference {
  pub id:          String,
  pub path:        String,
  pub name:        Option<String>,
  pub source_tree: SourceTree
}

impl FileReference {
  pub fn has_extension(&self, ext: &str) -> bool {
    std::path::Path::new(&self.path).extension().map_or(false, |x| x == ext)
  }
}

pub fn parse_file_reference(id: &str, objects: &Objects) -> Result<FileReference> {
  let raw = objects.object(id)?;
  super::expect_isa(&raw, "PBXFileReference")?;

  let path        = raw.string("path").map_err(|e| Error::malformed(id, "path", e))?;
  let name        = raw.optional_string("name").map_err(|e| Error::malformed(id, "name", e))?;
  let source_tree = raw.string("sourceTree").map_err(|e| Error::malformed(id, "sourceTree", e))?;

  Ok(FileReference {
    id:          id.to_string(),
    path:        path.to_string(),
    name:        name.map(str::to_string),
    source_tree: SourceTree::parse(source_tree)
  })
}

/// Parses the element a build file points to, if it is a single file.
///
/// Groups and reference proxies are valid build file targets but never a lone
/// file on disk, those give `None`. So do unknown types, with a warning.
pub fn parse_file_element(id: &str, objects: &Objects) -> Result<Option<FileReference>> {
  let raw = objects.object(id)?;
  let isa = raw.isa().map_err(|e| Error::malformed(id, "isa", e))?;
  match ElementKind::from_isa(isa) {
    Some(ElementKind::FileReference) => parse_file_reference(id, objects).map(Some),
    Some(kind) => {
      trace!(id, ?kind, "skipping non-file element");
      Ok(None)
    },
    None => {
      warn!(id, isa, "skipping unknown file element type");
      Ok(None)
    }
  }
}
