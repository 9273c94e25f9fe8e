use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Object not found: {0}")]
  NotFound(String),

  #[error("Key '{key}' not found in object {id}")]
  KeyNotFound { id: String, key: String },

  #[error("Type mismatch for key '{key}' in object {id}: expected {expected}, found {found}")]
  TypeMismatch { id: String, key: String, expected: &'static str, found: &'static str },

  #[error("Unknown target type '{isa}' for object {id}")]
  UnknownTargetType { id: String, isa: String },

  #[error("Object {id} has type '{found}', expected {expected}")]
  UnexpectedEntityType { id: String, expected: &'static str, found: String },

  #[error("Malformed object {id} (field '{field}'): {source}")]
  MalformedEntity { id: String, field: &'static str, #[source] source: Box<Error> },

  #[error("Default configuration '{name}' not found for target {target}")]
  DefaultConfigurationNotFound { target: String, name: String },

  #[error("Resources build phase not found for target {0}")]
  ResourcesBuildPhaseNotFound(String),

  #[error("Failed to resolve path of object {id}: {reason}")]
  PathResolutionFailed { id: String, reason: String },

  #[error("App icon set '{name}' not found in asset catalogs: {candidates:?}")]
  AppIconSetNotFound { name: String, candidates: Vec<PathBuf> },

  #[error("Unsupported location '{0}'")]
  UnsupportedLocation(String),

  #[error("Syntax error at {line}:{column}: {message}")]
  Syntax { line: usize, column: usize, message: String },

  #[error("XML error: {0}")]
  Xml(#[from] roxmltree::Error),

  #[error("Invalid glob pattern: {0}")]
  Pattern(#[from] glob::PatternError),

  #[error("IO error on {path:?}: {source}")]
  Io { path: PathBuf, #[source] source: std::io::Error }
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  /// Whether this is an absent key, looking through entity context.
  pub fn is_key_not_found(&self) -> bool {
    match self {
      Error::KeyNotFound { .. }               => true,
      Error::MalformedEntity { source, .. }   => source.is_key_not_found(),
      _                                       => false
    }
  }

  pub fn is_not_found(&self) -> bool {
    match self {
      Error::NotFound(_)                      => true,
      Error::MalformedEntity { source, .. }   => source.is_not_found(),
      _                                       => false
    }
  }

  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Error::Io { path: path.into(), source }
  }

  pub(crate) fn malformed(id: &str, field: &'static str, source: Error) -> Self {
    Error::MalformedEntity { id: id.to_string(), field, source: Box::new(source) }
  }

  pub(crate) fn path_failed(id: &str, reason: impl Into<String>) -> Self {
    Error::PathResolutionFailed { id: id.to_string(), reason: reason.into() }
  }
}
