//! Typed entities parsed out of the object store.
//!
//! Xcode supports the following object types as the value of the "isa" property:
//! - PBXProject                    The root object describing the project.
//! - PBXTarget
//!   - PBXAggregateTarget          A target aggregating several others.
//!   - PBXLegacyTarget             A target produced using an external build tool.
//!   - PBXNativeTarget             A target producing a native application or library.
//! - PBXTargetDependency           A PBXNativeTarget to PBXContainerItemProxy dependency.
//! - PBXContainerItemProxy         A reference to another object from the same workspace.
//! - PBXBuildFile                  A file reference used in a PBXBuildPhase.
//! - PBXFileElement
//!   - PBXFileReference            An external file referenced by the project.
//!   - PBXGroup                    Container for PBXFileReference and PBXGroup objects.
//!   - PBXVariantGroup             Gathers localized files for a PBXFileRefence object.
//!   - XCVersionGroup              Gathers the versions of a Core Data model.
//! - PBXBuildPhase                 Describes a step in the build process.
//!   - PBXResourcesBuildPhase      The only phase read here.
//! - XCBuildConfiguration          Compiler, linker and target settings.
//! - XCConfigurationList           A list of XCBuildConfiguration objects.
//!
//! Parsers are plain functions taking an identifier and the store. Nested
//! identifiers are resolved eagerly, so a parsed entity never reads the store
//! again.

mod config;
mod file;
mod phase;
mod project;
mod target;

pub use config::{BuildConfiguration, BuildConfigurationList, parse_configuration_list};
pub use file::{ElementKind, FileReference, SourceTree, parse_file_element, parse_file_reference};
pub use phase::{BuildFile, ResourcesBuildPhase, is_resources_build_phase, parse_build_file,
                parse_resources_build_phase};
pub use project::{Project, parse_project};
pub use target::{DependencyTarget, ProductReference, Target, TargetDependency, TargetType,
                 parse_target, parse_target_dependency};

use crate::error::{Error, Result};
use crate::store::Record;

/// Checks the discriminator of a record against the expected type.
fn expect_isa(record: &Record<'_>, expected: &'static str) -> Result<()> {
  let isa = record.isa().map_err(|e| Error::malformed(record.id, "isa", e))?;
  match isa == expected {
    true  => Ok(()),
    false => Err(Error::UnexpectedEntityType {
      id:    record.id.to_string(),
      found: isa.to_string(),
      expected
    })
  }
}
