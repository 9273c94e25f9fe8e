//! App icon set lookup.
//!
//! The icon set used by a target is named by the ASSETCATALOG_COMPILER_APPICON_NAME
//! build setting of its default build configuration. The set itself is a
//! `<name>.appiconset` folder inside one of the asset catalogs listed in the
//! target's Resources build phase:
//!
//! ```text
//! PBXNativeTarget
//!   buildConfigurationList -> XCConfigurationList
//!     defaultConfigurationName, buildConfigurations -> XCBuildConfiguration
//!       buildSettings.ASSETCATALOG_COMPILER_APPICON_NAME
//!   buildPhases -> PBXResourcesBuildPhase
//!     files -> PBXBuildFile
//!       fileRef -> PBXFileReference (*.xcassets)
//! ```
//!
//! Build settings are not evaluated. When the name refers to another setting,
//! as in `AppIcon${ASSET_TAG}`, everything from the reference on becomes a
//! wildcard and every matching set is returned.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::path::PathResolver;
use crate::pbx::{FileReference, ResourcesBuildPhase, Target, TargetType, is_resources_build_phase,
                 parse_resources_build_phase};
use crate::store::Value;
use crate::xcodeproj::XcodeProj;

pub const APP_ICON_NAME_SETTING: &str = "ASSETCATALOG_COMPILER_APPICON_NAME";

/// Target identifiers mapped to the app icon sets they use.
pub type TargetsToAppIconSets = BTreeMap<String, Vec<PathBuf>>;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct IconOptions {
  /// Build setting naming the app icon set.
  pub setting: String,

  pub catalog_extension:  String,
  pub icon_set_extension: String,

  /// Build configuration to read instead of each list's default.
  pub configuration: Option<String>,

  /// Directories for named source trees, such as BUILT_PRODUCTS_DIR.
  pub source_trees: BTreeMap<String, PathBuf>
}

impl Default for IconOptions {
  fn default() -> Self {
    IconOptions {
      setting:            APP_ICON_NAME_SETTING.to_string(),
      catalog_extension:  "xcassets".to_string(),
      icon_set_extension: "appiconset".to_string(),
      configuration:      None,
      source_trees:       BTreeMap::new()
    }
  }
}

/// Maps every target of the project at `project_path` to its app icon sets.
pub fn resolve_app_icon_sets<P: AsRef<Path>>(project_path: P) -> Result<TargetsToAppIconSets> {
  resolve_app_icon_sets_with(project_path.as_ref(), &IconOptions::default())
}

pub fn resolve_app_icon_sets_with(project_path: &Path, options: &IconOptions) -> Result<TargetsToAppIconSets> {
  let proj = XcodeProj::open(project_path)?;
  Locator::new(&proj, options).app_icon_sets()
}

/// Turns an icon set name into a glob, replacing any build setting reference
/// and what follows it with `*`. The literal part is escaped.
pub fn icon_set_glob(name: &str) -> String {
  let marker = ["${", "$("].iter().filter_map(|m| name.find(m)).min();
  match marker {
    Some(i) => [glob::Pattern::escape(&name[.. i]).as_str(), "*"].join(""),
    None    => glob::Pattern::escape(name)
  }
}

pub struct Locator<'a> {
  proj:     &'a XcodeProj,
  options:  &'a IconOptions,
  resolver: PathResolver<'a>
}

impl<'a> Locator<'a> {
  pub fn new(proj: &'a XcodeProj, options: &'a IconOptions) -> Self {
    Locator { proj, options, resolver: proj.resolver(&options.source_trees) }
  }

  /// Every target naming an app icon set, mapped to the sets found on disk.
  ///
  /// Either every target resolves or the first failure is returned.
  pub fn app_icon_sets(&self) -> Result<TargetsToAppIconSets> {
    let mut named = Vec::new();
    for target in &self.proj.project.targets {
      match self.app_icon_set_name(target)? {
        Some(name) => named.push((target, name)),
        None       => debug!(target_name = %target.name, "no app icon set configured")
      }
    }

    let mut result = TargetsToAppIconSets::new();
    for (target, name) in named {
      let catalogs = self.asset_catalogs(target)?;
      if catalogs.is_empty() {
        debug!(target_name = %target.name, "no asset catalogs");
        continue;
      }

      let paths = self.lookup(&name, &catalogs)?;
      debug!(target_name = %target.name, icon = %name, count = paths.len(), "found app icon sets");
      result.insert(target.id.clone(), paths);
    }
    Ok(result)
  }

  /// Reads the icon set name from the target's default build configuration.
  pub fn app_icon_set_name(&self, target: &Target) -> Result<Option<String>> {
    let list = &target.build_configuration_list;
    let name = self.options.configuration.as_deref().unwrap_or(&list.default_configuration_name);

    let config = list.configuration(name).ok_or_else(|| Error::DefaultConfigurationNotFound {
      target: target.id.clone(),
      name:   name.to_string()
    })?;

    match config.build_settings.get(&self.options.setting) {
      None                   => Ok(None),
      Some(Value::String(s)) => Ok(Some(s.clone())),
      Some(v)                => Err(Error::TypeMismatch {
        id:       config.id.clone(),
        key:      self.options.setting.clone(),
        expected: "string",
        found:    v.kind()
      })
    }
  }

  /// Asset catalogs in the target's Resources build phase, in phase order.
  ///
  /// Aggregate and legacy targets don't copy resources and yield nothing.
  pub fn asset_catalogs(&self, target: &Target) -> Result<Vec<FileReference>> {
    if target.target_type != TargetType::Native {
      return Ok(Vec::new());
    }

    let phase = self.resources_build_phase(target)?;
    let refs  = phase.file_references(&self.proj.objects)?;
    Ok(refs.into_iter().filter(|x| x.has_extension(&self.options.catalog_extension)).collect())
  }

  fn resources_build_phase(&self, target: &Target) -> Result<ResourcesBuildPhase> {
    let objects = &self.proj.objects;
    for id in &target.build_phase_ids {
      if is_resources_build_phase(&objects.object(id)?)? {
        return parse_resources_build_phase(id, objects);
      }
    }
    Err(Error::ResourcesBuildPhaseNotFound(target.id.clone()))
  }

  /// Finds the icon set in every candidate catalog.
  pub fn lookup(&self, name: &str, catalogs: &[FileReference]) -> Result<Vec<PathBuf>> {
    let file_name = [icon_set_glob(name).as_str(), ".", self.options.icon_set_extension.as_str()].join("");

    let mut candidates = Vec::with_capacity(catalogs.len());
    let mut paths      = Vec::new();
    for catalog in catalogs {
      let dir = self.resolver.resolve(&catalog.id)?;
      let dir_str = dir.to_str()
        .ok_or_else(|| Error::path_failed(&catalog.id, "path is not valid UTF-8"))?;

      let pattern = [glob::Pattern::escape(dir_str).as_str(), "/", file_name.as_str()].join("");
      for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| Error::path_failed(&catalog.id, e.to_string()))?;
        if !paths.contains(&path) {
          paths.push(path);
        }
      }
      candidates.push(dir);
    }

    match paths.is_empty() {
      true  => Err(Error::AppIconSetNotFound { name: name.to_string(), candidates }),
      false => Ok(paths)
    }
  }
}
