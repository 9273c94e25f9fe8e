use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::store::Objects;

use super::{BuildConfigurationList, expect_isa, parse_configuration_list};

const APPLICATION_PRODUCT_TYPE:   &str = "com.apple.product-type.application";
const APP_EXTENSION_PRODUCT_TYPE: &str = "com.apple.product-type.app-extension";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TargetType {
  #[serde(rename = "PBXNativeTarget")]
  Native,
  #[serde(rename = "PBXAggregateTarget")]
  Aggregate,
  #[serde(rename = "PBXLegacyTarget")]
  Legacy
}

impl TargetType {
  pub fn from_isa(isa: &str) -> Option<Self> {
    match isa {
      "PBXNativeTarget"    => Some(TargetType::Native),
      "PBXAggregateTarget" => Some(TargetType::Aggregate),
      "PBXLegacyTarget"    => Some(TargetType::Legacy),
      _                    => None
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Target {
  #[serde(rename = "type")]
  pub target_type:              TargetType,
  pub id:                       String,
  pub name:                     String,
  pub build_configuration_list: BuildConfigurationList,
  pub dependencies:             Vec<TargetDependency>,
  pub product_reference:        Option<ProductReference>,

  #[serde(skip)]
  pub product_type: Option<String>,

  #[serde(skip)]
  pub build_phase_ids: Vec<String>
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TargetDependency {
  pub id:     String,
  pub target: DependencyTarget
}

/// The target a dependency points to.
///
/// Dependencies are expanded eagerly. A target already being expanded further
/// up the chain is recorded by identifier instead, which stops cycles.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DependencyTarget {
  Resolved(Box<Target>),
  BackReference(String)
}

impl DependencyTarget {
  pub fn id(&self) -> &str {
    match self {
      DependencyTarget::Resolved(t)      => &t.id,
      DependencyTarget::BackReference(x) => x
    }
  }

  pub fn resolved(&self) -> Option<&Target> {
    match self {
      DependencyTarget::Resolved(t)      => Some(&**t),
      DependencyTarget::BackReference(_) => None
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductReference {
  pub path: String
}

impl Target {
  /// Every target this one depends on, recursively, in dependency order.
  pub fn dependent_targets(&self) -> Vec<&Target> {
    let mut targets = Vec::new();
    for dep in &self.dependencies {
      if let Some(child) = dep.target.resolved() {
        targets.push(child);
        targets.extend(child.dependent_targets());
      }
    }
    targets
  }

  /// Direct dependencies producing an app or app extension, along with everything
  /// those depend on.
  pub fn dependent_executable_product_targets(&self) -> Vec<&Target> {
    let mut targets = Vec::new();
    for dep in &self.dependencies {
      match dep.target.resolved() {
        Some(child) if child.is_executable_product() => {
          targets.push(child);
          targets.extend(child.dependent_targets());
        },
        _ => {}
      }
    }
    targets
  }

  /// Classifies the product by its file extension, or by `productType` when
  /// the target has no product reference.
  fn has_product(&self, ext: &str, product_type: &str) -> bool {
    match &self.product_reference {
      Some(x) => Path::new(&x.path).extension().map_or(false, |x| x == ext),
      None    => self.product_type.as_deref() == Some(product_type)
    }
  }

  pub fn is_app_product(&self) -> bool {
    self.has_product("app", APPLICATION_PRODUCT_TYPE)
  }

  pub fn is_app_extension_product(&self) -> bool {
    self.has_product("appex", APP_EXTENSION_PRODUCT_TYPE)
  }

  pub fn is_executable_product(&self) -> bool {
    self.is_app_product() || self.is_app_extension_product()
  }
}

pub fn parse_target(id: &str, objects: &Objects) -> Result<Target> {
  parse_target_in(id, objects, &mut HashSet::new())
}

pub fn parse_target_dependency(id: &str, objects: &Objects) -> Result<Option<TargetDependency>> {
  parse_target_dependency_in(id, objects, &mut HashSet::new())
}

fn parse_target_in(id: &str, objects: &Objects, expanding: &mut HashSet<String>) -> Result<Target> {
  let raw = objects.object(id)?;
  let isa = raw.isa().map_err(|e| Error::malformed(id, "isa", e))?;

  let target_type = TargetType::from_isa(isa).ok_or_else(|| Error::UnknownTargetType {
    id:  id.to_string(),
    isa: isa.to_string()
  })?;

  let name = raw.string("name").map_err(|e| Error::malformed(id, "name", e))?;

  let build_configuration_list = {
    let list_id = raw.string("buildConfigurationList")
      .map_err(|e| Error::malformed(id, "buildConfigurationList", e))?;
    parse_configuration_list(list_id, objects)?
  };

  let dependency_ids = raw.identifier_list("dependencies")
    .map_err(|e| Error::malformed(id, "dependencies", e))?;

  expanding.insert(id.to_string());
  let mut dependencies = Vec::with_capacity(dependency_ids.len());
  for dep_id in dependency_ids {
    match parse_target_dependency_in(dep_id, objects, expanding) {
      Ok(Some(dep)) => dependencies.push(dep),
      Ok(None)      => debug!(target_id = id, dependency_id = dep_id, "skipping dependency without a target"),
      Err(e)        => {
        expanding.remove(id);
        return Err(e);
      }
    }
  }
  expanding.remove(id);

  let product_reference = match raw.optional_string("productReference")
    .map_err(|e| Error::malformed(id, "productReference", e))?
  {
    None         => None,
    Some(ref_id) => Some(parse_product_reference(ref_id, objects)?)
  };

  let product_type = raw.optional_string("productType")
    .map_err(|e| Error::malformed(id, "productType", e))?;

  // Aggregate and legacy targets may not have any build phases.
  let build_phase_ids = raw.optional_identifier_list("buildPhases")
    .map_err(|e| Error::malformed(id, "buildPhases", e))?
    .unwrap_or_default();

  Ok(Target {
    id:              id.to_string(),
    name:            name.to_string(),
    product_type:    product_type.map(str::to_string),
    build_phase_ids: build_phase_ids.into_iter().map(str::to_string).collect(),
    target_type,
    build_configuration_list,
    dependencies,
    product_reference
  })
}

/// Xcode emits dependency stubs without a `target`, for example when the
/// dependency lives in another project. Those give `None`.
fn parse_target_dependency_in(id: &str, objects: &Objects,
                              expanding: &mut HashSet<String>) -> Result<Option<TargetDependency>>
{
  let raw = objects.object(id)?;
  expect_isa(&raw, "PBXTargetDependency")?;

  let target_id = match raw.optional_string("target")
    .map_err(|e| Error::malformed(id, "target", e))?
  {
    Some(x) => x,
    None    => return Ok(None)
  };

  let target = match expanding.contains(target_id) {
    true  => DependencyTarget::BackReference(target_id.to_string()),
    false => DependencyTarget::Resolved(Box::new(parse_target_in(target_id, objects, expanding)?))
  };

  Ok(Some(TargetDependency { id: id.to_string(), target }))
}

fn parse_product_reference(id: &str, objects: &Objects) -> Result<ProductReference> {
  let raw  = objects.object(id)?;
  let path = raw.string("path").map_err(|e| Error::malformed(id, "path", e))?;
  Ok(ProductReference { path: path.to_string() })
}
