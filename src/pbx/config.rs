use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::store::{Objects, Value};

use super::expect_isa;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuildConfigurationList {
  pub id:                         String,
  pub default_configuration_name: String,
  pub build_configurations:       Vec<BuildConfiguration>
}

impl BuildConfigurationList {
  pub fn configuration(&self, name: &str) -> Option<&BuildConfiguration> {
    self.build_configurations.iter().find(|x| x.name == name)
  }

  pub fn default_configuration(&self) -> Option<&BuildConfiguration> {
    self.configuration(&self.default_configuration_name)
  }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuildConfiguration {
  pub id:             String,
  pub name:           String,
  pub build_settings: BTreeMap<String, Value>
}

pub fn parse_configuration_list(id: &str, objects: &Objects) -> Result<BuildConfigurationList> {
  let raw = objects.object(id)?;
  expect_isa(&raw, "XCConfigurationList")?;

  let default_configuration_name = raw.string("defaultConfigurationName")
    .map_err(|e| Error::malformed(id, "defaultConfigurationName", e))?;

  let ids = raw.identifier_list("buildConfigurations")
    .map_err(|e| Error::malformed(id, "buildConfigurations", e))?;

  let build_configurations = ids.into_iter()
    .map(|x| parse_configuration(x, objects))
    .collect::<Result<Vec<_>>>()?;

  Ok(BuildConfigurationList {
    id: id.to_string(),
    default_configuration_name: default_configuration_name.to_string(),
    build_configurations
  })
}

fn parse_configuration(id: &str, objects: &Objects) -> Result<BuildConfiguration> {
  let raw = objects.object(id)?;
  expect_isa(&raw, "XCBuildConfiguration")?;

  let name           = raw.string("name").map_err(|e| Error::malformed(id, "name", e))?;
  let build_settings = raw.dictionary("buildSettings")
    .map_err(|e| Error::malformed(id, "buildSettings", e))?;

  Ok(BuildConfiguration {
    id:             id.to_string(),
    name:           name.to_string(),
    build_settings: build_settings.clone()
  })
}
