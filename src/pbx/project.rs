use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::Objects;

use super::{Target, expect_isa, parse_target};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Project {
  pub id:               String,
  pub main_group:       String,
  pub project_dir_path: String,
  pub targets:          Vec<Target>
}

impl Project {
  pub fn target(&self, id: &str) -> Option<&Target> {
    self.targets.iter().find(|x| x.id == id)
  }

  pub fn target_named(&self, name: &str) -> Option<&Target> {
    self.targets.iter().find(|x| x.name == name)
  }
}

/// Parses the root PBXProject object and every target it lists.
pub fn parse_project(objects: &Objects) -> Result<Project> {
  let id  = objects.root_id();
  let raw = objects.object(id)?;
  expect_isa(&raw, "PBXProject")?;

  let main_group = raw.string("mainGroup").map_err(|e| Error::malformed(id, "mainGroup", e))?;

  let project_dir_path = raw.optional_string("projectDirPath")
    .map_err(|e| Error::malformed(id, "projectDirPath", e))?
    .unwrap_or("");

  let targets = raw.identifier_list("targets")
    .map_err(|e| Error::malformed(id, "targets", e))?
    .into_iter()
    .map(|x| parse_target(x, objects))
    .collect::<Result<Vec<_>>>()?;

  Ok(Project {
    id:               id.to_string(),
    main_group:       main_group.to_string(),
    project_dir_path: project_dir_path.to_string(),
    targets
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::pbx::fixtures::objects;

  #[test]
  fn project_targets() {
    let objects = objects("P", r#"{
      P = { isa = PBXProject; mainGroup = G; projectDirPath = ""; targets = ( T1, T2 ); };
      G = { isa = PBXGroup; children = ( ); sourceTree = "<group>"; };
      T1 = { isa = PBXNativeTarget; buildConfigurationList = L; buildPhases = ( ); dependencies = ( ); name = App; };
      T2 = { isa = PBXLegacyTarget; buildConfigurationList = L; dependencies = ( ); name = Make; };
      L = { isa = XCConfigurationList; buildConfigurations = ( ); defaultConfigurationName = Release; };
    }"#);

    let project = parse_project(&objects).unwrap();
    assert_eq!(project.main_group, "G");
    assert_eq!(project.targets.len(), 2);
    assert_eq!(project.target_named("Make").unwrap().id, "T2");
    assert!(project.target("T3").is_none());
  }

  #[test]
  fn broken_target_aborts_the_parse() {
    let objects = objects("P", r#"{
      P = { isa = PBXProject; mainGroup = G; targets = ( T1 ); };
      T1 = { isa = PBXNativeTarget; buildConfigurationList = MISSING; dependencies = ( ); name = App; };
    }"#);
    assert!(parse_project(&objects).unwrap_err().is_not_found());
  }
}
