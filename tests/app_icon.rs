mod common;

use common::Fixture;
use std::collections::BTreeSet;
use std::path::PathBuf;
use xcproj::{Error, IconOptions, resolve_app_icon_sets, resolve_app_icon_sets_with};

const ICON_SET: &str = "App/Assets.xcassets/AppIcon.appiconset";

#[test]
fn finds_the_icon_set_of_each_target() {
  let fixture = Fixture::new().dirs(&[ICON_SET]);
  let project = fixture.write();

  let sets = resolve_app_icon_sets(&project).unwrap();
  assert_eq!(sets.len(), 1);
  assert_eq!(sets["T1"], vec![fixture.root().join(ICON_SET)]);
}

#[test]
fn accepts_the_pbxproj_file() {
  let fixture = Fixture::new().dirs(&[ICON_SET]);
  let project = fixture.write();

  let sets = resolve_app_icon_sets(project.join("project.pbxproj")).unwrap();
  assert_eq!(sets["T1"], vec![fixture.root().join(ICON_SET)]);
}

#[test]
fn resolution_is_repeatable() {
  let fixture = Fixture::new().dirs(&[ICON_SET]);
  let project = fixture.write();

  let first  = resolve_app_icon_sets(&project).unwrap();
  let second = resolve_app_icon_sets(&project).unwrap();
  assert_eq!(first, second);
}

#[test]
fn missing_icon_set_lists_the_candidates() {
  let fixture = Fixture::new().dirs(&["App/Assets.xcassets/Other.appiconset"]);
  let project = fixture.write();

  match resolve_app_icon_sets(&project) {
    Err(Error::AppIconSetNotFound { name, candidates }) => {
      assert_eq!(name, "AppIcon");
      assert_eq!(candidates, vec![fixture.root().join("App/Assets.xcassets")]);
    },
    other => panic!("unexpected result {:?}", other)
  }
}

#[test]
fn setting_references_become_wildcards() {
  let fixture = Fixture::new()
    .icon("\"AppIcon${ASSET_TAGS}\"")
    .dirs(&[ICON_SET,
            "App/Assets.xcassets/AppIcon-Dark.appiconset",
            "App/Assets.xcassets/LaunchImage.launchimage"]);
  let project = fixture.write();

  let sets = resolve_app_icon_sets(&project).unwrap();
  let found: BTreeSet<PathBuf> = sets["T1"].iter().cloned().collect();
  let expected: BTreeSet<PathBuf> = vec![
    fixture.root().join(ICON_SET),
    fixture.root().join("App/Assets.xcassets/AppIcon-Dark.appiconset")
  ].into_iter().collect();
  assert_eq!(found, expected);
}

#[test]
fn missing_default_configuration() {
  let fixture = Fixture::new().default_configuration("Staging").dirs(&[ICON_SET]);
  let project = fixture.write();

  match resolve_app_icon_sets(&project) {
    Err(Error::DefaultConfigurationNotFound { target, name }) => {
      assert_eq!(target, "T1");
      assert_eq!(name, "Staging");
    },
    other => panic!("unexpected result {:?}", other)
  }
}

#[test]
fn non_string_icon_name() {
  let fixture = Fixture::new().icon("( AppIcon, Other )").dirs(&[ICON_SET]);
  let project = fixture.write();

  match resolve_app_icon_sets(&project) {
    Err(Error::TypeMismatch { id, expected, found, .. }) => {
      assert_eq!(id, "C2");
      assert_eq!(expected, "string");
      assert_eq!(found, "array");
    },
    other => panic!("unexpected result {:?}", other)
  }
}

#[test]
fn configuration_override() {
  let fixture = Fixture::new().icon("Missing").dirs(&[ICON_SET]);
  let project = fixture.write();

  assert!(matches!(resolve_app_icon_sets(&project), Err(Error::AppIconSetNotFound { .. })));

  let options = IconOptions { configuration: Some("Debug".to_string()), ..IconOptions::default() };
  let sets    = resolve_app_icon_sets_with(&project, &options).unwrap();
  assert_eq!(sets["T1"], vec![fixture.root().join(ICON_SET)]);
}

#[test]
fn target_without_resources_phase() {
  let fixture = Fixture::new().phases("S1").dirs(&[ICON_SET]);
  let project = fixture.write();

  match resolve_app_icon_sets(&project) {
    Err(Error::ResourcesBuildPhaseNotFound(id)) => assert_eq!(id, "T1"),
    other => panic!("unexpected result {:?}", other)
  }
}

#[test]
fn missing_project() {
  let dir = tempfile::tempdir().unwrap();
  let err = resolve_app_icon_sets(dir.path().join("Nope.xcodeproj")).unwrap_err();
  assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn every_asset_catalog_is_searched() {
  let fixture = Fixture::new()
    .icon("\"AppIcon${ASSET_TAGS}\"")
    .resources("B0, B1, B3")
    .dirs(&["App/Assets.xcassets",
            "App/Brand.xcassets/AppIcon.appiconset",
            "App/Brand.xcassets/AppIcon-Dark.appiconset"]);
  let project = fixture.write();

  let sets = resolve_app_icon_sets(&project).unwrap();
  let found: BTreeSet<PathBuf> = sets["T1"].iter().cloned().collect();
  let expected: BTreeSet<PathBuf> = vec![
    fixture.root().join("App/Brand.xcassets/AppIcon.appiconset"),
    fixture.root().join("App/Brand.xcassets/AppIcon-Dark.appiconset")
  ].into_iter().collect();
  assert_eq!(found, expected);
  assert_eq!(sets["T1"].len(), 2);
}

#[test]
fn not_found_lists_every_catalog() {
  let fixture = Fixture::new().resources("B0, B1, B3").dirs(&["App/Assets.xcassets", "App/Brand.xcassets"]);
  let project = fixture.write();

  match resolve_app_icon_sets(&project) {
    Err(Error::AppIconSetNotFound { name, candidates }) => {
      assert_eq!(name, "AppIcon");
      assert_eq!(candidates, vec![fixture.root().join("App/Assets.xcassets"),
                                  fixture.root().join("App/Brand.xcassets")]);
    },
    other => panic!("unexpected result {:?}", other)
  }
}

#[test]
fn catalog_absent_from_disk() {
  let fixture = Fixture::new();
  let project = fixture.write();

  assert!(matches!(resolve_app_icon_sets(&project), Err(Error::AppIconSetNotFound { .. })));
}

#[test]
fn catalog_outside_any_group() {
  let fixture = Fixture::new().resources("B1, B4").dirs(&[ICON_SET]);
  let project = fixture.write();

  match resolve_app_icon_sets(&project) {
    Err(Error::PathResolutionFailed { id, .. }) => assert_eq!(id, "F5"),
    other => panic!("unexpected result {:?}", other)
  }
}
