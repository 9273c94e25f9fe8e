#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An app target with a Resources phase listing an asset catalog under
/// `App/`, a build file without a file reference and an Info.plist, next to
/// an aggregate target without any icon. `App/Brand.xcassets` (B3) and
/// `Stray.xcassets` (B4, in no group) can be added to the phase.
const PBXPROJ: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 50;
	objects = {

/* Begin PBXBuildFile section */
		B0 /* (null) in Resources */ = {isa = PBXBuildFile; };
		B1 /* Assets.xcassets in Resources */ = {isa = PBXBuildFile; fileRef = F1 /* Assets.xcassets */; };
		B2 /* Info.plist in Resources */ = {isa = PBXBuildFile; fileRef = F2 /* Info.plist */; };
		B3 /* Brand.xcassets in Resources */ = {isa = PBXBuildFile; fileRef = F4 /* Brand.xcassets */; };
		B4 /* Stray.xcassets in Resources */ = {isa = PBXBuildFile; fileRef = F5 /* Stray.xcassets */; };
/* End PBXBuildFile section */

		F1 /* Assets.xcassets */ = {isa = PBXFileReference; lastKnownFileType = folder.assetcatalog; path = Assets.xcassets; sourceTree = "<group>"; };
		F2 /* Info.plist */ = {isa = PBXFileReference; lastKnownFileType = text.plist.xml; path = Info.plist; sourceTree = "<group>"; };
		F4 /* Brand.xcassets */ = {isa = PBXFileReference; lastKnownFileType = folder.assetcatalog; path = Brand.xcassets; sourceTree = "<group>"; };
		F5 /* Stray.xcassets */ = {isa = PBXFileReference; lastKnownFileType = folder.assetcatalog; path = Stray.xcassets; sourceTree = "<group>"; };
		F3 /* App.app */ = {isa = PBXFileReference; explicitFileType = wrapper.application; includeInIndex = 0; path = App.app; sourceTree = BUILT_PRODUCTS_DIR; };

		G0 = {
			isa = PBXGroup;
			children = (
				G1 /* App */,
				G2 /* Products */,
			);
			sourceTree = "<group>";
		};
		G1 /* App */ = {
			isa = PBXGroup;
			children = (
				F1 /* Assets.xcassets */,
				F4 /* Brand.xcassets */,
				F2 /* Info.plist */,
			);
			path = App;
			sourceTree = "<group>";
		};
		G2 /* Products */ = {
			isa = PBXGroup;
			children = (
				F3 /* App.app */,
			);
			name = Products;
			sourceTree = "<group>";
		};

		T1 /* App */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = L1 /* Build configuration list for PBXNativeTarget "App" */;
			buildPhases = (
				{PHASES}
			);
			buildRules = (
			);
			dependencies = (
			);
			name = App;
			productName = App;
			productReference = F3 /* App.app */;
			productType = "com.apple.product-type.application";
		};
		T2 /* Lint */ = {
			isa = PBXAggregateTarget;
			buildConfigurationList = L2;
			buildPhases = (
			);
			dependencies = (
			);
			name = Lint;
			productName = Lint;
		};

		P /* Project object */ = {
			isa = PBXProject;
			buildConfigurationList = L0;
			compatibilityVersion = "Xcode 9.3";
			developmentRegion = en;
			hasScannedForEncodings = 0;
			mainGroup = G0;
			productRefGroup = G2 /* Products */;
			projectDirPath = "";
			projectRoot = "";
			targets = (
				T1 /* App */,
				T2 /* Lint */,
			);
		};

		S1 /* Sources */ = {isa = PBXSourcesBuildPhase; buildActionMask = 2147483647; files = ( ); runOnlyForDeploymentPostprocessing = 0; };
		R1 /* Resources */ = {
			isa = PBXResourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				{FILES}
			);
			runOnlyForDeploymentPostprocessing = 0;
		};

		C0 /* Release */ = {isa = XCBuildConfiguration; buildSettings = { SDKROOT = iphoneos; }; name = Release; };
		C1 /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ASSETCATALOG_COMPILER_APPICON_NAME = AppIcon;
				INFOPLIST_FILE = App/Info.plist;
			};
			name = Debug;
		};
		C2 /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ASSETCATALOG_COMPILER_APPICON_NAME = {ICON};
				INFOPLIST_FILE = App/Info.plist;
			};
			name = Release;
		};
		C3 /* Release */ = {isa = XCBuildConfiguration; buildSettings = { }; name = Release; };

		L0 = {isa = XCConfigurationList; buildConfigurations = ( C0 ); defaultConfigurationIsVisible = 0; defaultConfigurationName = Release; };
		L1 = {
			isa = XCConfigurationList;
			buildConfigurations = (
				C1 /* Debug */,
				C2 /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = {DEFAULT};
		};
		L2 = {isa = XCConfigurationList; buildConfigurations = ( C3 ); defaultConfigurationIsVisible = 0; defaultConfigurationName = Release; };
	};
	rootObject = P /* Project object */;
}
"#;

pub struct Fixture {
  pub dir: TempDir,
  icon:    String,
  default: String,
  phases:  String,
  files:   String
}

impl Fixture {
  pub fn new() -> Self {
    Fixture {
      dir:     tempfile::tempdir().unwrap(),
      icon:    "AppIcon".to_string(),
      default: "Release".to_string(),
      phases:  "S1, R1".to_string(),
      files:   "B0, B1, B2".to_string()
    }
  }

  /// Raw property list text for the Release icon setting.
  pub fn icon(mut self, value: &str) -> Self {
    self.icon = value.to_string();
    self
  }

  pub fn default_configuration(mut self, name: &str) -> Self {
    self.default = name.to_string();
    self
  }

  pub fn phases(mut self, phases: &str) -> Self {
    self.phases = phases.to_string();
    self
  }

  /// Build files listed in the Resources phase.
  pub fn resources(mut self, files: &str) -> Self {
    self.files = files.to_string();
    self
  }

  /// Creates directories relative to the project's folder.
  pub fn dirs(self, dirs: &[&str]) -> Self {
    for dir in dirs {
      std::fs::create_dir_all(self.dir.path().join(dir)).unwrap();
    }
    self
  }

  pub fn root(&self) -> &Path {
    self.dir.path()
  }

  /// Writes `Demo.xcodeproj/project.pbxproj` and returns the bundle's path.
  pub fn write(&self) -> PathBuf {
    let bundle = self.dir.path().join("Demo.xcodeproj");
    std::fs::create_dir_all(&bundle).unwrap();

    let text = PBXPROJ
      .replace("{ICON}",    &self.icon)
      .replace("{DEFAULT}", &self.default)
      .replace("{PHASES}",  &self.phases)
      .replace("{FILES}",   &self.files);
    std::fs::write(bundle.join("project.pbxproj"), text).unwrap();
    bundle
  }
}
