//! Reads build metadata out of Xcode projects.
//!
//! The main entry point is [`resolve_app_icon_sets`], which maps every target
//! of a `.xcodeproj` bundle to the app icon sets it uses. The readers it is
//! built on are exposed as well:
//!
//! - [`plist`] parses the OpenStep property list format of `project.pbxproj`.
//! - [`store`] indexes its `objects` table and gives typed access to records.
//! - [`pbx`] turns records into projects, targets and build configurations.
//! - [`path`] resolves file elements to absolute paths.
//! - [`xcscheme`] and [`xcworkspace`] read the XML side of Xcode's formats.

pub mod appicon;
pub mod error;
pub mod path;
pub mod pbx;
pub mod plist;
pub mod store;
pub mod xcodeproj;
pub mod xcscheme;
pub mod xcworkspace;

pub use appicon::{APP_ICON_NAME_SETTING, IconOptions, Locator, TargetsToAppIconSets,
                  resolve_app_icon_sets, resolve_app_icon_sets_with};
pub use error::{Error, Result};
pub use xcodeproj::XcodeProj;
pub use xcscheme::Scheme;
pub use xcworkspace::Workspace;
