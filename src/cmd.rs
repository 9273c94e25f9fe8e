mod icons;
mod schemes;
mod targets;
mod workspace;

use crate::ctx::Commands;

pub fn init() -> Commands {
  let mut commands = Commands::new();
  commands.insert("icons",     Box::new(icons::Icons));
  commands.insert("schemes",   Box::new(schemes::Schemes));
  commands.insert("targets",   Box::new(targets::Targets));
  commands.insert("workspace", Box::new(workspace::Workspace));
  commands
}
