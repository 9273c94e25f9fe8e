use clap::{App, Arg};

use crate::ctx::{Command, Context, RunResult};

pub struct Icons;

impl Command for Icons {
  fn init<'a, 'b>(&self, cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.about("Maps each target to its app icon sets (default)")
      .arg(Arg::with_name("relative")
           .short("r")
           .long("relative")
           .help("Prints paths relative to the current directory"))
      .arg(Arg::with_name("configuration")
           .long("configuration")
           .value_name("NAME")
           .help("Reads this build configuration instead of each target's default")
           .takes_value(true))
  }

  fn run(&self, ctx: &Context) -> RunResult {
    let mut options = ctx.config.icons.clone();
    if let Some(name) = ctx.sub_args("icons").and_then(|x| x.value_of("configuration")) {
      options.configuration = Some(name.to_string());
    }

    let mut sets = xcproj::resolve_app_icon_sets_with(&ctx.input_path, &options)?;

    if ctx.flag("icons", "relative") {
      let cwd = std::env::current_dir()?;
      for paths in sets.values_mut() {
        for path in paths.iter_mut() {
          if let Some(rel) = pathdiff::diff_paths(&*path, &cwd) {
            *path = rel;
          }
        }
      }
    }

    ctx.print(&sets)
  }
}
