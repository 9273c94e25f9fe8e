use clap::{App, Arg};

use crate::ctx::{Command, Context, RunResult};
use xcproj::XcodeProj;

pub struct Targets;

impl Command for Targets {
  fn init<'a, 'b>(&self, cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.about("Displays the project's targets and their dependencies")
      .arg(Arg::with_name("name")
           .long("name")
           .value_name("TARGET")
           .help("Only displays the target with this name")
           .takes_value(true))
  }

  fn run(&self, ctx: &Context) -> RunResult {
    let proj = XcodeProj::open(&ctx.input_path)?;

    match ctx.sub_args("targets").and_then(|x| x.value_of("name")) {
      None       => ctx.print(&proj.project.targets),
      Some(name) => match proj.project.target_named(name) {
        Some(target) => ctx.print(target),
        None         => Err(xcproj::Error::NotFound(name.to_string()).into())
      }
    }
  }
}
