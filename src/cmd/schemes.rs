use clap::{App};

use crate::ctx::{Command, Context, RunResult};
use xcproj::XcodeProj;

pub struct Schemes;

impl Command for Schemes {
  fn init<'a, 'b>(&self, cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.about("Displays the project's shared schemes")
  }

  fn run(&self, ctx: &Context) -> RunResult {
    let proj = XcodeProj::open(&ctx.input_path)?;
    ctx.print(&proj.schemes()?)
  }
}
