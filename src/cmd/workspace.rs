use clap::{App};
use serde::Serialize;
use std::path::PathBuf;

use crate::ctx::{Command, Context, RunResult};

pub struct Workspace;

#[derive(Serialize)]
struct Report<'a> {
  #[serde(flatten)]
  workspace: &'a xcproj::Workspace,

  projects: Vec<PathBuf>
}

impl Command for Workspace {
  fn init<'a, 'b>(&self, cmd: App<'a, 'b>) -> App<'a, 'b> {
    cmd.about("Displays a workspace's contents and the projects it references")
  }

  fn run(&self, ctx: &Context) -> RunResult {
    let workspace = xcproj::Workspace::open(&ctx.input_path)?;
    let projects  = workspace.project_paths()?;
    ctx.print(&Report { workspace: &workspace, projects })
  }
}
