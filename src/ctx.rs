use clap::{App, ArgMatches};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use xcproj::IconOptions;

pub trait Command {
  fn init<'a, 'b>(&self, cmd: App<'a, 'b>) -> App<'a, 'b>;

  fn run(&self, ctx: &Context) -> RunResult;
}

pub type DynResult<T> = Result<T, Box<dyn std::error::Error>>;
pub type RunResult    = DynResult<()>;

pub type Commands = BTreeMap<&'static str, Box<dyn Command>>;

pub struct Context<'a> {
  pub commands: Commands,

  /// The `.xcodeproj` or `.xcworkspace` given on the command line.
  pub input_path: PathBuf,

  pub args:   &'a ArgMatches<'a>,
  pub config: &'a Config
}

impl<'a> Context<'a> {
  /// Arguments of the running subcommand, if one was named.
  pub fn sub_args(&self, name: &str) -> Option<&ArgMatches<'a>> {
    self.args.subcommand_matches(name)
  }

  pub fn flag(&self, cmd: &str, name: &str) -> bool {
    self.sub_args(cmd).map_or(false, |x| x.is_present(name))
  }

  pub fn print<T: Serialize>(&self, value: &T) -> RunResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
  }
}

/// Read from `XCPROJ_*` environment variables.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Env {
  /// Filter directives for the log output, `warn` when unset.
  pub log: Option<String>,

  /// Configuration file used when `--config` isn't given.
  pub config: Option<PathBuf>
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct Config {
  pub min_version: String,

  pub icons: IconOptions
}
