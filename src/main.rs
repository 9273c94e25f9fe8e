#![allow(clippy::write_with_newline)]

mod cmd;
mod ctx;

use clap::{Arg, App, SubCommand};
use semver::Version;
use std::error::Error;
use std::{fmt, fmt::{Display}};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "xcproj.toml";

fn main() {
  // Initialize.
  let commands = cmd::init();

  // Parse the environment variables.
  let env: ctx::Env = envy::prefixed("XCPROJ_").from_env()
    .check(|| "Failed to parse environment variables");

  let filter = EnvFilter::try_new(env.log.as_deref().unwrap_or("warn"))
    .check(|| "Invalid log filter");
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();

  // Parse the command line.
  let args = App::new(env!("CARGO_PKG_NAME"))
    .version(env!("CARGO_PKG_VERSION"))
    .author(env!("CARGO_PKG_AUTHORS"))
    .about(env!("CARGO_PKG_DESCRIPTION"))
    .arg(Arg::with_name("PROJECT")
         .help("The .xcodeproj bundle to read, or .xcworkspace for the workspace command")
         .required(true))
    .arg(Arg::with_name("config")
         .short("c")
         .long("config")
         .value_name("FILE")
         .help("Configuration file, defaults to xcproj.toml when present")
         .takes_value(true))
    .subcommands(commands.iter().map(|(name, cmd)| {
      cmd.init(SubCommand::with_name(name))
    }))
    .get_matches();

  let input_path = args.value_of("PROJECT").map(PathBuf::from).unwrap_or_default();
  input_path.exists().check(|| format!("No such project ({:?})", input_path));

  // Load the configuration file, if any.
  let config = {
    let explicit = args.value_of("config").map(PathBuf::from).or_else(|| env.config.clone());
    let path     = explicit.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    match explicit.is_none() && !path.exists() {
      true  => ctx::Config::default(),
      false => load_config(&path)
    }
  };

  is_supported(&config.min_version).check(|| "Min version check failed");

  // Execute the requested command.
  let ctx = ctx::Context {
    commands,
    input_path,
    args:   &args,
    config: &config
  };

  let cmd_name = ctx.args.subcommand_name().unwrap_or("icons");
  debug!(command = cmd_name, input = %ctx.input_path.display(), "running");
  ctx.commands[cmd_name].run(&ctx)
    .check(|| format!("Failed to run command ({})", cmd_name));
}

fn load_config(path: &Path) -> ctx::Config {
  let text = std::fs::read_to_string(path)
    .check(|| format!("Failed to load config file ({:?})", path));

  toml::from_str(&text)
    .check(|| format!("Failed to read the config file ({:?})", path))
}

#[derive(Debug)]
struct MinVerError {
  expected: Version,
  current:  Version
}

impl Display for MinVerError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "Configuration requires a newer version: expected {} but running {}",
           self.expected, self.current)
  }
}

impl Error for MinVerError {}

fn is_supported(min_version: &str) -> ctx::DynResult<()> {
  if !min_version.is_empty() {
    let expected = Version::parse(min_version)?;
    let current  = Version::parse(env!("CARGO_PKG_VERSION"))?;
    if expected > current {
      return Err(Box::new(MinVerError { expected, current }))
    }
  }
  Ok(())
}

trait Check {
  type R;
  fn check<F, S>(self, msg: F) -> Self::R where F: FnOnce() -> S, S: Display;
}

impl Check for bool {
  type R = ();
  fn check<F, S>(self, msg: F) where F: FnOnce() -> S, S: Display {
    if !self {
      fatal(msg());
    }
  }
}

impl<T, E> Check for Result<T, E> where E: Display {
  type R = T;
  fn check<F, S>(self, msg: F) -> Self::R where F: FnOnce() -> S, S: Display {
    match self {
      Ok (v) => v,
      Err(e) => fatal(format!("{}: {}", msg(), e))
    }
  }
}

fn fatal<S: Display>(msg: S) -> ! {
  eprintln!("{}", msg);
  std::process::exit(1)
}
