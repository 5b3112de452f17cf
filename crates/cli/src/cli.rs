use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ctl_registry::OptionType;

#[derive(Parser, Debug)]
#[command(name = "ctl")]
#[command(about = "Read, write and execute control registry paths")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Registry configuration (TOML)
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Register the debug.* namespace
	#[arg(long)]
	pub debug_namespace: bool,

	/// Register an option, e.g. `int:net.retries=3` or `string:net.host=localhost`
	#[arg(long, short = 'd', value_name = "TYPE:PATH", value_parser = parse_define)]
	pub define: Vec<(OptionType, String)>,

	/// Apply `key=value` entries from a file (repeatable)
	#[arg(long, short = 'l', value_name = "FILE")]
	pub load: Vec<PathBuf>,

	/// Apply `key=value` entries held in an environment variable
	#[arg(long, value_name = "VAR")]
	pub env: Option<String>,

	/// Apply a single `key=value` entry before the command (repeatable)
	#[arg(long, short = 's', value_name = "ENTRY")]
	pub set: Vec<String>,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the current value of a path
	Get { path: String },
	/// Write `path=value` and print the new value
	Set { entry: String },
	/// Execute a path, optionally with `=payload`
	Exec { path: String },
	/// Exit successfully if the path is registered
	Exists { path: String },
	/// List registered options (requires ctl.log.enable=1)
	Dump,
}

fn parse_define(s: &str) -> Result<(OptionType, String), String> {
	let (ty, path) = s
		.split_once(':')
		.ok_or_else(|| format!("expected TYPE:PATH, got '{s}'"))?;
	let ty = match ty {
		"bool" => OptionType::Bool,
		"int" => OptionType::Int,
		"string" => OptionType::String,
		other => return Err(format!("unknown option type '{other}' (expected bool, int or string)")),
	};
	Ok((ty, path.to_owned()))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_defines() {
		assert_eq!(
			parse_define("int:a.b=3"),
			Ok((OptionType::Int, "a.b=3".to_owned()))
		);
		assert_eq!(
			parse_define("string:a.b=x:y"),
			Ok((OptionType::String, "a.b=x:y".to_owned()))
		);
		assert!(parse_define("exec:a.b").is_err());
		assert!(parse_define("a.b").is_err());
	}

	#[test]
	fn parses_full_command_line() {
		let cli = Cli::try_parse_from([
			"ctl",
			"--debug-namespace",
			"-d",
			"bool:feature.on=1",
			"-s",
			"ctl.log.enable=1",
			"dump",
		])
		.unwrap();
		assert!(cli.debug_namespace);
		assert_eq!(cli.define, vec![(OptionType::Bool, "feature.on=1".to_owned())]);
		assert_eq!(cli.set, vec!["ctl.log.enable=1".to_owned()]);
		assert!(matches!(cli.command, Command::Dump));
	}

	#[test]
	fn command_definition_is_valid() {
		use clap::CommandFactory;
		Cli::command().debug_assert();
	}
}
