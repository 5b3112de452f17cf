//! `ctl` binary.
//!
//! Builds a registry from the command line (configuration, definitions,
//! loaded entries) and runs one request against it.

mod cli;

use std::io::Write;

use anyhow::{Context, bail};
use clap::Parser;
use ctl_registry::{
	Capabilities, DebugControls, LoadReport, OperationType, Registry, RegistryConfig, load_env,
	load_file,
};
use tracing::{info, warn};

use crate::cli::{Cli, Command};

fn report(source: &str, report: &LoadReport) {
	for (entry, err) in &report.failures {
		warn!(source, entry = entry.as_str(), error = %err, "entry skipped");
	}
	info!(source, applied = report.applied, "entries applied");
}

fn build_registry(cli: &Cli) -> anyhow::Result<Registry> {
	let config = match &cli.config {
		Some(path) => RegistryConfig::from_file(path)?,
		None => RegistryConfig::default(),
	};
	let mut registry = Registry::new(config);

	if cli.debug_namespace {
		DebugControls::new()
			.register(&mut registry)
			.context("registering debug namespace")?;
	}
	for (ty, path) in &cli.define {
		registry
			.register(path, *ty, OperationType::ReadWrite, Capabilities::new())
			.with_context(|| format!("defining '{path}'"))?;
	}
	for path in &cli.load {
		let loaded = load_file(&mut registry, path)?;
		report(&path.display().to_string(), &loaded);
	}
	if let Some(var) = &cli.env {
		let loaded = load_env(&mut registry, var)?;
		report(var, &loaded);
	}
	for entry in &cli.set {
		registry
			.dispatch(entry, OperationType::ReadWrite)
			.with_context(|| format!("applying '{entry}'"))?;
	}
	Ok(registry)
}

/// Runs the requested command against a freshly built registry.
fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
	let mut registry = build_registry(cli)?;

	match &cli.command {
		Command::Get { path } => {
			let response = registry.dispatch(path, OperationType::ReadOnly)?;
			writeln!(out, "{response}")?;
		}
		Command::Set { entry } => {
			let response = registry.dispatch(entry, OperationType::ReadWrite)?;
			writeln!(out, "{response}")?;
		}
		Command::Exec { path } => {
			let response = registry.dispatch(path, OperationType::Execute)?;
			writeln!(out, "{response}")?;
		}
		Command::Exists { path } => {
			if !registry.exists(path) {
				bail!("'{path}' is not registered");
			}
		}
		Command::Dump => {
			if !registry.log_enabled() {
				warn!("ctl.log.enable is 0; nothing to dump");
			}
			registry.write_dump(out).context("writing dump")?;
		}
	}

	Ok(())
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if cli.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.with_writer(std::io::stderr)
		.finish();
	tracing::subscriber::set_global_default(subscriber)?;

	run(&cli, &mut std::io::stdout().lock())
}
