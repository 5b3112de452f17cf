//! Loading option values from text.
//!
//! The format is a sequence of `key=value` entries separated by `;` or
//! newlines. Surrounding whitespace is trimmed, empty entries are skipped and
//! lines starting with `#` are comments:
//!
//! ```text
//! # heap debugging
//! debug.heap.alloc_pattern=321;
//! debug.log.level=5; debug.log.enable=1
//! ```
//!
//! Each entry is applied as a read-write dispatch. A failing entry is
//! recorded and loading continues with the next one.

use std::path::{Path, PathBuf};

use crate::error::DispatchError;
use crate::registry::Registry;
use crate::value::OperationType;

/// Outcome of applying a block of entries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadReport {
	/// Number of entries applied.
	pub applied: usize,
	/// Entries that failed, with the reason.
	pub failures: Vec<(String, DispatchError)>,
}

impl LoadReport {
	pub fn is_clean(&self) -> bool {
		self.failures.is_empty()
	}
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("environment variable {0} is not set or not unicode")]
	MissingEnv(String),
}

fn entries(text: &str) -> impl Iterator<Item = &str> {
	text.lines()
		.map(str::trim)
		.filter(|line| !line.starts_with('#'))
		.flat_map(|line| line.split(';'))
		.map(str::trim)
		.filter(|entry| !entry.is_empty())
}

/// Applies every entry in `text` to `registry`.
pub fn load_str(registry: &mut Registry, text: &str) -> LoadReport {
	let mut report = LoadReport::default();
	for entry in entries(text) {
		match registry.dispatch(entry, OperationType::ReadWrite) {
			Ok(_) => report.applied += 1,
			Err(err) => {
				tracing::warn!(domain = "ctl", entry, error = %err, "config entry not applied");
				report.failures.push((entry.to_owned(), err));
			}
		}
	}
	tracing::debug!(
		domain = "ctl",
		applied = report.applied,
		failed = report.failures.len(),
		"loaded config entries",
	);
	report
}

/// Reads `path` and applies its entries.
pub fn load_file(registry: &mut Registry, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
	let path = path.as_ref();
	let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(load_str(registry, &text))
}

/// Applies the entries held in environment variable `var`.
pub fn load_env(registry: &mut Registry, var: &str) -> Result<LoadReport, LoadError> {
	let text = std::env::var(var).map_err(|_| LoadError::MissingEnv(var.to_owned()))?;
	Ok(load_str(registry, &text))
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;
	use crate::capability::Capabilities;
	use crate::value::OptionType;

	fn registry() -> Registry {
		let mut registry = Registry::default();
		for path in ["debug.heap.alloc_pattern=0", "debug.log.level=0"] {
			registry
				.register(path, OptionType::Int, OperationType::ReadWrite, Capabilities::new())
				.unwrap();
		}
		registry
	}

	#[test]
	fn splits_on_semicolons_and_newlines() {
		let mut registry = registry();
		let report = load_str(
			&mut registry,
			"# comment\ndebug.heap.alloc_pattern=321;\n  debug.log.level=5; ctl.log.enable=1 ;;\n",
		);
		assert!(report.is_clean());
		assert_eq!(report.applied, 3);
		assert_eq!(registry.read_int("debug.heap.alloc_pattern"), Some(321));
		assert_eq!(registry.read_int("debug.log.level"), Some(5));
		assert_eq!(registry.read_bool("ctl.log.enable"), Some(true));
	}

	#[test]
	fn failures_do_not_stop_loading() {
		let mut registry = registry();
		let report = load_str(&mut registry, "nope.key=1;debug.log.level;debug.log.level=2");
		assert_eq!(report.applied, 1);
		assert_eq!(report.failures.len(), 2);
		assert_eq!(report.failures[0].0, "nope.key=1");
		assert!(matches!(report.failures[1].1, DispatchError::MissingValue { .. }));
		assert_eq!(registry.read_int("debug.log.level"), Some(2));
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, "debug.heap.alloc_pattern=321;\ndebug.log.level=5;\n").unwrap();

		let mut registry = registry();
		let report = load_file(&mut registry, file.path()).unwrap();
		assert_eq!(report.applied, 2);
		assert_eq!(registry.read_int("debug.heap.alloc_pattern"), Some(321));
	}

	#[test]
	fn missing_file_is_an_error() {
		let mut registry = registry();
		assert!(matches!(
			load_file(&mut registry, "/nonexistent/ctl.conf"),
			Err(LoadError::Io { .. })
		));
	}

	#[test]
	fn missing_env_is_an_error() {
		let mut registry = registry();
		assert!(matches!(
			load_env(&mut registry, "CTL_REGISTRY_TEST_UNSET_VARIABLE"),
			Err(LoadError::MissingEnv(_))
		));
	}
}
