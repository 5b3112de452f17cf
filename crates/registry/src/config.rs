//! Registry configuration.
//!
//! Loaded from TOML:
//!
//! ```toml
//! capacity = 256
//! duplicate_policy = "reject"
//! enforce_write_level = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default number of option slots.
pub const DEFAULT_CAPACITY: usize = 100;

/// What registration does when the key is already present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
	/// Keep the first option registered for a key and drop the newcomer.
	#[default]
	FirstWins,
	/// Replace the existing option in place.
	LastWins,
	/// Refuse the registration with an error.
	Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Maximum number of registered options.
	pub capacity: usize,
	pub duplicate_policy: DuplicatePolicy,
	/// Reject writes to options registered with a read-only write level.
	pub enforce_write_level: bool,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			capacity: DEFAULT_CAPACITY,
			duplicate_policy: DuplicatePolicy::default(),
			enforce_write_level: false,
		}
	}
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("capacity must be at least 1")]
	ZeroCapacity,
}

impl RegistryConfig {
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(text)?;
		if config.capacity == 0 {
			return Err(ConfigError::ZeroCapacity);
		}
		Ok(config)
	}

	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&text)
	}
}
