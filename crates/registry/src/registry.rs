use rustc_hash::FxHashMap as HashMap;

use crate::capability::Capabilities;
use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::error::{InsertAction, RegisterError};
use crate::option::CtlOption;
use crate::path::{PathSpec, check_path, split_path};
use crate::value::{OperationType, OptionType, OptionValue};

/// Bool option gating diagnostic output of [`Registry::dump`].
pub const LOG_ENABLE: &str = "ctl.log.enable";

/// Maximum edit distance for "did you mean" suggestions.
const SUGGEST_DISTANCE: usize = 3;

/// A bounded, ordered table of options addressed by dotted path.
///
/// Every operation is a synchronous pass over the table. For shared use
/// across threads wrap it in a [`SharedRegistry`](crate::SharedRegistry).
pub struct Registry {
	/// Registration order; dump and iteration follow it.
	pub(crate) options: Vec<CtlOption>,
	/// Key to slot in `options`. Keys are unique under every policy.
	pub(crate) by_key: HashMap<Box<str>, usize>,
	pub(crate) config: RegistryConfig,
}

impl Default for Registry {
	fn default() -> Self {
		Self::new(RegistryConfig::default())
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("len", &self.options.len())
			.field("config", &self.config)
			.finish()
	}
}

impl Registry {
	/// Creates a registry holding only the `ctl.log.enable` bootstrap option.
	pub fn new(config: RegistryConfig) -> Self {
		let mut registry = Self {
			options: Vec::with_capacity(config.capacity),
			by_key: HashMap::default(),
			config,
		};
		let bootstrap = format!("{LOG_ENABLE}=0");
		if let Err(err) = registry.register(
			&bootstrap,
			OptionType::Bool,
			OperationType::ReadWrite,
			Capabilities::new(),
		) {
			tracing::warn!(domain = "ctl", error = %err, "bootstrap option not registered");
		}
		registry
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.config
	}

	/// Registers `path` (optionally `key=initial`) with the given type.
	///
	/// The key must satisfy the path grammar; the initial literal after the
	/// first `=` is taken as is.
	/// Numeric initial values are parsed permissively; string options must
	/// carry `=value`. A supplied writer is primed with the raw initial
	/// literal once the option is stored. Collisions follow the configured
	/// [`DuplicatePolicy`]; a kept-existing collision stores nothing and does
	/// not prime.
	pub fn register(
		&mut self,
		path: &str,
		ty: OptionType,
		write_level: OperationType,
		caps: Capabilities,
	) -> Result<InsertAction, RegisterError> {
		// Only the key is checked; the initial literal is taken verbatim.
		let (key, literal) = split_path(path);
		check_path(key).map_err(|reason| RegisterError::MalformedPath {
			path: path.to_owned(),
			reason,
		})?;
		let spec = PathSpec {
			key,
			value: literal,
		};

		let value = OptionValue::from_literal(ty, spec.value);
		if ty == OptionType::String && value.is_none() {
			return Err(RegisterError::MissingValue {
				key: spec.key.to_owned(),
			});
		}

		let writer = caps.writer.clone();
		let option = CtlOption {
			path: spec.key.into(),
			ty,
			value,
			caps,
			write_level,
		};

		let action = match self.by_key.get(spec.key).copied() {
			Some(idx) => match self.config.duplicate_policy {
				DuplicatePolicy::FirstWins => {
					tracing::warn!(
						domain = "ctl",
						key = spec.key,
						policy = "first_wins",
						"duplicate option; keeping existing",
					);
					return Ok(InsertAction::KeptExisting);
				}
				DuplicatePolicy::Reject => {
					tracing::warn!(
						domain = "ctl",
						key = spec.key,
						policy = "reject",
						"duplicate option rejected",
					);
					return Err(RegisterError::Duplicate {
						key: spec.key.to_owned(),
					});
				}
				DuplicatePolicy::LastWins => {
					tracing::warn!(
						domain = "ctl",
						key = spec.key,
						policy = "last_wins",
						"duplicate option; replacing existing",
					);
					self.options[idx] = option;
					InsertAction::ReplacedExisting
				}
			},
			None => {
				if self.options.len() >= self.config.capacity {
					tracing::warn!(
						domain = "ctl",
						key = spec.key,
						capacity = self.config.capacity,
						"option table full",
					);
					return Err(RegisterError::Full {
						key: spec.key.to_owned(),
						capacity: self.config.capacity,
					});
				}
				self.by_key.insert(spec.key.into(), self.options.len());
				self.options.push(option);
				InsertAction::InsertedNew
			}
		};

		tracing::debug!(domain = "ctl", key = spec.key, ty = %ty, ?action, "registered option");

		if let Some(writer) = writer {
			writer(spec.value);
		}
		Ok(action)
	}

	/// Exact match against registered keys; no validation.
	pub fn exists(&self, path: &str) -> bool {
		self.by_key.contains_key(path)
	}

	pub fn get(&self, key: &str) -> Option<&CtlOption> {
		self.by_key.get(key).map(|&idx| &self.options[idx])
	}

	/// Options in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &CtlOption> {
		self.options.iter()
	}

	pub fn len(&self) -> usize {
		self.options.len()
	}

	pub fn is_empty(&self) -> bool {
		self.options.is_empty()
	}

	pub fn capacity(&self) -> usize {
		self.config.capacity
	}

	/// Suggests the closest registered key using edit distance.
	pub fn suggest(&self, key: &str) -> Option<String> {
		self.options
			.iter()
			.map(|o| (strsim::levenshtein(key, &o.path), &o.path))
			.filter(|&(dist, _)| dist <= SUGGEST_DISTANCE)
			.min_by_key(|&(dist, _)| dist)
			.map(|(_, path)| path.to_string())
	}
}
