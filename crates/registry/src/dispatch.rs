//! Path dispatch: validate, split, look up, act.
//!
//! Every request is an independent pass against the table. The first failing
//! step decides the [`DispatchError`]; nothing is mutated on failure.

use crate::error::DispatchError;
use crate::option::CtlOption;
use crate::path::PathSpec;
use crate::registry::Registry;
use crate::value::{OperationType, OptionType, OptionValue};

/// Result of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
	/// Current stored value, or what a read capability produced.
	Value(OptionValue),
	/// Payload handed to a write or exec capability.
	Payload(Option<String>),
}

impl Response {
	pub fn value(&self) -> Option<&OptionValue> {
		match self {
			Response::Value(v) => Some(v),
			Response::Payload(_) => None,
		}
	}

	pub fn into_value(self) -> Option<OptionValue> {
		match self {
			Response::Value(v) => Some(v),
			Response::Payload(_) => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		self.value().and_then(OptionValue::as_int)
	}

	pub fn as_bool(&self) -> Option<bool> {
		self.value().and_then(OptionValue::as_bool)
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Response::Value(v) => v.as_str(),
			Response::Payload(p) => p.as_deref(),
		}
	}
}

impl std::fmt::Display for Response {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Response::Value(v) => write!(f, "{v}"),
			Response::Payload(Some(p)) => f.write_str(p),
			Response::Payload(None) => Ok(()),
		}
	}
}

fn parse(path: &str) -> Result<PathSpec<'_>, DispatchError> {
	PathSpec::parse(path).map_err(|reason| DispatchError::MalformedPath {
		path: path.to_owned(),
		reason,
	})
}

fn read_option(option: &CtlOption) -> Result<Response, DispatchError> {
	if option.ty == OptionType::Exec {
		return match &option.caps.reader {
			Some(reader) => Ok(Response::Value(reader())),
			None => Err(DispatchError::MissingCapability {
				key: option.path.to_string(),
				operation: OperationType::ReadOnly,
			}),
		};
	}
	option
		.value
		.clone()
		.map(Response::Value)
		.ok_or_else(|| unsupported(option, OperationType::ReadOnly))
}

fn unsupported(option: &CtlOption, operation: OperationType) -> DispatchError {
	DispatchError::UnsupportedOperation {
		key: option.path.to_string(),
		ty: option.ty,
		operation,
	}
}

fn missing(option: &CtlOption, operation: OperationType) -> DispatchError {
	DispatchError::MissingCapability {
		key: option.path.to_string(),
		operation,
	}
}

impl Registry {
	/// Resolves `path` and performs `operation` against the matched option.
	///
	/// Exec options delegate to their capabilities: reads return the reader's
	/// value, writes and executes return the payload they forwarded. Stored
	/// options return their value after the operation; they accept only
	/// read-only and read-write requests.
	pub fn dispatch(
		&mut self,
		path: &str,
		operation: OperationType,
	) -> Result<Response, DispatchError> {
		let result = self.dispatch_inner(path, operation);
		match &result {
			Ok(response) => {
				tracing::trace!(domain = "ctl", path, %operation, ?response, "dispatched");
			}
			Err(err) => {
				tracing::debug!(domain = "ctl", path, %operation, error = %err, "dispatch failed");
			}
		}
		result
	}

	/// Same as [`Registry::dispatch`] with every failure collapsed to `None`.
	///
	/// An execute without payload still runs the executor but yields `None`,
	/// since there is no payload to hand back.
	pub fn execute(&mut self, path: &str, operation: OperationType) -> Option<Response> {
		match self.dispatch(path, operation) {
			Ok(Response::Payload(None)) => None,
			result => result.ok(),
		}
	}

	/// Read-only dispatch through a shared reference.
	///
	/// An inline `=value` on `path` is validated but ignored.
	pub fn read(&self, path: &str) -> Result<Response, DispatchError> {
		let spec = parse(path)?;
		let idx = self.lookup(spec.key)?;
		read_option(&self.options[idx])
	}

	pub fn read_int(&self, key: &str) -> Option<i64> {
		self.read(key).ok()?.as_int()
	}

	pub fn read_bool(&self, key: &str) -> Option<bool> {
		self.read(key).ok()?.as_bool()
	}

	pub fn read_string(&self, key: &str) -> Option<String> {
		self.read(key).ok()?.into_value()?.as_str().map(str::to_owned)
	}

	fn lookup(&self, key: &str) -> Result<usize, DispatchError> {
		self.by_key
			.get(key)
			.copied()
			.ok_or_else(|| DispatchError::UnknownPath {
				key: key.to_owned(),
				suggestion: self.suggest(key),
			})
	}

	fn dispatch_inner(
		&mut self,
		path: &str,
		operation: OperationType,
	) -> Result<Response, DispatchError> {
		let spec = parse(path)?;
		if operation == OperationType::ReadWrite && spec.value.is_none() {
			return Err(DispatchError::MissingValue {
				key: spec.key.to_owned(),
			});
		}
		let idx = self.lookup(spec.key)?;
		if operation == OperationType::ReadOnly {
			return read_option(&self.options[idx]);
		}

		let enforce = self.config.enforce_write_level;
		let option = &mut self.options[idx];
		if operation == OperationType::ReadWrite
			&& enforce
			&& option.write_level == OperationType::ReadOnly
		{
			return Err(DispatchError::WriteDenied {
				key: spec.key.to_owned(),
			});
		}

		let payload = spec.value;
		match (option.ty, operation) {
			(OptionType::Exec, OperationType::ReadWrite) => match &option.caps.writer {
				Some(writer) => {
					writer(payload);
					Ok(Response::Payload(payload.map(str::to_owned)))
				}
				None => Err(missing(option, operation)),
			},
			(OptionType::Exec, OperationType::Execute) => match &option.caps.executor {
				Some(executor) => {
					executor(payload);
					Ok(Response::Payload(payload.map(str::to_owned)))
				}
				None => Err(missing(option, operation)),
			},
			(ty, OperationType::ReadWrite) => {
				// Replace, never mutate in place.
				let Some(next) = OptionValue::from_literal(ty, payload) else {
					return Err(unsupported(option, operation));
				};
				option.value = Some(next.clone());
				Ok(Response::Value(next))
			}
			_ => Err(unsupported(option, operation)),
		}
	}
}
