use crate::path::PathError;
use crate::value::{OperationType, OptionType};

/// Outcome of a successful registration.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertAction {
	/// Key was new; option appended.
	InsertedNew,
	/// Key existed; kept the existing option (policy chose existing).
	KeptExisting,
	/// Key existed; replaced with the new option (policy chose new).
	ReplacedExisting,
}

/// Registration failures.
///
/// Registration is best-effort for callers that ignore the result; none of
/// these leave a partially registered option behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
	#[error("malformed path '{path}': {reason}")]
	MalformedPath { path: String, reason: PathError },

	#[error("string option '{key}' registered without '=value'")]
	MissingValue { key: String },

	#[error("option table full ({capacity} entries), dropped '{key}'")]
	Full { key: String, capacity: usize },

	#[error("option '{key}' is already registered")]
	Duplicate { key: String },
}

/// Why a dispatch produced no result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
	#[error("malformed path '{path}': {reason}")]
	MalformedPath { path: String, reason: PathError },

	#[error("write to '{key}' carries no '=value'")]
	MissingValue { key: String },

	#[error("unknown path: {key}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	UnknownPath {
		key: String,
		suggestion: Option<String>,
	},

	#[error("'{key}' has no capability for {operation} requests")]
	MissingCapability { key: String, operation: OperationType },

	#[error("{operation} is not supported on {ty} option '{key}'")]
	UnsupportedOperation {
		key: String,
		ty: OptionType,
		operation: OperationType,
	},

	#[error("'{key}' was registered read-only")]
	WriteDenied { key: String },
}
