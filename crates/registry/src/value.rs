//! Typed option values and the permissive literal parsing shared by
//! registration, dispatch and the loaders.

use std::fmt;

/// The declared type of a registered option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
	/// Boolean value, stored as `n != 0` of a parsed integer literal.
	Bool,
	/// Owned string value.
	String,
	/// Integer value.
	Int,
	/// No stored value; every request is delegated to capabilities.
	Exec,
}

impl OptionType {
	/// Returns the display name of this type.
	pub fn type_name(self) -> &'static str {
		match self {
			OptionType::Bool => "bool",
			OptionType::String => "string",
			OptionType::Int => "int",
			OptionType::Exec => "exec",
		}
	}
}

impl fmt::Display for OptionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.type_name())
	}
}

/// The kind of request made against a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
	/// Read the current value.
	ReadOnly,
	/// Replace the value with the payload after `=`.
	ReadWrite,
	/// Run the exec capability with the optional payload.
	Execute,
	/// Reserved; never acted upon.
	Callback,
}

impl fmt::Display for OperationType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			OperationType::ReadOnly => "read-only",
			OperationType::ReadWrite => "read-write",
			OperationType::Execute => "execute",
			OperationType::Callback => "callback",
		})
	}
}

/// The value of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
	/// Boolean value (true/false).
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// String value.
	String(String),
}

impl OptionValue {
	/// Builds the stored value for a non-exec type from an optional literal.
	///
	/// Numeric literals go through [`parse_int_lossy`]; a missing literal
	/// yields zero. Returns `None` for [`OptionType::Exec`], and for
	/// [`OptionType::String`] when no literal is given.
	pub fn from_literal(ty: OptionType, literal: Option<&str>) -> Option<Self> {
		match ty {
			OptionType::Bool => Some(OptionValue::Bool(literal.map_or(0, parse_int_lossy) != 0)),
			OptionType::Int => Some(OptionValue::Int(literal.map_or(0, parse_int_lossy))),
			OptionType::String => literal.map(|s| OptionValue::String(s.to_owned())),
			OptionType::Exec => None,
		}
	}

	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			OptionValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			OptionValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			OptionValue::String(v) => Some(v),
			_ => None,
		}
	}
}

impl fmt::Display for OptionValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptionValue::Bool(v) => write!(f, "{}", u8::from(*v)),
			OptionValue::Int(v) => write!(f, "{v}"),
			OptionValue::String(v) => f.write_str(v),
		}
	}
}

/// Parses a decimal integer the permissive way.
///
/// Leading whitespace and a single sign are accepted, digits are consumed up
/// to the first non-digit, and anything without leading digits is zero.
/// Out-of-range input saturates.
pub fn parse_int_lossy(value: &str) -> i64 {
	let s = value.trim_start();
	let (negative, digits) = match s.as_bytes().first() {
		Some(b'-') => (true, &s[1..]),
		Some(b'+') => (false, &s[1..]),
		_ => (false, s),
	};

	let mut acc: i64 = 0;
	for b in digits.bytes().take_while(u8::is_ascii_digit) {
		let d = i64::from(b - b'0');
		acc = if negative {
			acc.saturating_mul(10).saturating_sub(d)
		} else {
			acc.saturating_mul(10).saturating_add(d)
		};
	}
	acc
}
