use crate::capability::{Capabilities, CapabilitySet};
use crate::value::{OperationType, OptionType, OptionValue};

/// One registered control point.
#[derive(Debug)]
pub struct CtlOption {
	pub(crate) path: Box<str>,
	pub(crate) ty: OptionType,
	/// `None` exactly when `ty` is [`OptionType::Exec`].
	pub(crate) value: Option<OptionValue>,
	pub(crate) caps: Capabilities,
	pub(crate) write_level: OperationType,
}

impl CtlOption {
	pub fn path(&self) -> &str {
		&self.path
	}

	pub fn option_type(&self) -> OptionType {
		self.ty
	}

	/// Stored value; `None` for exec options.
	pub fn value(&self) -> Option<&OptionValue> {
		self.value.as_ref()
	}

	/// Operation level declared at registration.
	pub fn write_level(&self) -> OperationType {
		self.write_level
	}

	pub fn capabilities(&self) -> CapabilitySet {
		self.caps.set()
	}
}
