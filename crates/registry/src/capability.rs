use std::fmt;
use std::sync::Arc;

use crate::value::OptionValue;

/// Produces the value returned for a read-only request.
pub type Reader = Arc<dyn Fn() -> OptionValue + Send + Sync>;

/// Receives the raw payload of a write, or `None` when priming without an
/// initial literal.
pub type Writer = Arc<dyn Fn(Option<&str>) + Send + Sync>;

/// Receives the optional payload of an execute request.
pub type Executor = Arc<dyn Fn(Option<&str>) + Send + Sync>;

bitflags::bitflags! {
	/// Which capabilities an option carries.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct CapabilitySet: u8 {
		/// Read requests are intercepted.
		const READ = 1 << 0;
		/// Write requests are intercepted.
		const WRITE = 1 << 1;
		/// Execute requests are accepted.
		const EXEC = 1 << 2;
	}
}

/// Optional callbacks attached to an option at registration.
#[derive(Clone, Default)]
pub struct Capabilities {
	pub(crate) reader: Option<Reader>,
	pub(crate) writer: Option<Writer>,
	pub(crate) executor: Option<Executor>,
}

impl Capabilities {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn reader(mut self, f: impl Fn() -> OptionValue + Send + Sync + 'static) -> Self {
		self.reader = Some(Arc::new(f));
		self
	}

	pub fn writer(mut self, f: impl Fn(Option<&str>) + Send + Sync + 'static) -> Self {
		self.writer = Some(Arc::new(f));
		self
	}

	pub fn executor(mut self, f: impl Fn(Option<&str>) + Send + Sync + 'static) -> Self {
		self.executor = Some(Arc::new(f));
		self
	}

	/// Returns the set of capabilities present.
	pub fn set(&self) -> CapabilitySet {
		let mut set = CapabilitySet::empty();
		set.set(CapabilitySet::READ, self.reader.is_some());
		set.set(CapabilitySet::WRITE, self.writer.is_some());
		set.set(CapabilitySet::EXEC, self.executor.is_some());
		set
	}
}

impl fmt::Debug for Capabilities {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Capabilities").field(&self.set()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn set_tracks_attached_callbacks() {
		assert!(Capabilities::new().set().is_empty());

		let caps = Capabilities::new()
			.reader(|| OptionValue::Int(1))
			.executor(|_| {});
		assert_eq!(caps.set(), CapabilitySet::READ | CapabilitySet::EXEC);
	}
}
