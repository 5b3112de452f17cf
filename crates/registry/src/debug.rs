//! The `debug.*` namespace.
//!
//! Registers a heap allocation fill pattern backed by a shared integer, plus
//! plain log switches.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::capability::Capabilities;
use crate::error::RegisterError;
use crate::registry::Registry;
use crate::value::{OperationType, OptionType, OptionValue, parse_int_lossy};

pub const ALLOC_PATTERN: &str = "debug.heap.alloc_pattern";
pub const LOG_ENABLE: &str = "debug.log.enable";
pub const LOG_LEVEL: &str = "debug.log.level";

/// State behind the exec-backed debug options.
#[derive(Debug, Clone, Default)]
pub struct DebugControls {
	alloc_pattern: Arc<AtomicI64>,
}

impl DebugControls {
	pub fn new() -> Self {
		Self::default()
	}

	/// Current allocation fill pattern.
	pub fn alloc_pattern(&self) -> i64 {
		self.alloc_pattern.load(Ordering::Relaxed)
	}

	/// Registers the debug namespace with its defaults.
	pub fn register(&self, registry: &mut Registry) -> Result<(), RegisterError> {
		let read = self.alloc_pattern.clone();
		let write = self.alloc_pattern.clone();
		registry.register(
			&format!("{ALLOC_PATTERN}=1"),
			OptionType::Exec,
			OperationType::ReadWrite,
			Capabilities::new()
				.reader(move || OptionValue::Int(read.load(Ordering::Relaxed)))
				.writer(move |value| {
					write.store(value.map_or(0, parse_int_lossy), Ordering::Relaxed);
				}),
		)?;
		registry.register(
			&format!("{LOG_ENABLE}=0"),
			OptionType::Int,
			OperationType::ReadWrite,
			Capabilities::new(),
		)?;
		registry.register(
			&format!("{LOG_LEVEL}=0"),
			OptionType::Int,
			OperationType::ReadWrite,
			Capabilities::new(),
		)?;
		Ok(())
	}
}
