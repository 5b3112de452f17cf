use std::sync::Arc;

use parking_lot::Mutex;

use crate::capability::Capabilities;
use crate::config::RegistryConfig;
use crate::dispatch::Response;
use crate::error::{DispatchError, InsertAction, RegisterError};
use crate::registry::Registry;
use crate::value::{OperationType, OptionType};

/// Cloneable handle serializing all access to one [`Registry`].
///
/// Capabilities run while the lock is held, so a callback must not call
/// back into the same handle.
#[derive(Clone, Default)]
pub struct SharedRegistry {
	inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
	pub fn new(config: RegistryConfig) -> Self {
		Self::from(Registry::new(config))
	}

	pub fn register(
		&self,
		path: &str,
		ty: OptionType,
		write_level: OperationType,
		caps: Capabilities,
	) -> Result<InsertAction, RegisterError> {
		self.inner.lock().register(path, ty, write_level, caps)
	}

	pub fn dispatch(
		&self,
		path: &str,
		operation: OperationType,
	) -> Result<Response, DispatchError> {
		self.inner.lock().dispatch(path, operation)
	}

	pub fn execute(&self, path: &str, operation: OperationType) -> Option<Response> {
		self.inner.lock().execute(path, operation)
	}

	pub fn exists(&self, path: &str) -> bool {
		self.inner.lock().exists(path)
	}

	pub fn dump(&self) {
		self.inner.lock().dump();
	}

	/// Runs `f` with exclusive access to the registry.
	pub fn with<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
		f(&mut self.inner.lock())
	}
}

impl From<Registry> for SharedRegistry {
	fn from(registry: Registry) -> Self {
		Self {
			inner: Arc::new(Mutex::new(registry)),
		}
	}
}

impl std::fmt::Debug for SharedRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut tuple = f.debug_tuple("SharedRegistry");
		match self.inner.try_lock() {
			Some(registry) => tuple.field(&*registry),
			None => tuple.field(&format_args!("<locked>")),
		};
		tuple.finish()
	}
}

#[cfg(test)]
mod tests {
	use std::thread;

	use super::*;

	#[test]
	fn concurrent_writers_serialize() {
		let shared = SharedRegistry::default();
		shared
			.register("count=0", OptionType::Int, OperationType::ReadWrite, Capabilities::new())
			.unwrap();

		let handles: Vec<_> = (0..8)
			.map(|_| {
				let shared = shared.clone();
				thread::spawn(move || {
					for _ in 0..100 {
						shared.with(|registry| {
							let next = registry.read_int("count").unwrap_or(0) + 1;
							registry
								.dispatch(&format!("count={next}"), OperationType::ReadWrite)
								.unwrap();
						});
					}
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}

		assert_eq!(shared.with(|r| r.read_int("count")), Some(800));
	}

	#[test]
	fn handles_share_state() {
		let a = SharedRegistry::default();
		let b = a.clone();
		a.register("k=1", OptionType::Int, OperationType::ReadWrite, Capabilities::new())
			.unwrap();
		assert!(b.exists("k"));
		assert_eq!(b.execute("k", OperationType::ReadOnly).unwrap().as_int(), Some(1));
	}

	#[test]
	fn debug_format_does_not_block_while_held() {
		let shared = SharedRegistry::default();
		let inside = shared.with(|_| format!("{shared:?}"));
		assert_eq!(inside, "SharedRegistry(<locked>)");
		let outside = format!("{shared:?}");
		assert!(outside.starts_with("SharedRegistry(Registry {"), "{outside}");
	}
}
