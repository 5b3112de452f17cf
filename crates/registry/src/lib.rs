//! Path-addressed control registry.
//!
//! Components register typed values or callback-driven actions under dotted
//! paths (`debug.heap.alloc_pattern`); anything holding the registry can then
//! read, write or execute them by string alone:
//!
//! ```
//! use ctl_registry::{Capabilities, OperationType, OptionType, Registry};
//!
//! let mut registry = Registry::default();
//! registry
//! 	.register("net.retries=3", OptionType::Int, OperationType::ReadWrite, Capabilities::new())
//! 	.unwrap();
//!
//! registry.dispatch("net.retries=5", OperationType::ReadWrite).unwrap();
//! assert_eq!(registry.read_int("net.retries"), Some(5));
//! ```
//!
//! # Modules
//!
//! - [`path`] - Path grammar and validation
//! - [`value`] - Option types, values and literal parsing
//! - [`capability`] - Read, write and exec callbacks
//! - [`registry`] - Option table and registration
//! - [`dispatch`] - Request resolution
//! - [`load`] - Applying `key=value` entries from text, files and env
//! - [`debug`] - The `debug.*` namespace

pub mod capability;
pub mod config;
pub mod debug;
pub mod dispatch;
mod dump;
pub mod error;
pub mod load;
pub mod option;
pub mod path;
pub mod registry;
mod shared;
pub mod value;

pub use capability::{Capabilities, CapabilitySet, Executor, Reader, Writer};
pub use config::{ConfigError, DEFAULT_CAPACITY, DuplicatePolicy, RegistryConfig};
pub use debug::DebugControls;
pub use dispatch::Response;
pub use error::{DispatchError, InsertAction, RegisterError};
pub use load::{LoadError, LoadReport, load_env, load_file, load_str};
pub use option::CtlOption;
pub use path::{PathError, PathSpec, check_path, split_path, validate_path};
pub use registry::{LOG_ENABLE, Registry};
pub use shared::SharedRegistry;
pub use value::{OperationType, OptionType, OptionValue, parse_int_lossy};
