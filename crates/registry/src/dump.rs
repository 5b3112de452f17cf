use std::io;

use crate::option::CtlOption;
use crate::registry::{LOG_ENABLE, Registry};
use crate::value::OptionType;

fn rendered_value(option: &CtlOption) -> String {
	match (option.ty, &option.value) {
		(OptionType::Exec, _) | (_, None) => "callback".to_owned(),
		(_, Some(value)) => value.to_string(),
	}
}

impl Registry {
	/// Whether diagnostic output is enabled through `ctl.log.enable`.
	pub fn log_enabled(&self) -> bool {
		self.read_bool(LOG_ENABLE).unwrap_or(false)
	}

	/// Emits one `info` event per registered option when logging is enabled.
	pub fn dump(&self) {
		if !self.log_enabled() {
			return;
		}
		for option in self.iter() {
			tracing::info!(
				domain = "ctl",
				path = option.path(),
				ty = %option.option_type(),
				value = %rendered_value(option),
				"option",
			);
		}
	}

	/// Writes `Path: .., Type: .., Value: ..` lines when logging is enabled.
	pub fn write_dump(&self, out: &mut impl io::Write) -> io::Result<()> {
		if !self.log_enabled() {
			return Ok(());
		}
		for option in self.iter() {
			writeln!(
				out,
				"Path: {}, Type: {}, Value: {}",
				option.path(),
				option.option_type(),
				rendered_value(option)
			)?;
		}
		Ok(())
	}
}
