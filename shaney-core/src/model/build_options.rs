use serde::Deserialize;

/// What a multi-source build does when one source cannot be read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputErrorPolicy {
	/// Log the failure, record it in the report and continue with the next source.
	#[default]
	Skip,
	/// Stop the build and return the error.
	Abort,
}

/// What happens to the prefix window between two sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowPolicy {
	/// Sources are one continuous stream; the window carries over.
	#[default]
	Continue,
	/// Each source starts from an all-empty window.
	Reset,
}

/// Parameters for `Chain::build_sources`.
///
/// Deserializable so it can be read from the `[build]` table of a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
	pub on_input_error: InputErrorPolicy,
	pub window: WindowPolicy,
}

impl BuildOptions {
	pub fn aborting(mut self) -> Self {
		self.on_input_error = InputErrorPolicy::Abort;
		self
	}

	pub fn resetting_window(mut self) -> Self {
		self.window = WindowPolicy::Reset;
		self
	}
}
