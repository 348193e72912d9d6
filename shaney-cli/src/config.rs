use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use shaney_core::BuildOptions;

/// Settings read from the optional config file.
///
/// ```toml
/// [build]
/// on_input_error = "abort"   # or "skip"
/// window = "reset"           # or "continue"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShaneyConfig {
	#[serde(default)]
	pub build: BuildOptions,
}

impl ShaneyConfig {
	/// Loads the config from `explicit`, else from the default location.
	///
	/// A missing file at the default location yields the defaults; a missing
	/// file named explicitly is an error.
	pub fn load(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::read(path);
		}

		match resolve_config_path() {
			Some(path) if path.exists() => Self::read(&path),
			_ => Ok(ShaneyConfig::default()),
		}
	}

	fn read(path: &Path) -> Result<Self> {
		let raw = fs::read_to_string(path)
			.with_context(|| format!("failed to read config file {}", path.display()))?;
		let parsed: ShaneyConfig = toml::from_str(&raw)
			.with_context(|| format!("failed to parse TOML from {}", path.display()))?;
		log::debug!("loaded config from {}", path.display());
		Ok(parsed)
	}
}

fn resolve_config_path() -> Option<PathBuf> {
	if let Ok(path) = env::var("SHANEY_CONFIG") {
		return Some(PathBuf::from(path));
	}

	dirs::config_dir().map(|base| base.join("shaney").join("config.toml"))
}
