use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building, loading or saving a chain.
#[derive(Debug, Error)]
pub enum ChainError {
	/// The persisted model text is malformed. `line` is 1-based.
	#[error("invalid model format at line {line}: {reason}")]
	InvalidFormat { line: usize, reason: String },

	/// A caller supplied a count that must be positive.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// Reading or writing a named file failed.
	#[error("cannot access {}: {source}", .path.display())]
	Source {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// Reading a token stream or writing model text failed.
	#[error(transparent)]
	Io(#[from] io::Error),
}

impl ChainError {
	pub(crate) fn invalid_format(line: usize, reason: impl Into<String>) -> Self {
		ChainError::InvalidFormat { line, reason: reason.into() }
	}

	pub(crate) fn at_path(path: impl Into<PathBuf>, source: io::Error) -> Self {
		ChainError::Source { path: path.into(), source }
	}

	/// True for failures of the underlying input or output, as opposed to bad content.
	pub fn is_io(&self) -> bool {
		matches!(self, ChainError::Io(_) | ChainError::Source { .. })
	}
}
