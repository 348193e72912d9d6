use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::build_options::{BuildOptions, InputErrorPolicy, WindowPolicy};
use super::prefix::Prefix;
use super::state::State;
use crate::error::ChainError;
use crate::io::open_reader;

/// A word-level Markov chain: prefix key → suffix counts.
///
/// Keys are `Prefix::key` strings, i.e. `prefix_len` tokens joined by single
/// spaces with empty tokens left empty.
///
/// # Responsibilities
/// - Build the table from one or more token streams
/// - Look up the suffix counts of a prefix
/// - Accept whole states from the model file loader
///
/// # Invariants
/// - `prefix_len` is always >= 1 and never changes
/// - Every stored count is >= 1
/// - The build window always holds `prefix_len` tokens
#[derive(Clone, Debug)]
pub struct Chain {
	prefix_len: usize,

	/// Mapping from a prefix key to the suffixes seen after it
	states: HashMap<String, State>,

	/// Sliding window used by `add`; survives between build calls
	window: Prefix,
}

/// A source that `build_sources` could not read to the end.
#[derive(Debug)]
pub struct SkippedSource {
	pub path: PathBuf,
	pub error: ChainError,
	/// Tokens recorded from this source before the failure.
	pub tokens: usize,
}

/// Outcome of `build_sources`.
#[derive(Debug, Default)]
pub struct BuildReport {
	pub sources_read: usize,
	pub skipped: Vec<SkippedSource>,
	/// Every token recorded, including those from skipped sources.
	pub tokens: usize,
}

impl Chain {
	/// Creates an empty chain with prefixes of `prefix_len` tokens.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `prefix_len` is 0.
	pub fn new(prefix_len: usize) -> Result<Self, ChainError> {
		if prefix_len == 0 {
			return Err(ChainError::InvalidArgument(
				"prefix length must be a positive number".to_owned(),
			));
		}
		Ok(Self { prefix_len, states: HashMap::new(), window: Prefix::new(prefix_len) })
	}

	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Suffix counts recorded for a prefix key.
	pub fn get(&self, key: &str) -> Option<&State> {
		self.states.get(key)
	}

	pub fn get_prefix(&self, prefix: &Prefix) -> Option<&State> {
		self.states.get(&prefix.key())
	}

	/// All (key, state) pairs, in no particular order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &State)> {
		self.states.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Stores `state` under `key`, replacing whatever was there.
	///
	/// Returns the replaced state, if any.
	pub fn insert(&mut self, key: String, state: State) -> Option<State> {
		self.states.insert(key, state)
	}

	/// Puts the build window back to all-empty tokens.
	pub fn reset_window(&mut self) {
		self.window.reset();
	}

	/// Records `word` as a suffix of the current window, then shifts it in.
	pub fn add(&mut self, word: &str) {
		let key = self.window.key();
		self.states.entry(key).or_default().add_transition(word);
		self.window.shift(word);
	}

	/// Adds every token of `tokens` in order. Returns how many were consumed.
	pub fn build<I, S>(&mut self, tokens: I) -> usize
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut consumed = 0;
		for token in tokens {
			self.add(token.as_ref());
			consumed += 1;
		}
		consumed
	}

	/// Adds every whitespace-separated token read from `reader`.
	///
	/// Running out of input is normal termination. Returns how many tokens
	/// were consumed.
	///
	/// # Errors
	/// Returns `Io` if the reader fails (including on invalid UTF-8). Tokens
	/// read before the failure stay recorded.
	pub fn build_from_reader<R: BufRead>(&mut self, reader: R) -> Result<usize, ChainError> {
		let mut consumed = 0;
		self.build_counted(reader, &mut consumed)?;
		Ok(consumed)
	}

	/// Like `build_from_reader`, but `consumed` stays accurate when reading fails.
	fn build_counted<R: BufRead>(
		&mut self,
		reader: R,
		consumed: &mut usize,
	) -> Result<(), ChainError> {
		for line in reader.lines() {
			*consumed += self.build(line?.split_whitespace());
		}
		Ok(())
	}

	/// Builds from several files in order.
	///
	/// # Behavior
	/// - With `InputErrorPolicy::Skip`, an unreadable source is logged and
	///   recorded in the report, and the build goes on.
	/// - With `InputErrorPolicy::Abort`, the first failure is returned.
	/// - With `WindowPolicy::Reset`, the window is cleared before each source;
	///   otherwise the sources behave as one concatenated stream.
	pub fn build_sources<P: AsRef<Path>>(
		&mut self,
		paths: &[P],
		options: &BuildOptions,
	) -> Result<BuildReport, ChainError> {
		let mut report = BuildReport::default();

		for path in paths {
			let path = path.as_ref();
			if options.window == WindowPolicy::Reset {
				self.reset_window();
			}

			let mut tokens = 0;
			let result =
				open_reader(path).and_then(|reader| self.build_counted(reader, &mut tokens));
			report.tokens += tokens;
			match result {
				Ok(()) => {
					debug!("read {} tokens from {}", tokens, path.display());
					report.sources_read += 1;
				}
				Err(e) if options.on_input_error == InputErrorPolicy::Skip => {
					warn!("skipping rest of {} after {} tokens: {}", path.display(), tokens, e);
					report.skipped.push(SkippedSource {
						path: path.to_owned(),
						error: e,
						tokens,
					});
				}
				Err(e) => return Err(e),
			}
		}

		Ok(report)
	}
}
