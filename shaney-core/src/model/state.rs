use std::collections::BTreeMap;

use rand::Rng;

/// The suffixes observed after one prefix, with their occurrence counts.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - Each occurrence count is strictly positive
/// - Suffixes are kept in lexicographic order, which fixes the order of the
///   weighted candidate pool used by `pick`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
	/// Example: { "cat" => 42, "dog" => 3 }
	transitions: BTreeMap<String, usize>,
}

impl State {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `suffix`, starting at 1 if it is new.
	pub fn add_transition(&mut self, suffix: &str) {
		match self.transitions.get_mut(suffix) {
			Some(count) => *count += 1,
			None => {
				self.transitions.insert(suffix.to_owned(), 1);
			}
		}
	}

	/// Sets the count of `suffix` outright. Used when loading a persisted model.
	///
	/// A zero count is ignored so the positivity invariant holds.
	pub fn set_transition(&mut self, suffix: &str, count: usize) {
		if count > 0 {
			self.transitions.insert(suffix.to_owned(), count);
		}
	}

	pub fn count(&self, suffix: &str) -> usize {
		self.transitions.get(suffix).copied().unwrap_or(0)
	}

	/// Sum of all counts, i.e. the size of the weighted candidate pool.
	///
	/// Saturates at `usize::MAX` rather than overflowing.
	pub fn total(&self) -> usize {
		self.transitions.values().fold(0, |acc, n| acc.saturating_add(*n))
	}

	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Suffixes and counts in lexicographic order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.transitions.iter().map(|(k, v)| (k.as_str(), *v))
	}

	/// Picks a suffix with probability proportional to its count.
	///
	/// The candidate pool is every suffix repeated `count` times, in suffix
	/// order. A single uniform index in `[0, total)` selects from it; walking
	/// the cumulative counts finds the same entry without materialising the pool.
	///
	/// Returns `None` if the state has no transitions.
	pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (suffix, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(suffix);
			}
			r -= occurrence;
		}

		None
	}
}

impl FromIterator<(String, usize)> for State {
	fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
		let mut state = State::new();
		for (suffix, count) in iter {
			state.set_transition(&suffix, count);
		}
		state
	}
}
