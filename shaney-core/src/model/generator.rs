use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::chain::Chain;
use super::prefix::Prefix;

/// Random walk over a `Chain`.
///
/// # Responsibilities
/// - Own the random number generator used for every draw
/// - Start each walk from the all-empty prefix
/// - Pick each next token with probability proportional to its count
///
/// A walk stops after the requested number of tokens, or earlier when the
/// current prefix has no recorded continuation.
#[derive(Debug)]
pub struct Generator<'a, R = StdRng> {
	chain: &'a Chain,
	rng: R,
}

impl<'a> Generator<'a, StdRng> {
	/// Creates a generator seeded once from the current time.
	///
	/// Two generators built at different instants produce different text.
	pub fn new(chain: &'a Chain) -> Self {
		let seed = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_nanos() as u64)
			.unwrap_or_default();
		Self::with_rng(chain, StdRng::seed_from_u64(seed))
	}
}

impl<'a, R: Rng> Generator<'a, R> {
	/// Creates a generator drawing from `rng`.
	pub fn with_rng(chain: &'a Chain, rng: R) -> Self {
		Self { chain, rng }
	}

	/// Generates at most `n` tokens.
	pub fn generate(&mut self, n: usize) -> Vec<String> {
		let mut prefix = Prefix::new(self.chain.prefix_len());
		let mut words = Vec::new();

		for _ in 0..n {
			let state = match self.chain.get_prefix(&prefix) {
				Some(state) => state,
				None => break,
			};
			let next = match state.pick(&mut self.rng) {
				Some(word) => word,
				None => break,
			};
			prefix.shift(next);
			words.push(next.to_owned());
		}

		words
	}

	/// Generates at most `n` tokens joined by single spaces.
	pub fn generate_text(&mut self, n: usize) -> String {
		self.generate(n).join(" ")
	}
}
