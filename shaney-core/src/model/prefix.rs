/// Persisted spelling of the empty token.
pub const EMPTY_TOKEN: &str = "\"\"";

/// A fixed-length window over the most recent tokens.
///
/// A fresh prefix holds only empty tokens, which stand for "before the first word".
/// The length is fixed at construction; `shift` is the only way to change the contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
	words: Vec<String>,
}

impl Prefix {
	/// Creates an all-empty prefix of `len` tokens.
	pub fn new(len: usize) -> Self {
		Self { words: vec![String::new(); len] }
	}

	/// Builds a prefix from its persisted fields, mapping `""` back to the empty token.
	pub fn decode<S: AsRef<str>>(fields: &[S]) -> Self {
		let words = fields
			.iter()
			.map(|f| {
				let f = f.as_ref();
				if f == EMPTY_TOKEN { String::new() } else { f.to_owned() }
			})
			.collect();
		Self { words }
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	pub fn words(&self) -> &[String] {
		&self.words
	}

	/// Drops the oldest token and appends `word`.
	pub fn shift(&mut self, word: &str) {
		if self.words.is_empty() {
			return;
		}
		self.words.rotate_left(1);
		if let Some(last) = self.words.last_mut() {
			last.clear();
			last.push_str(word);
		}
	}

	/// Clears every token back to empty.
	pub fn reset(&mut self) {
		self.words.iter_mut().for_each(String::clear);
	}

	/// Table key: tokens joined by single spaces, empty tokens left empty.
	pub fn key(&self) -> String {
		self.words.join(" ")
	}

	/// Persisted form: like `key`, but every empty token is written as `""`.
	pub fn encode(&self) -> String {
		encode_key(&self.key())
	}
}

/// Converts a table key into its persisted form.
///
/// Each token is checked on its own, so an all-empty key and a key with a
/// leading run of empty tokens go through the same path.
pub fn encode_key(key: &str) -> String {
	key.split(' ')
		.map(|token| if token.is_empty() { EMPTY_TOKEN } else { token })
		.collect::<Vec<_>>()
		.join(" ")
}
