//! Line-oriented text format for a `Chain`.
//!
//! ```text
//! <prefix_len>
//! <tok1> ... <tokN> <suffix> <count> <suffix> <count> ...
//! ```
//!
//! Fields are separated by single spaces and every record line ends with a
//! space. The empty token is written as `""`. Tokens are not escaped: a real
//! token spelled `""` cannot be told apart from the empty token.

use std::io::{BufRead, Write};
use std::path::Path;

use log::{debug, warn};

use super::chain::Chain;
use super::prefix::{EMPTY_TOKEN, Prefix, encode_key};
use super::state::State;
use crate::error::ChainError;
use crate::io::{create_writer, open_reader};

/// Writes `chain` in the model file format.
///
/// Prefix lines are sorted by key and suffixes by name, so the same table
/// always produces the same file. Readers must not depend on that order.
pub fn encode<W: Write>(chain: &Chain, mut out: W) -> Result<(), ChainError> {
	writeln!(out, "{}", chain.prefix_len())?;

	let mut entries: Vec<(&str, &State)> = chain.iter().collect();
	entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

	for (key, state) in entries {
		if key.split(' ').any(|t| t == EMPTY_TOKEN) || state.iter().any(|(s, _)| s == EMPTY_TOKEN) {
			warn!("token {} cannot be told apart from the empty token once saved", EMPTY_TOKEN);
		}

		let mut line = encode_key(key);
		line.push(' ');
		for (suffix, count) in state.iter() {
			line.push_str(suffix);
			line.push(' ');
			line.push_str(&count.to_string());
			line.push(' ');
		}
		writeln!(out, "{}", line)?;
	}

	out.flush()?;
	Ok(())
}

/// Saves `chain` to a model file, replacing any existing file.
pub fn save<P: AsRef<Path>>(chain: &Chain, path: P) -> Result<(), ChainError> {
	let path = path.as_ref();
	let writer = create_writer(path)?;
	encode(chain, writer).map_err(|e| match e {
		ChainError::Io(io) => ChainError::at_path(path, io),
		other => other,
	})?;
	debug!("wrote {} prefixes to {}", chain.len(), path.display());
	Ok(())
}

/// Parses model file lines into a new chain.
///
/// The first line declares the prefix length. Each later line is one prefix
/// record; when a prefix appears twice, the later line wins.
///
/// # Errors
/// Returns `InvalidFormat` for a missing or non-positive prefix length, a
/// line with too few prefix tokens, a suffix without a count, a count that
/// is not a positive integer, or counts on one line whose sum does not fit a
/// `usize`. Nothing is loaded when any line fails.
pub fn decode_lines<I, S>(lines: I) -> Result<Chain, ChainError>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut lines = lines.into_iter();
	let prefix_len = parse_header(&mut lines)?;

	let mut chain = Chain::new(prefix_len)?;
	for (key, state) in parse_records(lines, prefix_len)? {
		chain.insert(key, state);
	}
	Ok(chain)
}

/// Parses model file lines into an existing chain.
///
/// Records replace existing entries with the same key; other entries are kept.
///
/// # Errors
/// Same as `decode_lines`, plus `InvalidFormat` when the declared prefix
/// length differs from `chain.prefix_len()`. The chain is untouched on error.
pub fn decode_into<I, S>(chain: &mut Chain, lines: I) -> Result<(), ChainError>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut lines = lines.into_iter();
	let prefix_len = parse_header(&mut lines)?;
	if prefix_len != chain.prefix_len() {
		return Err(ChainError::invalid_format(
			1,
			format!(
				"prefix length {} does not match the chain's {}",
				prefix_len,
				chain.prefix_len()
			),
		));
	}

	for (key, state) in parse_records(lines, prefix_len)? {
		chain.insert(key, state);
	}
	Ok(())
}

/// Reads a whole model from `reader`.
pub fn decode<R: BufRead>(reader: R) -> Result<Chain, ChainError> {
	let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
	decode_lines(lines)
}

/// Loads a model file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Chain, ChainError> {
	let path = path.as_ref();
	let reader = open_reader(path)?;
	let lines = reader
		.lines()
		.collect::<Result<Vec<_>, _>>()
		.map_err(|e| ChainError::at_path(path, e))?;
	let chain = decode_lines(lines)?;
	debug!("loaded {} prefixes from {}", chain.len(), path.display());
	Ok(chain)
}

/// Reads the first line, which declares the prefix length.
fn parse_header<I, S>(lines: &mut I) -> Result<usize, ChainError>
where
	I: Iterator<Item = S>,
	S: AsRef<str>,
{
	let header = lines
		.next()
		.ok_or_else(|| ChainError::invalid_format(1, "missing prefix length"))?;
	let header = header.as_ref();
	match header.trim().parse::<usize>() {
		Ok(n) if n > 0 => Ok(n),
		_ => Err(ChainError::invalid_format(
			1,
			format!("prefix length should be a positive number, got {:?}", header),
		)),
	}
}

/// Parses every record line; line numbers in errors are 1-based and count the header.
fn parse_records<I, S>(lines: I, prefix_len: usize) -> Result<Vec<(String, State)>, ChainError>
where
	I: Iterator<Item = S>,
	S: AsRef<str>,
{
	let mut records = Vec::new();
	for (i, line) in lines.enumerate() {
		if let Some(record) = parse_record(i + 2, line.as_ref(), prefix_len)? {
			records.push(record);
		}
	}
	Ok(records)
}

fn parse_record(
	line_no: usize,
	line: &str,
	prefix_len: usize,
) -> Result<Option<(String, State)>, ChainError> {
	if line.trim().is_empty() {
		return Ok(None);
	}

	let mut fields: Vec<&str> = line.split(' ').collect();
	// Every record ends with a space, leaving one empty field.
	if fields.last() == Some(&"") {
		fields.pop();
	}

	if fields.len() < prefix_len {
		return Err(ChainError::invalid_format(
			line_no,
			format!("expected {} prefix tokens, found {}", prefix_len, fields.len()),
		));
	}

	let (prefix_fields, suffix_fields) = fields.split_at(prefix_len);
	if suffix_fields.len() % 2 != 0 {
		return Err(ChainError::invalid_format(line_no, "suffix without a frequency"));
	}

	let mut state = State::new();
	let mut total: usize = 0;
	for pair in suffix_fields.chunks(2) {
		let (suffix, count) = (pair[0], pair[1]);
		let n = match count.parse::<usize>() {
			Ok(n) if n > 0 => n,
			_ => {
				return Err(ChainError::invalid_format(
					line_no,
					format!("frequency should be a positive number, got {:?}", count),
				));
			}
		};
		// The sum of a record's counts is the draw range during generation.
		total = total.checked_add(n).ok_or_else(|| {
			ChainError::invalid_format(line_no, "frequencies add up past the maximum count")
		})?;
		state.set_transition(suffix, n);
	}

	Ok(Some((Prefix::decode(prefix_fields).key(), state)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::chain::tests::table;

	fn encoded(chain: &Chain) -> String {
		let mut out = Vec::new();
		encode(chain, &mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	fn sample() -> Chain {
		let mut chain = Chain::new(1).unwrap();
		chain.build("a b a b a c".split_whitespace());
		chain
	}

	#[test]
	fn writes_expected_lines() {
		assert_eq!(encoded(&sample()), "1\n\"\" a 1 \na b 2 c 1 \nb a 2 \n");
	}

	#[test]
	fn round_trips_table() {
		let chain = sample();
		let text = encoded(&chain);
		let loaded = decode_lines(text.lines()).unwrap();
		assert_eq!(loaded.prefix_len(), 1);
		assert_eq!(table(&loaded), table(&chain));
	}

	#[test]
	fn empty_prefix_tokens_round_trip() {
		let mut chain = Chain::new(3).unwrap();
		chain.build(["one", "two", "three", "four"]);
		let text = encoded(&chain);
		assert!(text.contains("\"\" \"\" \"\" one 1 \n"));
		assert!(text.contains("\"\" \"\" one two 1 \n"));
		assert!(text.contains("\"\" one two three 1 \n"));

		let loaded = decode_lines(text.lines()).unwrap();
		assert_eq!(loaded.get("  ").map(|s| s.count("one")), Some(1));
		assert_eq!(loaded.get("  one").map(|s| s.count("two")), Some(1));
		assert_eq!(loaded.get(" one two").map(|s| s.count("three")), Some(1));
		assert_eq!(table(&loaded), table(&chain));
	}

	#[test]
	fn round_trips_through_a_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model.txt");
		let chain = sample();
		save(&chain, &path).unwrap();
		let loaded = load(&path).unwrap();
		assert_eq!(table(&loaded), table(&chain));
	}

	#[test]
	fn reader_decode_matches_line_decode() {
		let text = "2\n\"\" \"\" hi 3 \n\"\" hi there 1 \n";
		let from_reader = decode(text.as_bytes()).unwrap();
		let from_lines = decode_lines(text.lines()).unwrap();
		assert_eq!(table(&from_reader), table(&from_lines));
		assert_eq!(from_reader.get(" ").map(|s| s.count("hi")), Some(3));
		assert_eq!(from_reader.get(" hi").map(|s| s.count("there")), Some(1));
	}

	#[test]
	fn later_duplicate_line_wins() {
		let chain = decode_lines(["1", "a b 5 ", "a c 1 "]).unwrap();
		let state = chain.get("a").unwrap();
		assert_eq!(state.count("b"), 0);
		assert_eq!(state.count("c"), 1);
	}

	#[test]
	fn blank_lines_are_skipped() {
		let chain = decode_lines(["1", "", "a b 1 ", "   "]).unwrap();
		assert_eq!(chain.len(), 1);
	}

	#[test]
	fn missing_trailing_space_is_accepted() {
		let chain = decode_lines(["1", "a b 2"]).unwrap();
		assert_eq!(chain.get("a").map(|s| s.count("b")), Some(2));
	}

	fn format_error_line(result: Result<Chain, ChainError>) -> usize {
		match result {
			Err(ChainError::InvalidFormat { line, .. }) => line,
			other => panic!("expected InvalidFormat, got {other:?}"),
		}
	}

	#[test]
	fn rejects_bad_header() {
		assert_eq!(format_error_line(decode_lines(Vec::<String>::new())), 1);
		assert_eq!(format_error_line(decode_lines(["x"])), 1);
		assert_eq!(format_error_line(decode_lines(["0"])), 1);
		assert_eq!(format_error_line(decode_lines(["-2"])), 1);
	}

	#[test]
	fn rejects_bad_frequency() {
		assert_eq!(format_error_line(decode_lines(["1", "a b 1 ", "b a x "])), 3);
		assert_eq!(format_error_line(decode_lines(["1", "a b 0 "])), 2);
		assert_eq!(format_error_line(decode_lines(["1", "a b -1 "])), 2);
	}

	#[test]
	fn rejects_frequencies_summing_past_usize() {
		let huge = usize::MAX.to_string();
		let line = format!("\"\" b {} c 1 ", huge);
		assert_eq!(format_error_line(decode_lines(["1", "a b 1 ", line.as_str()])), 3);

		let single = format!("\"\" b {} ", huge);
		let chain = decode_lines(["1", single.as_str()]).unwrap();
		assert_eq!(chain.get("").map(State::total), Some(usize::MAX));
	}

	#[test]
	fn rejects_odd_suffix_fields() {
		assert_eq!(format_error_line(decode_lines(["1", "a b 1 c "])), 2);
	}

	#[test]
	fn rejects_short_prefix() {
		assert_eq!(format_error_line(decode_lines(["3", "a b "])), 2);
	}

	#[test]
	fn decode_into_checks_prefix_length() {
		let mut chain = Chain::new(2).unwrap();
		let err = decode_into(&mut chain, ["1", "a b 1 "]).unwrap_err();
		assert!(matches!(err, ChainError::InvalidFormat { line: 1, .. }));
		assert!(chain.is_empty());
	}

	#[test]
	fn decode_into_is_all_or_nothing() {
		let mut chain = Chain::new(1).unwrap();
		chain.build(["x", "y"]);
		let before = table(&chain);
		assert!(decode_into(&mut chain, ["1", "a b 1 ", "b c oops "]).is_err());
		assert_eq!(table(&chain), before);

		decode_into(&mut chain, ["1", "x z 4 "]).unwrap();
		assert_eq!(chain.get("x").map(|s| s.count("z")), Some(4));
		assert_eq!(chain.get("x").map(|s| s.count("y")), Some(0));
		assert_eq!(chain.get("").map(|s| s.count("x")), Some(1));
	}
}
