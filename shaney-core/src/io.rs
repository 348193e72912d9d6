use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::ChainError;

/// Opens a file for buffered, line-oriented reading.
///
/// The error names the path that failed.
pub(crate) fn open_reader<P: AsRef<Path>>(filename: P) -> Result<BufReader<File>, ChainError> {
	let path = filename.as_ref();
	let file = File::open(path).map_err(|e| ChainError::at_path(path, e))?;
	Ok(BufReader::new(file))
}

/// Creates (or truncates) a file for buffered writing.
pub(crate) fn create_writer<P: AsRef<Path>>(filename: P) -> Result<BufWriter<File>, ChainError> {
	let path = filename.as_ref();
	let file = File::create(path).map_err(|e| ChainError::at_path(path, e))?;
	Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::{BufRead, Write};

	#[test]
	fn missing_file_reports_its_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nope.txt");
		let err = open_reader(&path).unwrap_err();
		assert!(err.is_io());
		assert!(err.to_string().contains("nope.txt"));
	}

	#[test]
	fn writer_output_is_readable() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("out.txt");
		{
			let mut w = create_writer(&path).unwrap();
			writeln!(w, "first").unwrap();
			writeln!(w, "second").unwrap();
		}
		let lines: Vec<String> = open_reader(&path).unwrap().lines().map(|l| l.unwrap()).collect();
		assert_eq!(lines, vec!["first", "second"]);
	}
}
