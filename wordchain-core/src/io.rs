use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{ChainError, Result};

/// Reads a text file into memory.
///
/// - Keeps at most `max_chars` characters (`0` keeps everything)
/// - Truncation is UTF-8 aware
pub fn read_text<P: AsRef<Path>>(filename: P, max_chars: usize) -> io::Result<String> {
	let mut contents = fs::read_to_string(&filename)?;
	let cut = match max_chars {
		0 => None,
		n => contents.char_indices().nth(n).map(|(index, _)| index),
	};
	if let Some(cut) = cut {
		contents.truncate(cut);
	}
	debug!("Read {} bytes from {}", contents.len(), filename.as_ref().display());
	Ok(contents)
}

/// Builds an output path beside an input path with a new suffix.
///
/// Example:
/// `data/input.txt` + `"out.txt"` → `data/input.out.txt`
pub fn build_output_path<P: AsRef<Path>>(input_path: P, suffix: &str) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut file_name = file_stem.to_os_string();
	file_name.push(".");
	file_name.push(suffix);

	Ok(parent.join(file_name))
}

/// Checks that `path` may be written.
///
/// # Errors
/// Returns [`ChainError::OutputExists`] if the file exists and `force` is false.
pub fn ensure_writable<P: AsRef<Path>>(path: P, force: bool) -> Result<()> {
	let path = path.as_ref();
	if !force && path.exists() {
		return Err(ChainError::OutputExists(path.to_path_buf()));
	}
	Ok(())
}

/// Writes one sentence per line.
pub fn write_sentences<P: AsRef<Path>, S: AsRef<str>>(path: P, sentences: &[S]) -> io::Result<()> {
	let mut writer = BufWriter::new(File::create(&path)?);
	for sentence in sentences {
		writeln!(writer, "{}", sentence.as_ref())?;
	}
	writer.flush()?;
	debug!("Wrote {} sentences to {}", sentences.len(), path.as_ref().display());
	Ok(())
}
