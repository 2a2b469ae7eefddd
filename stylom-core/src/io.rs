use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{fs, io};

use crate::error::Result;
use crate::model::profile::AuthorProfile;

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory (UTF-8)
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Writes generated text to `path` as plain UTF-8, overwriting any
/// existing content, with a trailing newline.
pub fn write_generated<P: AsRef<Path>>(path: P, text: &str) -> io::Result<()> {
	let mut contents = text.to_owned();
	contents.push('\n');
	fs::write(path, contents)
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `corpus/Verne` + `"bin"` → `corpus/Verne.bin`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Serializes author profiles to a compact binary cache.
///
/// Rebuilding profiles from a large corpus is the slow part of every
/// run; the cache makes repeated classification calls cheap.
pub fn save_profiles<P: AsRef<Path>>(path: P, profiles: &[AuthorProfile]) -> Result<()> {
	let bytes = postcard::to_stdvec(profiles)?;
	fs::write(path, bytes).map_err(Into::into)
}

/// Loads author profiles back from a binary cache written by
/// `save_profiles`.
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<AuthorProfile>> {
	let bytes = fs::read(path)?;
	Ok(postcard::from_bytes(&bytes)?)
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted for stable processing
/// order across platforms.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

/// Lists the subdirectory names of a directory, sorted.
///
/// The corpus layout is one subdirectory per author.
pub fn list_dirs<P: AsRef<Path>>(dir: P) -> io::Result<Vec<String>> {
	let mut dirs = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_dir() {
			if let Some(name) = path.file_name() {
				dirs.push(name.to_string_lossy().to_string());
			}
		}
	}

	dirs.sort();
	Ok(dirs)
}
