use std::ffi::OsStr;
use std::fs;
use std::io;
use std::os::unix::ffi::OsStrExt;

use tracing::debug;

use crate::error::ShellError;
use crate::types::ExecutablePath;

/// Ordered list of directories taken from a colon-separated variable.
pub struct SearchPath<'a> {
	directories: Vec<&'a [u8]>,
}

impl<'a> SearchPath<'a> {
	/// Fails when the variable is unset or empty; `var_name` only labels the error.
	pub fn new(value: Option<&'a OsStr>, var_name: &str) -> Result<SearchPath<'a>, ShellError> {
		match value {
			Some(value) if !value.is_empty() => Ok(SearchPath {
				directories: value.as_bytes().split(|&c| c == b':').collect(),
			}),
			_ => Err(ShellError::SearchPathUnset(var_name.to_string())),
		}
	}

	#[cfg(test)]
	fn directories(&self) -> &[&'a [u8]] {
		&self.directories
	}

	fn lookup_in(directory: &[u8], name: &[u8]) -> io::Result<bool> {
		for entry in fs::read_dir(OsStr::from_bytes(directory))? {
			if entry?.file_name().as_bytes() == name {
				return Ok(true);
			}
		}
		Ok(false)
	}

	/// First directory, in path order, holding an entry named exactly `name`.
	/// Directories that cannot be listed are skipped.
	pub fn resolve(&self, name: &[u8]) -> Result<Option<ExecutablePath>, ShellError> {
		for &directory in &self.directories {
			match SearchPath::lookup_in(directory, name) {
				Ok(true) => {
					let path = ExecutablePath::join(directory, name)?;
					debug!(%path, "resolved");
					return Ok(Some(path));
				},
				Ok(false) => {},
				Err(e) => {
					debug!(directory = %String::from_utf8_lossy(directory), error = %e, "skipping search directory");
				},
			}
		}
		Ok(None)
	}
}

/// Resolves `name` against the value of the search-path variable `var_name`.
pub fn resolve(name: &[u8], value: Option<&OsStr>, var_name: &str) -> Result<Option<ExecutablePath>, ShellError> {
	SearchPath::new(value, var_name)?.resolve(name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;
	use std::ffi::OsString;
	use std::fs::File;
	use std::path::Path;
	use tempfile::TempDir;

	fn path_of(dirs: &[&Path]) -> OsString {
		let joined: Vec<String> = dirs.iter().map(|d| d.display().to_string()).collect();
		OsString::from(joined.join(":"))
	}

	#[test]
	fn splits_on_colons_in_order() {
		let value = OsString::from("/bin:/usr/bin::/opt/bin");
		let path = SearchPath::new(Some(value.as_os_str()), "PATH").unwrap();
		let dirs: Vec<&[u8]> = path.directories().to_vec();
		assert_eq!(dirs, vec![&b"/bin"[..], &b"/usr/bin"[..], &b""[..], &b"/opt/bin"[..]]);
	}

	#[test]
	fn later_directory_is_used_when_earlier_lacks_the_name() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		File::create(b.path().join("tool")).unwrap();
		let value = path_of(&[a.path(), b.path()]);

		let found = resolve(b"tool", Some(value.as_os_str()), "PATH").unwrap().unwrap();
		assert_eq!(found.to_string(), format!("{}/tool", b.path().display()));
	}

	#[test]
	fn earlier_directory_wins() {
		let a = TempDir::new().unwrap();
		let b = TempDir::new().unwrap();
		File::create(a.path().join("tool")).unwrap();
		File::create(b.path().join("tool")).unwrap();
		let value = path_of(&[a.path(), b.path()]);

		let found = resolve(b"tool", Some(value.as_os_str()), "PATH").unwrap().unwrap();
		assert_eq!(found.to_string(), format!("{}/tool", a.path().display()));
	}

	#[test]
	fn name_must_match_exactly() {
		let a = TempDir::new().unwrap();
		File::create(a.path().join("tool.sh")).unwrap();
		let value = path_of(&[a.path()]);

		assert_matches!(resolve(b"tool", Some(value.as_os_str()), "PATH"), Ok(None));
		assert_matches!(resolve(b"too", Some(value.as_os_str()), "PATH"), Ok(None));
	}

	#[test]
	fn missing_directories_are_skipped() {
		let a = TempDir::new().unwrap();
		File::create(a.path().join("tool")).unwrap();
		let gone = a.path().join("does-not-exist");
		let value = path_of(&[&gone, a.path()]);

		assert!(resolve(b"tool", Some(value.as_os_str()), "PATH").unwrap().is_some());
	}

	#[test]
	fn not_found_when_exhausted() {
		let a = TempDir::new().unwrap();
		let value = path_of(&[a.path()]);
		assert_matches!(resolve(b"tool", Some(value.as_os_str()), "PATH"), Ok(None));
	}

	#[test]
	fn unset_or_empty_path_is_an_error() {
		assert_matches!(resolve(b"ls", None, "PATH"), Err(ShellError::SearchPathUnset(ref v)) if v == "PATH");
		let empty = OsString::new();
		assert_matches!(resolve(b"ls", Some(empty.as_os_str()), "MYPATH"), Err(ShellError::SearchPathUnset(ref v)) if v == "MYPATH");
	}
}
