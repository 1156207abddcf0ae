use std::collections::VecDeque;
use std::io;
use std::io::Write;

use crate::error::ShellError;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AliasEntry {
	pub name: Vec<u8>,
	pub command: Vec<u8>,
}

/// Aliases, most recently defined first.
///
/// Names are not unique. Lookup and removal always act on the most recent
/// definition, so an older one with the same name reappears once the newer is
/// removed.
#[derive(Debug, Default)]
pub struct AliasTable {
	entries: VecDeque<AliasEntry>,
}

impl AliasTable {
	pub fn new() -> AliasTable {
		AliasTable { entries: VecDeque::new() }
	}

	pub fn insert(&mut self, name: &[u8], command: &[u8]) {
		self.entries.push_front(AliasEntry { name: name.to_vec(), command: command.to_vec() });
	}

	pub fn remove(&mut self, name: &[u8]) -> Option<AliasEntry> {
		let i = self.entries.iter().position(|e| e.name == name)?;
		self.entries.remove(i)
	}

	pub fn lookup(&self, name: &[u8]) -> Option<&[u8]> {
		self.entries.iter().find(|e| e.name == name).map(|e| &e.command[..])
	}

	pub fn list(&self) -> impl Iterator<Item = &AliasEntry> {
		self.entries.iter()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn print<W: Write>(&self, out: &mut W) -> io::Result<()> {
		for entry in self.list() {
			out.write_all(b"\t ")?;
			out.write_all(&entry.name)?;
			out.write_all(b" \"")?;
			out.write_all(&entry.command)?;
			out.write_all(b"\"\n")?;
		}
		out.flush()
	}
}

fn join(words: &[&[u8]]) -> Vec<u8> {
	let mut joined = Vec::new();
	for (i, word) in words.iter().enumerate() {
		if i != 0 {
			joined.push(b' ');
		}
		joined.extend_from_slice(word);
	}
	joined
}

fn quote_of(word: &[u8]) -> Option<u8> {
	match word.first() {
		Some(&q) if q == b'"' || q == b'\'' => Some(q),
		_ => None,
	}
}

/// Splits the words following `alias` into a name and a command.
///
/// A quoted run of words, starting at a word that opens with `"` or `'` and
/// ending at the first word that closes with the same quote, is the command;
/// the one remaining word is the name, on either side of it. Without quotes
/// the last word is the name and the words before it form the command.
pub fn parse_definition(words: &[&[u8]]) -> Result<(Vec<u8>, Vec<u8>), ShellError> {
	let start = match words.iter().position(|w| quote_of(w).is_some()) {
		Some(start) => start,
		None => {
			let (name, command) = match words.split_last() {
				Some(split) => split,
				None => { return Err(ShellError::AliasUsage("alias: usage: alias name \"command\"")); },
			};
			return Ok((name.to_vec(), join(command)));
		},
	};
	let quote = quote_of(words[start]).unwrap_or(b'"');
	let end = words.iter().enumerate().skip(start)
		.find(|&(i, w)| w.last() == Some(&quote) && (i != start || w.len() >= 2));
	let end = match end {
		Some((end, _)) => end,
		None => { return Err(ShellError::AliasUsage("alias: unterminated quote")); },
	};

	let quoted = join(&words[start ..= end]);
	let command = quoted[1 .. quoted.len() - 1].to_vec();
	let rest: Vec<&[u8]> = words[.. start].iter().chain(&words[end + 1 ..]).cloned().collect();
	match rest.as_slice() {
		[name] => Ok((name.to_vec(), command)),
		[] => Err(ShellError::AliasUsage("alias: missing alias name")),
		_ => Err(ShellError::AliasUsage("alias: expected one name besides the quoted command")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;

	fn def(words: &[&str]) -> Result<(String, String), ShellError> {
		let words: Vec<&[u8]> = words.iter().map(|w| w.as_bytes()).collect();
		parse_definition(&words).map(|(n, c)| {
			(String::from_utf8(n).unwrap(), String::from_utf8(c).unwrap())
		})
	}

	#[test]
	fn most_recent_definition_shadows() {
		let mut table = AliasTable::new();
		table.insert(b"ll", b"ls -l");
		table.insert(b"ll", b"ls -la");
		assert_eq!(table.lookup(b"ll"), Some(&b"ls -la"[..]));
		table.remove(b"ll");
		assert_eq!(table.lookup(b"ll"), Some(&b"ls -l"[..]));
	}

	#[test]
	fn remove_twice_is_a_no_op() {
		let mut table = AliasTable::new();
		table.insert(b"a", b"echo a");
		table.insert(b"b", b"echo b");
		assert!(table.remove(b"a").is_some());
		assert!(table.remove(b"a").is_none());
		let names: Vec<&[u8]> = table.list().map(|e| &e.name[..]).collect();
		assert_eq!(names, vec![&b"b"[..]]);
	}

	#[test]
	fn remove_from_empty_table() {
		let mut table = AliasTable::new();
		assert!(table.remove(b"x").is_none());
		assert!(table.is_empty());
	}

	#[test]
	fn lookup_missing_name() {
		let mut table = AliasTable::new();
		assert_eq!(table.lookup(b"x"), None);
		table.insert(b"y", b"echo");
		assert_eq!(table.lookup(b"x"), None);
	}

	#[test]
	fn print_lists_in_storage_order() {
		let mut table = AliasTable::new();
		table.insert(b"first", b"echo 1");
		table.insert(b"second", b"echo 2");
		let mut out = Vec::new();
		table.print(&mut out).unwrap();
		assert_eq!(out, b"\t second \"echo 2\"\n\t first \"echo 1\"\n");
	}

	#[test]
	fn name_then_quoted_command() {
		assert_eq!(def(&["ll", "\"ls", "-l\""]).unwrap(), ("ll".into(), "ls -l".into()));
	}

	#[test]
	fn quoted_command_then_name() {
		assert_eq!(def(&["\"ls", "-l\"", "ll"]).unwrap(), ("ll".into(), "ls -l".into()));
		assert_eq!(def(&["'pwd'", "here"]).unwrap(), ("here".into(), "pwd".into()));
	}

	#[test]
	fn unquoted_words_before_the_name() {
		assert_eq!(def(&["ls", "-l", "ll"]).unwrap(), ("ll".into(), "ls -l".into()));
	}

	#[test]
	fn bare_name_defines_empty_command() {
		assert_eq!(def(&["nothing"]).unwrap(), ("nothing".into(), "".into()));
		assert_eq!(def(&["empty", "\"\""]).unwrap(), ("empty".into(), "".into()));
	}

	#[test]
	fn malformed_definitions() {
		assert_matches!(def(&[]), Err(ShellError::AliasUsage(_)));
		assert_matches!(def(&["ll", "\"ls", "-l"]), Err(ShellError::AliasUsage(_)));
		assert_matches!(def(&["\"ls\""]), Err(ShellError::AliasUsage(_)));
		assert_matches!(def(&["a", "\"ls\"", "b"]), Err(ShellError::AliasUsage(_)));
	}
}
