use std::ffi::{CStr, CString};
use std::fmt;

use nix::errno::Errno;

use crate::error::ShellError;

/// Longest line read in one go.
pub const MAX_LINE: usize = 80;
/// Room for every token of a full line plus the terminating slot.
pub const MAX_ARGS: usize = MAX_LINE / 2 + 1;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RedirectionKind {
	ToFile,
	Append,
	FromFile,
	ToStdout,
}

impl RedirectionKind {
	pub fn from_operator(token: &[u8]) -> Option<RedirectionKind> {
		match token {
			b">" => Some(RedirectionKind::ToFile),
			b">>" => Some(RedirectionKind::Append),
			b"<" => Some(RedirectionKind::FromFile),
			_ => None,
		}
	}

	pub fn operator(self) -> &'static str {
		match self {
			RedirectionKind::ToFile => ">",
			RedirectionKind::Append => ">>",
			RedirectionKind::FromFile => "<",
			RedirectionKind::ToStdout => "",
		}
	}
}

impl fmt::Display for RedirectionKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(match *self {
			RedirectionKind::ToFile => "TO_FILE",
			RedirectionKind::Append => "APPEND",
			RedirectionKind::FromFile => "FROM_FILE",
			RedirectionKind::ToStdout => "TO_STDOUT",
		})
	}
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Redirection<'a> {
	pub kind: RedirectionKind,
	pub target: &'a [u8],
}

/// Tokens of one input line, borrowed from the line buffer.
///
/// The end of the vector plays the role of the terminating null entry: cutting
/// it at some index hides that token and everything after it from the program
/// being launched.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ArgumentVector<'a> {
	args: Vec<&'a [u8]>,
}

impl<'a> ArgumentVector<'a> {
	pub fn new(args: Vec<&'a [u8]>) -> ArgumentVector<'a> {
		ArgumentVector { args: args }
	}

	pub fn command(&self) -> Option<&'a [u8]> {
		self.args.first().cloned()
	}

	pub fn get(&self, i: usize) -> Option<&'a [u8]> {
		self.args.get(i).cloned()
	}

	pub fn len(&self) -> usize {
		self.args.len()
	}

	pub fn as_slice(&self) -> &[&'a [u8]] {
		&self.args
	}

	/// Terminates the vector at `i`.
	pub fn terminate_at(&mut self, i: usize) {
		self.args.truncate(i);
	}

	pub fn to_cstrings(&self) -> Result<Vec<CString>, ShellError> {
		self.args.iter().map(|&s| CString::new(s).map_err(ShellError::from)).collect()
	}
}

/// A search-path directory joined with a command name.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ExecutablePath(CString);

impl ExecutablePath {
	pub fn join(directory: &[u8], name: &[u8]) -> Result<ExecutablePath, ShellError> {
		let mut path = Vec::with_capacity(directory.len() + name.len() + 1);
		path.extend_from_slice(directory);
		path.push(b'/');
		path.extend_from_slice(name);
		Ok(ExecutablePath(CString::new(path)?))
	}

	pub fn as_c_str(&self) -> &CStr {
		&self.0
	}
}

impl fmt::Display for ExecutablePath {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(&self.0.to_string_lossy())
	}
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ReadOutcome {
	/// A line is available through `InputLine::current`.
	Line,
	/// Nothing more will ever be read.
	EndOfInput,
	/// A signal arrived while waiting for input.
	Interrupted,
}

/// Fixed-capacity buffer holding the line being interpreted.
///
/// One read may deliver more than one line when input comes from a pipe; the
/// bytes after the first newline stay in the buffer for the next call.
pub struct InputLine {
	buf: [u8; MAX_LINE],
	filled: usize,
	line_len: usize,
}

impl InputLine {
	pub fn new() -> InputLine {
		InputLine { buf: [0; MAX_LINE], filled: 0, line_len: 0 }
	}

	pub fn current(&self) -> &[u8] {
		&self.buf[.. self.line_len]
	}

	pub fn read_from(&mut self, fd: i32) -> Result<ReadOutcome, ShellError> {
		self.read_with(|buf| nix::unistd::read(fd, buf))
	}

	/// Moves to the next line, pulling more bytes through `read` if the buffer
	/// does not hold a complete one yet.
	pub fn read_with<F>(&mut self, mut read: F) -> Result<ReadOutcome, ShellError>
		where F: FnMut(&mut [u8]) -> nix::Result<usize>
	{
		self.buf.copy_within(self.line_len .. self.filled, 0);
		self.filled -= self.line_len;
		self.line_len = 0;

		loop {
			if let Some(nl) = self.buf[.. self.filled].iter().position(|&c| c == b'\n') {
				self.line_len = nl + 1;
				return Ok(ReadOutcome::Line);
			}
			if self.filled == MAX_LINE {
				self.line_len = MAX_LINE;
				return Ok(ReadOutcome::Line);
			}
			match read(&mut self.buf[self.filled ..]) {
				Ok(0) => {
					if self.filled == 0 {
						return Ok(ReadOutcome::EndOfInput);
					}
					self.line_len = self.filled;
					return Ok(ReadOutcome::Line);
				},
				Ok(n) => { self.filled += n; },
				Err(Errno::EINTR) => { return Ok(ReadOutcome::Interrupted); },
				Err(e) => { return Err(ShellError::InputRead(e)); },
			}
		}
	}
}
