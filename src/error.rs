use std::ffi;
use std::io;

use thiserror::Error;

/// Everything that can go wrong while reading, dispatching or launching a command.
///
/// End of input and a missing alias are not errors; they are reported through
/// `ReadOutcome::EndOfInput` and `None` respectively.
#[derive(Debug, Error)]
pub enum ShellError {
	#[error("error reading the command: {0}")]
	InputRead(#[source] nix::Error),
	#[error("Failed to fork: {0}")]
	Fork(#[source] nix::Error),
	#[error("Failed to set SIGTSTP handler: {0}")]
	Signal(#[source] nix::Error),
	#[error("search path variable {0} is not set")]
	SearchPathUnset(String),
	#[error("{0} executable could not found !!")]
	NotFound(String),
	#[error("syntax error: expected a file name after '{0}'")]
	MissingRedirectTarget(&'static str),
	#[error("Failed to open file {target}: {source}")]
	RedirectOpen { target: String, #[source] source: io::Error },
	#[error("Failed to redirect standard output: {0}")]
	RedirectDup(#[source] nix::Error),
	#[error("Failed to close the file: {0}")]
	RedirectClose(#[source] nix::Error),
	#[error("Failed to execute: {0}")]
	Exec(#[source] nix::Error),
	#[error("Nul char error: {0}")]
	Nul(#[from] ffi::NulError),
	#[error("{0}")]
	AliasUsage(&'static str),
}

impl ShellError {
	/// Status a process terminates with when this error is fatal to it.
	pub fn exit_status(&self) -> i32 {
		match *self {
			ShellError::NotFound(_) => 127,
			ShellError::Exec(_) | ShellError::Nul(_) => 126,
			ShellError::AliasUsage(_) => 2,
			_ => 1,
		}
	}
}
