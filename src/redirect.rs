use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::{AsRawFd, IntoRawFd, RawFd};

use nix::unistd;
use tracing::debug;

use crate::error::ShellError;
use crate::types::{Redirection, RedirectionKind};

/// `rw-r--r--`
const CREATE_MODE: u32 = 0o644;

/// Points standard output at the redirection target.
pub fn apply(redirection: &Redirection) -> Result<(), ShellError> {
	apply_onto(redirection, libc::STDOUT_FILENO)
}

/// Points `to` at the redirection target. The descriptor opened for the target
/// is closed before returning, whether or not duplication succeeded.
pub fn apply_onto(redirection: &Redirection, to: RawFd) -> Result<(), ShellError> {
	let mut oopt = fs::OpenOptions::new();
	let _ = match redirection.kind {
		RedirectionKind::ToFile => oopt.write(true).create(true).truncate(true),
		RedirectionKind::Append => oopt.append(true).create(true),
		RedirectionKind::FromFile => {
			// Input redirection is recognised but not wired.
			debug!("input redirection left unapplied");
			return Ok(());
		},
		RedirectionKind::ToStdout => { return Ok(()); },
	};
	let target = OsStr::from_bytes(redirection.target);
	let file = oopt.mode(CREATE_MODE).open(target).map_err(|e| ShellError::RedirectOpen {
		target: target.to_string_lossy().into_owned(),
		source: e,
	})?;
	unistd::dup2(file.as_raw_fd(), to).map_err(ShellError::RedirectDup)?;
	unistd::close(file.into_raw_fd()).map_err(ShellError::RedirectClose)?;
	Ok(())
}
