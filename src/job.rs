use nix::errno::Errno;
use nix::sys::wait::{self, WaitStatus};
use nix::unistd::Pid;
use tracing::debug;

use crate::signal;

pub trait WaitStatusExt {
	fn get_pid(self) -> Option<Pid>;
	fn code(self) -> Option<i32>;
}

impl WaitStatusExt for WaitStatus {
	fn get_pid(self) -> Option<Pid> {
		self.pid()
	}

	/// Exit code, or 128 plus the signal number for a killed child.
	fn code(self) -> Option<i32> {
		match self {
			WaitStatus::Exited(_, code) => Some(code),
			WaitStatus::Signaled(_, sig, _) => Some(128 + sig as i32),
			_ => None,
		}
	}
}

/// Reaps children until none are left, including background ones that happen
/// to finish meanwhile. Gives up early when a stop request interrupts the wait.
/// Returns the statuses collected, in the order they were reaped.
pub fn wait_all() -> Vec<(Pid, i32)> {
	wait_all_with(wait::wait)
}

pub fn wait_all_with<F>(mut wait: F) -> Vec<(Pid, i32)> where F: FnMut() -> nix::Result<WaitStatus> {
	let mut reaped = vec![];
	loop {
		match wait() {
			Ok(status) => {
				if let (Some(pid), Some(code)) = (status.get_pid(), status.code()) {
					debug!(%pid, code, "child reaped");
					reaped.push((pid, code));
				}
			},
			Err(Errno::EINTR) => {
				if signal::stop_requested() {
					break;
				}
			},
			Err(Errno::ECHILD) => { break; },
			Err(e) => {
				debug!(error = %e, "wait failed");
				break;
			},
		}
	}
	reaped
}
