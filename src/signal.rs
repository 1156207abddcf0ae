use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

use crate::error::ShellError;

static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_stop(_: libc::c_int) {
	STOP_REQUESTED.store(true, Ordering::SeqCst);
}

/// Catches SIGTSTP. No `SA_RESTART`, so a pending read or wait returns EINTR
/// and the loop gets to see the request.
pub fn install() -> Result<(), ShellError> {
	let act = SigAction::new(SigHandler::Handler(handle_stop), SaFlags::empty(), SigSet::empty());
	unsafe { signal::sigaction(Signal::SIGTSTP, &act) }.map_err(ShellError::Signal)?;
	Ok(())
}

pub fn stop_requested() -> bool {
	STOP_REQUESTED.load(Ordering::SeqCst)
}
