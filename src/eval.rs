use std::convert::Infallible;
use std::env;
use std::ffi::OsStr;
use std::io;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::process;

use nix::unistd;
use tracing::{debug, error};

use crate::builtin;
use crate::config::Config;
use crate::error::ShellError;
use crate::global;
use crate::job;
use crate::parser;
use crate::redirect;
use crate::search;
use crate::types::{ArgumentVector, RedirectionKind, MAX_LINE};

/// What the loop does after a line has been evaluated.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Flow {
	Continue,
	Exit(i32),
}

fn lossy(bytes: &[u8]) -> String {
	String::from_utf8_lossy(bytes).into_owned()
}

fn do_exec_command(config: &Config, name: &[u8], args: &ArgumentVector, kind: RedirectionKind) -> Result<Infallible, ShellError> {
	let search_path = env::var_os(&config.path_var);
	let path = search::resolve(name, search_path.as_deref(), &config.path_var)?
		.ok_or_else(|| ShellError::NotFound(lossy(name)))?;
	if !config.quiet {
		println!("{} executable path is: {}", lossy(name), path);
	}

	let redirection = parser::redirection(args)?;
	let mut argv = args.clone();
	parser::strip(&mut argv);
	let argv = argv.to_cstrings()?;

	if !config.quiet {
		println!("redirection type is {}", kind);
	}
	if let Some(redirection) = redirection {
		redirect::apply(&redirection)?;
	}
	unistd::execv(path.as_c_str(), &argv).map_err(ShellError::Exec)
}

/// Runs in the forked child and never returns to the loop.
fn exec_command(config: &Config, name: &[u8], args: &ArgumentVector, kind: RedirectionKind) -> ! {
	let status = match do_exec_command(config, name, args, kind) {
		Ok(never) => match never {},
		Err(e) => {
			eprintln!("{}", e);
			e.exit_status()
		},
	};
	unsafe { libc::_exit(status) }
}

fn spawn(state: &global::State, name: &[u8], args: &ArgumentVector, kind: RedirectionKind) -> Result<unistd::Pid, ShellError> {
	// Anything still buffered would otherwise be written by both processes.
	let _ = io::stdout().flush();
	match unsafe { unistd::fork() }.map_err(ShellError::Fork)? {
		unistd::ForkResult::Parent { child } => Ok(child),
		unistd::ForkResult::Child => exec_command(&state.config, name, args, kind),
	}
}

/// Hands an alias body to the host shell and waits for it.
fn run_alias(command: &[u8]) {
	let _ = io::stdout().flush();
	match process::Command::new("/bin/sh").arg("-c").arg(OsStr::from_bytes(command)).status() {
		Ok(status) => debug!(%status, "alias finished"),
		Err(e) => eprintln!("alias: {}", e),
	}
}

/// Evaluates one raw input line.
pub fn eval(state: &mut global::State, line: &[u8]) -> Flow {
	let (args, background) = parser::tokenize(line, MAX_LINE);
	let name = match args.command() {
		Some(name) => name,
		None => { return Flow::Continue; },
	};
	let kind = parser::classify(&args);
	debug!(command = %lossy(name), argc = args.len(), background, %kind, "dispatching");

	if let Some(builtin) = builtin::match_builtin(name) {
		builtin(state, &args);
		return Flow::Continue;
	}
	if let Some(command) = state.aliases.lookup(name) {
		run_alias(command);
		return Flow::Continue;
	}
	if name == b"exit" && !background {
		return Flow::Exit(0);
	}

	match spawn(state, name, &args, kind) {
		Ok(child) => {
			if background {
				debug!(%child, "not waiting");
				println!("!!background process, not waiting for it");
			} else {
				job::wait_all();
			}
			Flow::Continue
		},
		Err(e) => {
			eprintln!("{}", e);
			error!(error = %e, "giving up");
			Flow::Exit(e.exit_status())
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> global::State {
		global::State::new(Config::default())
	}

	#[test]
	fn blank_lines_do_nothing() {
		let mut state = state();
		assert_eq!(eval(&mut state, b"\n"), Flow::Continue);
		assert_eq!(eval(&mut state, b"  \t\n"), Flow::Continue);
		assert_eq!(eval(&mut state, b"&\n"), Flow::Continue);
	}

	#[test]
	fn exit_stops_the_loop() {
		let mut state = state();
		assert_eq!(eval(&mut state, b"exit\n"), Flow::Exit(0));
		assert_eq!(eval(&mut state, b"  exit  now\n"), Flow::Exit(0));
	}

	#[test]
	fn background_exit_does_not_stop_the_loop() {
		let mut state = global::State::new(Config { quiet: true, ..Config::default() });
		assert_eq!(eval(&mut state, b"exit &\n"), Flow::Continue);
	}

	#[test]
	fn alias_builtins_are_handled_in_process() {
		let mut state = state();
		assert_eq!(eval(&mut state, b"alias ll \"ls -l\"\n"), Flow::Continue);
		assert_eq!(state.aliases.lookup(b"ll"), Some(&b"ls -l"[..]));
		assert_eq!(eval(&mut state, b"unalias ll\n"), Flow::Continue);
		assert!(state.aliases.is_empty());
	}

	#[test]
	fn alias_shadows_exit() {
		let mut state = state();
		eval(&mut state, b"alias exit \"true\"\n");
		assert_eq!(eval(&mut state, b"exit\n"), Flow::Continue);
	}
}
