mod alias;
mod builtin;
mod config;
mod error;
mod eval;
mod global;
mod job;
mod parser;
mod redirect;
mod search;
mod signal;
mod types;

use std::io;
use std::io::Write;
use std::process;

use tracing::error;
use tracing_subscriber::EnvFilter;

use config::Config;
use eval::Flow;
use types::{InputLine, ReadOutcome};

const LOG_ENV: &str = "MYSHELL_LOG";

fn init_logging() {
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.without_time()
		.init();
}

fn shutdown() -> i32 {
	println!("\nhandler function is called");
	println!("exiting shell..");
	0
}

fn run(state: &mut global::State) -> i32 {
	let mut stdout = io::stdout();
	let mut line = InputLine::new();
	loop {
		if signal::stop_requested() {
			return shutdown();
		}
		let _ = stdout.write_all(state.config.prompt.as_bytes());
		let _ = stdout.flush();

		match line.read_from(libc::STDIN_FILENO) {
			Ok(ReadOutcome::Line) => {},
			Ok(ReadOutcome::EndOfInput) => { return 0; },
			Ok(ReadOutcome::Interrupted) => { continue; },
			Err(e) => {
				eprintln!("{}", e);
				error!(error = %e, "cannot read input");
				return e.exit_status();
			},
		}
		if let Flow::Exit(status) = eval::eval(state, line.current()) {
			return status;
		}
	}
}

fn main() {
	let config: Config = argh::from_env();
	init_logging();
	if let Err(e) = signal::install() {
		eprintln!("{}", e);
		process::exit(e.exit_status());
	}
	let mut state = global::State::new(config);
	process::exit(run(&mut state));
}
