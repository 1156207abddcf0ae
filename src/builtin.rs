use std::io;

use tracing::debug;

use crate::alias;
use crate::global;
use crate::types::ArgumentVector;

pub fn builtin_alias(state: &mut global::State, args: &ArgumentVector) -> u8 {
	if args.get(1) == Some(&b"-l"[..]) {
		if let Err(e) = state.aliases.print(&mut io::stdout().lock()) {
			eprintln!("alias: {}", e);
			return 1;
		}
		return 0;
	}
	match alias::parse_definition(&args.as_slice()[1 ..]) {
		Ok((name, command)) => {
			debug!(name = %String::from_utf8_lossy(&name), command = %String::from_utf8_lossy(&command), "alias defined");
			state.aliases.insert(&name, &command);
			0
		},
		Err(e) => {
			eprintln!("{}", e);
			e.exit_status() as u8
		},
	}
}

pub fn builtin_unalias(state: &mut global::State, args: &ArgumentVector) -> u8 {
	match args.get(1) {
		Some(name) => {
			state.aliases.remove(name);
			0
		},
		None => {
			eprintln!("unalias: usage: unalias name");
			2
		},
	}
}

pub fn match_builtin(name: &[u8]) -> Option<fn(&mut global::State, &ArgumentVector) -> u8> {
	match name {
		b"alias" => Some(builtin_alias),
		b"unalias" => Some(builtin_unalias),
		_ => None,
	}
}
