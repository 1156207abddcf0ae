use crate::error::ShellError;
use crate::types::*;

/// Cursor over the raw bytes of one input line.
struct Parser<'a> {
	line: &'a [u8],
	i: usize,
}

impl<'a> Parser<'a> {
	fn proceed_while<F>(&mut self, f: F) where F: Fn(u8) -> bool {
		while let Some(c) = self.line.get(self.i) {
			if !f(*c) { break; }
			self.i += 1;
		}
	}

	fn is_separator(c: u8) -> bool {
		match c {
			b' ' | b'\t' => true,
			_ => false,
		}
	}

	fn is_letter(c: u8) -> bool {
		match c {
			b'\n' | b'&' => false,
			_ => !Parser::is_separator(c),
		}
	}

	fn skip_separators(&mut self) {
		self.proceed_while(Parser::is_separator);
	}

	fn read_word(&mut self) -> &'a [u8] {
		let orig = self.i;
		self.proceed_while(Parser::is_letter);
		&self.line[orig .. self.i]
	}

	fn at_line_end(&self) -> bool {
		match self.line.get(self.i) {
			None | Some(&b'\n') => true,
			_ => false,
		}
	}

	fn tokenize(&mut self) -> (ArgumentVector<'a>, bool) {
		let mut args: Vec<&'a [u8]> = Vec::with_capacity(MAX_ARGS);
		let mut background = false;

		loop {
			self.skip_separators();
			let word = self.read_word();
			if !word.is_empty() {
				args.push(word);
			}
			if self.line.get(self.i) == Some(&b'&') {
				// The argument list ends where '&' appears.
				background = true;
				break;
			}
			if self.at_line_end() {
				break;
			}
		}
		debug_assert!(args.len() < MAX_ARGS);
		(ArgumentVector::new(args), background)
	}
}

/// Splits a raw line into arguments on spaces and tabs.
///
/// Scanning stops at the first newline or after `max_len` bytes, whichever
/// comes first. The returned flag is set when the line contains `&`; nothing
/// from the `&` onwards becomes an argument.
pub fn tokenize(line: &[u8], max_len: usize) -> (ArgumentVector<'_>, bool) {
	let line = &line[.. line.len().min(max_len)];
	let mut parser = Parser { line: line, i: 0 };
	parser.tokenize()
}

fn find_operator(args: &ArgumentVector) -> Option<(usize, RedirectionKind)> {
	args.as_slice().iter().enumerate().skip(1)
		.find_map(|(i, &token)| RedirectionKind::from_operator(token).map(|kind| (i, kind)))
}

/// Kind of the leftmost redirection operator after the command name.
pub fn classify(args: &ArgumentVector) -> RedirectionKind {
	find_operator(args).map_or(RedirectionKind::ToStdout, |(_, kind)| kind)
}

/// Index of the slot right after the leftmost redirection operator. The slot
/// is not guaranteed to exist.
pub fn find_target_index(args: &ArgumentVector) -> Option<usize> {
	find_operator(args).map(|(i, _)| i + 1)
}

/// The redirection requested by `args`, with its target file name.
pub fn redirection<'a>(args: &ArgumentVector<'a>) -> Result<Option<Redirection<'a>>, ShellError> {
	let kind = classify(args);
	let index = match find_target_index(args) {
		Some(index) => index,
		None => { return Ok(None); },
	};
	match args.get(index) {
		Some(target) => Ok(Some(Redirection { kind: kind, target: target })),
		None => Err(ShellError::MissingRedirectTarget(kind.operator())),
	}
}

/// Terminates `args` at the leftmost redirection operator, so neither the
/// operator nor its file name reach the launched program.
pub fn strip(args: &mut ArgumentVector) {
	if let Some((i, _)) = find_operator(args) {
		args.terminate_at(i);
	}
}
