use argh::FromArgs;

pub const DEFAULT_PROMPT: &str = "myshell: \n";
pub const DEFAULT_PATH_VAR: &str = "PATH";

fn default_prompt() -> String {
	DEFAULT_PROMPT.to_string()
}

fn default_path_var() -> String {
	DEFAULT_PATH_VAR.to_string()
}

#[derive(FromArgs, Debug, PartialEq, Eq, Clone)]
/// A minimal interactive command interpreter.
pub struct Config {
	/// text printed before every line is read
	#[argh(option, default = "default_prompt()")]
	pub prompt: String,

	/// environment variable holding the colon-separated executable search path
	#[argh(option, default = "default_path_var()")]
	pub path_var: String,

	/// do not print the resolved path and redirection notices
	#[argh(switch, short = 'q')]
	pub quiet: bool,
}

impl Default for Config {
	fn default() -> Config {
		Config { prompt: default_prompt(), path_var: default_path_var(), quiet: false }
	}
}
