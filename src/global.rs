use crate::alias::AliasTable;
use crate::config::Config;

pub struct State {
	pub aliases: AliasTable,
	pub config: Config,
}

impl State {
	pub fn new(config: Config) -> State {
		State { aliases: AliasTable::new(), config: config }
	}
}
