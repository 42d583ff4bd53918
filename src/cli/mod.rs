mod args;
mod collection_cmd;
mod command;
mod word_cmd;

pub use args::Cli;
pub use collection_cmd::CollectionCmd;
pub use command::Command;
pub use word_cmd::WordCmd;

pub use args::parse;
