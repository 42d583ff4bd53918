use clap::Subcommand;

use crate::cli::collection_cmd::CollectionCmd;
use crate::cli::word_cmd::WordCmd;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Collection commands",
        long_about = "Create collections and list existing ones with their word counts."
    )]
    Collection {
        #[command(subcommand)]
        cmd: CollectionCmd,
    },
    #[command(
        about = "Word commands",
        long_about = "Add, remove and list the words of one collection. Words are unique per collection ignoring case."
    )]
    Word {
        #[command(subcommand)]
        cmd: WordCmd,
    },
}
