use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum WordCmd {
    #[command(
        about = "Add a word to a collection",
        long_about = "Add a word unless the collection already holds it in any letter case."
    )]
    Add {
        #[arg(long, value_name = "NAME")]
        collection: String,
        #[arg(long, value_name = "WORD")]
        word: String,
    },
    #[command(
        about = "Remove a word from a collection",
        long_about = "Remove the stored word matching WORD ignoring case."
    )]
    Remove {
        #[arg(long, value_name = "NAME")]
        collection: String,
        #[arg(long, value_name = "WORD")]
        word: String,
    },
    #[command(about = "List the words of a collection")]
    List {
        #[arg(long, value_name = "NAME")]
        collection: String,
    },
}
