use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum CollectionCmd {
    #[command(
        about = "Create an empty collection",
        long_about = "Create a new, empty collection. Fails if a collection with exactly this name exists. Not available on the sheet backend, where the first added word creates the collection."
    )]
    Create {
        #[arg(long, value_name = "NAME", help = "Collection name (case-sensitive)")]
        name: String,
    },
    #[command(
        about = "List collections",
        long_about = "List every collection, sorted by name, with its word count."
    )]
    List,
}
