use super::{CommandRunner, Output, Status};
use crate::cli;
use crate::feedback::Feedback;
use crate::storage::CollectionStore;
use crate::types::display_name;

impl CommandRunner for cli::CollectionCmd {
    fn run(&self, store: &dyn CollectionStore, output: &mut Output<'_>) -> anyhow::Result<Status> {
        match self {
            cli::CollectionCmd::Create { name } => {
                let fb = match store.create_collection(name) {
                    Ok(outcome) => Feedback::created(name, &outcome),
                    Err(e) => Feedback::failed(&e),
                };
                output.feedback(&fb)?;
                Ok(Status::from_feedback(&fb))
            }
            cli::CollectionCmd::List => {
                let mut collections = store.list_collections()?;
                if collections.is_empty() {
                    output.line("No collections found.")?;
                    return Ok(Status::Ok);
                }
                collections.sort_by(|a, b| a.name.cmp(&b.name));
                for c in collections {
                    output.line(&format!(
                        "{}\t{}\t{}",
                        c.name,
                        display_name(&c.name),
                        c.word_count
                    ))?;
                }
                Ok(Status::Ok)
            }
        }
    }
}
