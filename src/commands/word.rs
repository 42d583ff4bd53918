use super::{CommandRunner, Output, Status};
use crate::cli;
use crate::feedback::Feedback;
use crate::storage::CollectionStore;

impl CommandRunner for cli::WordCmd {
    fn run(&self, store: &dyn CollectionStore, output: &mut Output<'_>) -> anyhow::Result<Status> {
        let fb = match self {
            cli::WordCmd::Add { collection, word } => match store.add_word(collection, word) {
                Ok(outcome) => Feedback::added(collection, word, &outcome),
                Err(e) => Feedback::failed(&e),
            },
            cli::WordCmd::Remove { collection, word } => {
                match store.remove_word(collection, word) {
                    Ok(outcome) => Feedback::removed(collection, word, &outcome),
                    Err(e) => Feedback::failed(&e),
                }
            }
            cli::WordCmd::List { collection } => {
                return match store.list_words(collection)? {
                    Some(words) => {
                        for w in words {
                            output.line(&w)?;
                        }
                        Ok(Status::Ok)
                    }
                    None => {
                        output.feedback(&Feedback::collection_not_found(collection))?;
                        Ok(Status::Failed)
                    }
                };
            }
        };
        output.feedback(&fb)?;
        Ok(Status::from_feedback(&fb))
    }
}
