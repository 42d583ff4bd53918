use std::io::Write;

use crate::cli::Command;
use crate::feedback::{Feedback, Level};
use crate::storage::CollectionStore;

pub mod collection;
pub mod word;

/// Where command output goes: normal lines and feedback at error level.
pub struct Output<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl Output<'_> {
    pub fn line(&mut self, line: &str) -> anyhow::Result<()> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn feedback(&mut self, fb: &Feedback) -> anyhow::Result<()> {
        match fb.level {
            Level::Error => writeln!(self.err, "{fb}")?,
            Level::Success | Level::Info => writeln!(self.out, "{fb}")?,
        }
        Ok(())
    }
}

/// What a command reports back to `main`.
#[derive(Debug, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// The store refused or could not perform the operation.
    Failed,
}

impl Status {
    fn from_feedback(fb: &Feedback) -> Self {
        if fb.is_error() {
            Status::Failed
        } else {
            Status::Ok
        }
    }
}

pub trait CommandRunner {
    fn run(&self, store: &dyn CollectionStore, output: &mut Output<'_>) -> anyhow::Result<Status>;
}

impl Command {
    pub fn run(&self, store: &dyn CollectionStore, output: &mut Output<'_>) -> anyhow::Result<Status> {
        match self {
            Command::Collection { cmd } => cmd.run(store, output),
            Command::Word { cmd } => cmd.run(store, output),
        }
    }
}
