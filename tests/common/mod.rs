use std::path::PathBuf;

use tempfile::TempDir;

pub struct Scratch {
    _dir: TempDir,
    pub root: PathBuf,
}

pub fn scratch() -> Scratch {
    let dir = tempfile::Builder::new()
        .prefix("wordstash-it")
        .tempdir()
        .expect("scratch dir");
    let root = dir.path().to_path_buf();
    Scratch { _dir: dir, root }
}
