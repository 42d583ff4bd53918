use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock, RwLockWriteGuard};

type LogFile = Arc<RwLock<Option<File>>>;

/// Hands out writers that copy every line to stderr and, when set, a log file.
#[derive(Clone, Default)]
struct TeeWriter {
    file: LogFile,
}

struct TeeHandle {
    file: LogFile,
}

fn lock_file(file: &LogFile) -> RwLockWriteGuard<'_, Option<File>> {
    file.write().unwrap_or_else(|e| e.into_inner())
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for TeeWriter {
    type Writer = TeeHandle;

    fn make_writer(&'a self) -> Self::Writer {
        TeeHandle {
            file: self.file.clone(),
        }
    }
}

impl Write for TeeHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = io::stderr().write(buf)?;
        if let Some(file) = lock_file(&self.file).as_mut() {
            // The file copy is best effort; stderr stays authoritative.
            let _ = file.write_all(&buf[..written]);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if let Some(file) = lock_file(&self.file).as_mut() {
            let _ = file.flush();
        }
        Ok(())
    }
}

static WRITER: OnceLock<TeeWriter> = OnceLock::new();

/// Installs the global subscriber. `RUST_LOG` overrides the default `info` filter;
/// `log` records are bridged into tracing.
pub fn init() {
    let _ = tracing_log::LogTracer::init();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let writer = WRITER.get_or_init(TeeWriter::default).clone();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .try_init();
}

/// Starts (or stops, with `None`) mirroring log output into `log_file`.
pub fn set_log_file(log_file: Option<&Path>) {
    let Some(writer) = WRITER.get() else {
        return;
    };
    let mut guard = lock_file(&writer.file);
    *guard = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                let _ = std::fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(file),
                Err(e) => {
                    eprintln!("cannot open log file {}: {}", path.display(), e);
                    None
                }
            }
        }
        None => None,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn tee_writer_copies_into_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("wordstash.log");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();

        let writer = TeeWriter::default();
        *lock_file(&writer.file) = Some(File::create(&path).unwrap());

        let mut handle = writer.make_writer();
        handle.write_all(b"hello log\n").unwrap();
        handle.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello log\n");
    }

    #[test]
    fn set_log_file_creates_parent_dirs() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("app.log");
        set_log_file(Some(&path));
        assert!(path.exists());
        set_log_file(None);
    }
}
