//! Rotating file writer plugged into `tracing-subscriber` through `MakeWriter`

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;
use crate::logger::rotation::RotationManager;
use crate::logger::LoggerError;

/// File writer with rotation support.
///
/// After the first failed write or rotation the writer falls back to stderr
/// for the rest of the process.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

struct WriterState {
    file: BufWriter<File>,
    current_size: u64,
    rotation: RotationManager,
    fallback: bool,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = if config.append {
            std::fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                current_size,
                rotation: RotationManager::new(config.rotation.clone()),
                fallback: false,
            })),
            path: config.path.clone(),
        })
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterGuard {
            state: Arc::clone(&self.state),
            path: self.path.clone(),
        }
    }
}

/// Per-event writer handed out by [`RotatingFileWriter`]
pub struct RotatingWriterGuard {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

impl Write for RotatingWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback {
            return io::stderr().write(buf);
        }

        if state.rotation.should_rotate(state.current_size) {
            if let Err(e) = rotate(&mut state, &self.path) {
                return fall_back(&mut state, buf, e);
            }
        }

        match state.file.write(buf) {
            Ok(written) => {
                state.current_size += written as u64;
                Ok(written)
            }
            Err(e) => fall_back(&mut state, buf, e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback {
            return io::stderr().flush();
        }
        state.file.flush()
    }
}

impl Drop for RotatingWriterGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.file.flush();
        }
    }
}

fn rotate(state: &mut WriterState, path: &Path) -> io::Result<()> {
    state.file.flush()?;
    state.rotation.rotate(path)?;
    state.file = open_log_file(path, false)?;
    state.current_size = 0;
    Ok(())
}

fn fall_back(state: &mut WriterState, buf: &[u8], error: io::Error) -> io::Result<usize> {
    state.fallback = true;
    eprintln!("[logger] file output failed, falling back to stderr: {}", error);
    io::stderr().write(buf)
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;
    Ok(BufWriter::new(file))
}
