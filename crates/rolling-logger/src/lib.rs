//! Rolling Logger
//!
//! `tracing` output to stderr and to one log file per day
//! (`<app>-YYYY-MM-DD.log`), keeping only the newest files.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Daily files kept when the caller does not say otherwise
pub const DEFAULT_KEEP: usize = 7;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("cannot create log directory {path}: {source}")]
    Dir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("log file error: {0}")]
    Io(#[from] io::Error),
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub app_name: String,
    pub keep: usize,
}

impl LoggerConfig {
    pub fn new(log_dir: impl AsRef<Path>, app_name: &str) -> Self {
        Self {
            log_dir: log_dir.as_ref().to_path_buf(),
            app_name: app_name.to_string(),
            keep: DEFAULT_KEEP,
        }
    }

    pub fn keep(mut self, keep: usize) -> Self {
        self.keep = keep.max(1);
        self
    }
}

/// File name for one day of logs
pub fn log_file_name(app_name: &str, date: NaiveDate) -> String {
    format!("{}-{}.log", app_name, date.format("%Y-%m-%d"))
}

struct RollingState {
    dir: PathBuf,
    app_name: String,
    keep: usize,
    date: Option<NaiveDate>,
    file: Option<File>,
}

impl RollingState {
    fn file_for(&mut self, today: NaiveDate) -> io::Result<&mut File> {
        if self.date != Some(today) || self.file.is_none() {
            let path = self.dir.join(log_file_name(&self.app_name, today));
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            self.file = Some(file);
            self.date = Some(today);
            prune(&self.dir, &self.app_name, self.keep)?;
        }
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log file not open"))
    }
}

/// Remove the oldest `<app>-*.log` files beyond `keep`
fn prune(dir: &Path, app_name: &str, keep: usize) -> io::Result<()> {
    let prefix = format!("{}-", app_name);
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&prefix) && n.ends_with(".log"))
                .unwrap_or(false)
        })
        .collect();
    // Date-stamped names sort chronologically
    files.sort();
    let excess = files.len().saturating_sub(keep);
    for old in files.into_iter().take(excess) {
        fs::remove_file(old)?;
    }
    Ok(())
}

/// Writer handed to the `tracing` fmt layer. Clones share the same file.
#[derive(Clone)]
pub struct RollingWriter {
    state: Arc<Mutex<RollingState>>,
}

impl RollingWriter {
    pub fn new(config: &LoggerConfig) -> Result<Self, LoggerError> {
        fs::create_dir_all(&config.log_dir).map_err(|source| LoggerError::Dir {
            path: config.log_dir.clone(),
            source,
        })?;
        Ok(Self {
            state: Arc::new(Mutex::new(RollingState {
                dir: config.log_dir.clone(),
                app_name: config.app_name.clone(),
                keep: config.keep.max(1),
                date: None,
                file: None,
            })),
        })
    }

    fn write_on(&self, today: NaiveDate, buf: &[u8]) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "logger lock poisoned"))?;
        state.file_for(today)?.write_all(buf)
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_on(Local::now().date_naive(), buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "logger lock poisoned"))?;
        match state.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    let writer = RollingWriter::new(&config)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    tracing::info!(
        dir = %config.log_dir.display(),
        keep = config.keep,
        "rolling logger started"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_writes_one_file_per_day() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RollingWriter::new(&LoggerConfig::new(dir.path(), "homebase")).unwrap();

        writer.write_on(day(1), b"first\n").unwrap();
        writer.write_on(day(1), b"second\n").unwrap();
        writer.write_on(day(2), b"third\n").unwrap();

        let first = fs::read_to_string(dir.path().join("homebase-2024-03-01.log")).unwrap();
        assert_eq!(first, "first\nsecond\n");
        let second = fs::read_to_string(dir.path().join("homebase-2024-03-02.log")).unwrap();
        assert_eq!(second, "third\n");
    }

    #[test]
    fn test_prunes_oldest_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("unrelated.txt"), "keep me").unwrap();
        let writer = RollingWriter::new(&LoggerConfig::new(dir.path(), "homebase").keep(2)).unwrap();

        for d in 1..=4 {
            writer.write_on(day(d), b"line\n").unwrap();
        }

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["homebase-2024-03-03.log", "homebase-2024-03-04.log", "unrelated.txt"]
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(log_file_name("homebase", day(9)), "homebase-2024-03-09.log");
    }
}
