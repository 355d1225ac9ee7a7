use std::fs::{self, File, OpenOptions};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use mail_cannon_core::MailCannonError;
use tracing::Dispatch;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Registry, fmt};

/// Timestamp used in log and results file names.
pub(crate) const FILE_STAMP: &str = "%Y%m%d_%H%M%S";

const LINE_TIME: &str = "%Y-%m-%d %H:%M:%S";

/// Output targets of a [`RunLogger`].
#[derive(Debug, Clone, Copy)]
pub struct LogSinks {
    /// Default console verbosity (overridable with `RUST_LOG`); `None` silences stdout.
    pub console: Option<LevelFilter>,
    /// Write a DEBUG-level log file into the log directory.
    pub file: bool,
}

impl Default for LogSinks {
    fn default() -> Self {
        Self {
            console: Some(LevelFilter::INFO),
            file: true,
        }
    }
}

/// Logging handle owned by one run.
///
/// Holds a `tracing` dispatcher wired to the configured sinks. Nothing is
/// installed globally; the orchestrator scopes its work to this dispatcher.
#[derive(Clone)]
pub struct RunLogger {
    dispatch: Dispatch,
    dir: PathBuf,
    log_file: Option<PathBuf>,
}

impl RunLogger {
    /// Create `dir` (if needed) and open the sinks.
    ///
    /// # Errors
    /// Returns [`MailCannonError::Output`] if the directory or log file cannot
    /// be created.
    pub fn new(dir: impl Into<PathBuf>, sinks: LogSinks) -> Result<Self, MailCannonError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| output_err(&dir, &e))?;

        let (file_layer, log_file) = if sinks.file {
            let path = dir.join(format!("mail_cannon_{}.log", Utc::now().format(FILE_STAMP)));
            let file = open_log_file(&path).map_err(|e| output_err(&path, &e))?;
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_timer(ChronoUtc::new(LINE_TIME.to_string()))
                .with_writer(Mutex::new(file))
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(path))
        } else {
            (None, None)
        };

        let console_layer = sinks.console.map(|level| {
            let filter = EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy();
            fmt::layer()
                .with_ansi(io::stdout().is_terminal())
                .with_target(false)
                .with_timer(ChronoUtc::new(LINE_TIME.to_string()))
                .with_writer(io::stdout)
                .with_filter(filter)
        });

        let subscriber = Registry::default().with(console_layer).with(file_layer);
        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            dir,
            log_file,
        })
    }

    /// Dispatcher to run pipeline work under.
    #[must_use]
    pub const fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Directory holding the log and results files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the log file, when the file sink is enabled.
    #[must_use]
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

// Runs started within the same second share a file name; append so an earlier
// run's log survives.
fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

pub(crate) fn output_err(path: &Path, e: &io::Error) -> MailCannonError {
    MailCannonError::Output(format!("{}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reopening_a_log_file_keeps_earlier_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mail_cannon_20261019_083005.log");

        writeln!(open_log_file(&path).unwrap(), "first run").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second run").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first run\nsecond run\n");
    }

    #[test]
    fn file_sink_names_log_after_start_time() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RunLogger::new(dir.path().join("logs"), LogSinks { console: None, file: true })
            .unwrap();
        let name = logger.log_file().unwrap().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("mail_cannon_") && name.ends_with(".log"));
        assert!(logger.dir().is_dir());
    }
}
