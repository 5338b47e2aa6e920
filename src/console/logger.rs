use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fmt;
use std::sync::{Arc, Mutex};

#[derive(PartialEq, Clone, Debug, Eq)]
pub struct LogLine {
    pub level: Level,
    pub time: String,
    pub target: String,
    pub body: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {} {}] {}",
            self.time, self.level, self.target, self.body
        )
    }
}

pub type LogBuffer = Arc<Mutex<Vec<LogLine>>>;

/// Logger that captures records into a buffer, later drained into the UI console.
/// Filtering is taken from `RUST_LOG` the same way as `env_logger` does it.
pub struct ConsoleLogger {
    inner: env_logger::Logger,
    buffer: LogBuffer,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.inner.matches(record) {
            return;
        }

        let line = LogLine {
            level: record.level(),
            time: Local::now().format("%H:%M:%S%.3f").to_string(),
            target: record.target().to_string(),
            body: format!("{}", record.args()),
        };
        self.buffer.lock().unwrap().push(line);
    }

    fn flush(&self) {}
}

impl ConsoleLogger {
    pub fn new(buffer: LogBuffer) -> Self {
        Self::with_env(buffer, env_logger::Env::default())
    }

    pub fn with_env(buffer: LogBuffer, env: env_logger::Env) -> Self {
        Self {
            inner: env_logger::Builder::from_env(env).build(),
            buffer,
        }
    }

    pub fn filter(&self) -> LevelFilter {
        self.inner.filter()
    }

    /// Set this logger as a global logger.
    pub fn install(self) -> Result<(), SetLoggerError> {
        let filter = self.filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }
}
