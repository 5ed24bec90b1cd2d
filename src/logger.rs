//! File logger for the terminal binary.
//!
//! Raw mode owns the terminal, so log records go to a file or nowhere.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

struct FileLogger {
    file: Mutex<File>,
    level: LevelFilter,
    started: Instant,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "{:>9.3} {:<5} {}: {}",
                elapsed,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Install the logger, appending to `path`.
///
/// The level comes from `GARDEN_LOG_LEVEL` (`error` .. `trace`), `debug` when unset.
pub fn init(path: &str) -> Result<()> {
    let level = match std::env::var("GARDEN_LOG_LEVEL") {
        Ok(raw) => raw
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| anyhow!("GARDEN_LOG_LEVEL has invalid value {:?}", raw))?,
        Err(_) => LevelFilter::Debug,
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path))?;

    log::set_boxed_logger(Box::new(FileLogger {
        file: Mutex::new(file),
        level,
        started: Instant::now(),
    }))
    .map_err(|e| anyhow!("failed to install logger: {}", e))?;
    log::set_max_level(level);
    Ok(())
}
