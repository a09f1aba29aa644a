//! Minimal stderr logger for the `log` facade

use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "error".red().bold(),
            Level::Warn => "warn".yellow().bold(),
            Level::Info => "info".green(),
            Level::Debug => "debug".blue(),
            Level::Trace => "trace".dimmed(),
        };
        eprintln!("{}{} {}", level, ":".dimmed(), record.args());
    }

    fn flush(&self) {}
}

/// Level for the `--verbose` flag: warnings only, or everything down to debug
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger; later calls only change the level
pub fn init(verbose: bool) {
    // Already installed: keep the existing logger
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level_for(verbose));
}
