#![cfg(feature = "std")]

use log::{LevelFilter, Metadata, Record};
use std::env;

struct StdoutLogger;

impl log::Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

/// Level named by `BATTLESHIP_LOG`, or `info` when unset or invalid.
pub fn log_level_from_env() -> LevelFilter {
    env::var("BATTLESHIP_LOG")
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the stdout logger. Calling it again is harmless.
pub fn init_logging() {
    let level = log_level_from_env();
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
