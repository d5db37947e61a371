use std::env;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level (`error` .. `trace`, `off`).
pub const LOG_ENV: &str = "WOODLAND_LOG";

/// Writes this crate's records to stderr, stamped with seconds since start.
/// Records from other crates are dropped.
struct MatchLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for MatchLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("woodland")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{:>9.3}s {:<5} {} - {}",
                self.started.elapsed().as_secs_f64(),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Install the stderr logger at the level named by `WOODLAND_LOG`, `info`
/// when unset or unparseable. Later calls keep the first logger.
pub fn init_logging() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info);
    let logger = MatchLogger {
        level,
        started: Instant::now(),
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}
