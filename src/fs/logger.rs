//! File-based logger implementation.
//!
//! This module implements the [`log`] crate's logging facade, writing log
//! messages to both the console and `robot.log` in the working directory
//! (the SD card root on the V5 Brain).
//!
//! # Usage
//!
//! Initialize the logger once at the start of your program:
//!
//! ```ignore
//! use briareus::fs::logger;
//! use log::{info, warn, LevelFilter};
//!
//! logger::init(LevelFilter::Debug).expect("Logger init failed");
//!
//! info!("Program started");
//! warn!("Compressor stopped: AllStop");
//! ```
//!
//! # Log Output
//!
//! Each entry holds the level, the uptime, the target (module path) and the
//! message:
//!
//! ```text
//! INFO [2m 5s 123ms] briareus::robot - Robot initialized
//! WARN [2m 9s 456ms] briareus::robot - Vision: cannot equalize an empty image
//! ```

use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::{FormattedDuration, format_duration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Name of the log file.
pub const LOG_FILE: &str = "robot.log";

/// A dual-output logger.
///
/// Writes log messages to both the console and [`LOG_FILE`]. The file is
/// created/truncated when the logger is initialized.
pub struct RobotLogger {
    /// Buffered file writer for log output.
    ///
    /// `None` if the file could not be opened (e.g., no SD card present).
    file_writer: Mutex<Option<BufWriter<std::fs::File>>>,
}

impl RobotLogger {
    fn new() -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(LOG_FILE)
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
        }
    }
}

impl log::Log for RobotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_line = format_line(record, uptime());

            print!("{}", log_line);

            if let Ok(mut writer_guard) = self.file_writer.lock() {
                if let Some(ref mut writer) = *writer_guard {
                    let _ = writer.write_all(log_line.as_bytes());
                }
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(ref mut writer) = *writer_guard {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<RobotLogger> = OnceLock::new();

/// Initializes the robot logger.
///
/// Call once before any logging macros are used.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    start_clock();
    let logger = LOGGER.get_or_init(RobotLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

fn format_line(record: &Record, uptime: Duration) -> String {
    format!(
        "{} [{}] {} - {}\n",
        record.level(),
        format_uptime(uptime),
        record.target(),
        record.args()
    )
}

/// Truncated to whole milliseconds.
fn format_uptime(uptime: Duration) -> FormattedDuration {
    format_duration(Duration::from_millis(uptime.as_millis() as u64))
}

#[cfg(target_os = "vexos")]
fn start_clock() {}

#[cfg(target_os = "vexos")]
fn uptime() -> Duration { vexide::time::user_uptime() }

#[cfg(not(target_os = "vexos"))]
static START: OnceLock<std::time::Instant> = OnceLock::new();

#[cfg(not(target_os = "vexos"))]
fn start_clock() { START.get_or_init(std::time::Instant::now); }

#[cfg(not(target_os = "vexos"))]
fn uptime() -> Duration { START.get_or_init(std::time::Instant::now).elapsed() }

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use log::{Level, LevelFilter, debug, error, info, trace, warn};

    use super::*;

    #[test]
    fn line_has_level_uptime_target_and_message() {
        let line = format_line(
            &Record::builder()
                .level(Level::Warn)
                .target("briareus::robot")
                .args(format_args!("Compressor stopped"))
                .build(),
            Duration::from_millis(125_432),
        );
        assert_eq!(line, "WARN [2m 5s 432ms] briareus::robot - Compressor stopped\n");
    }

    #[test]
    fn uptime_drops_sub_millisecond_noise() {
        assert_eq!(format_uptime(Duration::from_micros(1_500)).to_string(), "1ms");
    }

    #[test]
    #[ignore = "filesystem access needed (file write)"]
    fn log_full_test() {
        super::init(LevelFilter::Trace).expect("Failed to initialize logger");

        trace!("This is a trace message");
        debug!("This is a debug message");
        info!("This is an info message");
        warn!("This is a warning message");
        error!("This is an error message");

        log::logger().flush();

        assert!(
            log::logger().enabled(
                &log::Metadata::builder()
                    .level(log::Level::Error)
                    .target("test")
                    .build()
            )
        );
    }
}
