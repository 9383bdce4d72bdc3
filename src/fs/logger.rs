//! SD card logger.
//!
//! Implements the [`log`] facade. Every record goes to the terminal and is
//! appended to a file on the V5 Brain's SD card, so a match can be reviewed
//! after the robot comes off the field.
//!
//! ```ignore
//! use atlas::fs::logger;
//! use log::LevelFilter;
//!
//! logger::init(LevelFilter::Info).expect("Logger init failed");
//! ```
//!
//! Each line carries the level, the time since the user program started,
//! the module that logged it and the message:
//!
//! ```text
//! INFO [2m 5s 120ms] atlas::mechanism::lever - Lever extending
//! WARN [2m 5s 130ms] atlas::motion::odom::devices - Pod B Position Error: ...
//! ```

use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::{FormattedDuration, format_duration};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use vexide::time::user_uptime;

/// Default log file, at the root of the SD card.
pub const LOG_FILE: &str = "log.txt";

/// Terminal and file logger.
///
/// Lines at [`Level::Warn`] and above flush the file straight away, so a
/// fault is on the card even if the robot loses power right after it. If a
/// write fails (the card was pulled mid-match) the file is closed and
/// logging carries on to the terminal only.
pub struct RobotLogger {
    /// `None` when the file could not be opened or has failed since. The
    /// terminal still gets every line.
    file: Mutex<Option<BufWriter<File>>>,
}

impl RobotLogger {
    fn open(path: &str) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .map(BufWriter::new);

        Self {
            file: Mutex::new(match file {
                Ok(writer) => Some(writer),
                Err(e) => {
                    println!("Log file {} unavailable, terminal only: {}", path, e);
                    None
                }
            }),
        }
    }

    /// Whether the log file is being written.
    pub fn has_file(&self) -> bool { self.file.lock().map(|f| f.is_some()).unwrap_or(false) }

    fn write_file(&self, line: &str, urgent: bool) {
        let Ok(mut guard) = self.file.lock() else {
            return;
        };
        let Some(writer) = guard.as_mut() else {
            return;
        };
        let written = writer.write_all(line.as_bytes());
        let result = if urgent { written.and_then(|()| writer.flush()) } else { written };
        if let Err(e) = result {
            println!("Log file write failed, terminal only from here: {}", e);
            *guard = None;
        }
    }
}

impl log::Log for RobotLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record, uptime());
        print!("{}", line);
        self.write_file(&line, is_urgent(record.level()));
    }

    fn flush(&self) { self.write_file("", true); }
}

/// Whether a record at `level` is flushed to the card immediately.
fn is_urgent(level: Level) -> bool { level <= Level::Warn }

static LOGGER: OnceLock<RobotLogger> = OnceLock::new();

/// Installs the logger, writing to [`LOG_FILE`].
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RobotLogger::open(LOG_FILE));
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

fn format_line(record: &Record, time: FormattedDuration) -> String {
    format!(
        "{} [{}] {} - {}\n",
        record.level(),
        time,
        record.target(),
        record.args()
    )
}

/// Time since the user program started. Off the Brain there is no uptime
/// counter, so a fixed value is used.
fn uptime() -> FormattedDuration {
    let dur = if cfg!(target_os = "vexos") {
        user_uptime()
    } else {
        Duration::from_millis(125_120)
    };
    format_duration(dur)
}

#[cfg(test)]
mod tests {
    use log::info;

    use super::*;

    #[test]
    fn line_format() {
        let line = format_line(
            &Record::builder()
                .level(Level::Warn)
                .target("atlas::mechanism::lever")
                .args(format_args!("Lever Position Error: {}", "Disconnected"))
                .build(),
            format_duration(Duration::from_millis(125_120)),
        );
        assert_eq!(
            line,
            "WARN [2m 5s 120ms] atlas::mechanism::lever - Lever Position Error: Disconnected\n"
        );
    }

    #[test]
    fn warnings_and_errors_are_urgent() {
        assert!(is_urgent(Level::Error));
        assert!(is_urgent(Level::Warn));
        assert!(!is_urgent(Level::Info));
        assert!(!is_urgent(Level::Trace));
    }

    #[test]
    fn missing_directory_falls_back_to_terminal() {
        let logger = RobotLogger::open("/nonexistent-dir/atlas/log.txt");
        assert!(!logger.has_file());
        // Writing without a file is a no-op rather than an error.
        logger.write_file("INFO [0ms] test - line\n", true);
        assert!(!logger.has_file());
    }

    #[test]
    #[ignore = "filesystem access needed (file write)"]
    fn log_to_file() {
        super::init(LevelFilter::Trace).expect("Failed to initialize logger");
        info!("This is an info message");
        log::logger().flush();
        assert!(LOGGER.get().is_some_and(RobotLogger::has_file));
    }
}
