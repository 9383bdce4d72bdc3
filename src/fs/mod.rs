//! Filesystem utilities for the V5 Brain.
//!
//! # Logging
//!
//! The `logger` submodule writes every log record to the terminal and to
//! `log.txt` on the SD card.
//!
//! ```ignore
//! use atlas::fs::logger;
//! use log::{LevelFilter, info};
//!
//! logger::init(LevelFilter::Debug).expect("Failed to initialize logger");
//! info!("Robot initialized");
//! ```

/// Terminal and SD card logging.
pub mod logger;
