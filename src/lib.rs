//! # Atlas
//!
//! Driver control firmware for a VEX V5 competition robot, built on
//! [Vexide](https://vexide.dev). It provides:
//!
//! - **Diagonal odometry pods**: two encoder pods mounted at ±45° turned into
//!   forward and lateral virtual tracking wheels for an odometry integrator.
//! - **Lever sequencing**: a one-shot extend-and-return lever with boost,
//!   cruise and snap speed zones, and a hold-to-run intake.
//! - **Operator control**: edge-detected triggers and the middle goal toggle.
//! - **Logging**: a file-based logger for reviewing matches.
//!
//! ## Quick Start
//!
//! ```ignore
//! use atlas::{fs::logger, robot::Robot};
//! use log::LevelFilter;
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Info).expect("Failed to initialize logger");
//!
//!     let mut robot = Robot::default_config(peripherals);
//!     robot.init();
//!     robot.compete().await;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Build-time constants and their calibration checks.
//! - [`motion`]: Diagonal pod odometry.
//! - [`mechanism`]: The lever sequencer.
//! - [`opcontrol`]: Controller sampling, edge detection and toggles.
//! - [`cycle`]: One tick of the driver loop.
//! - [`robot`]: Devices and match lifecycle.
//! - [`telemetry`]: Read-only reporting of the driver loop.
//! - [`fs`]: Filesystem utilities including logging.

use std::sync::Arc;

use vexide::sync::Mutex;

/// Build-time configuration.
///
/// Wheel geometry, lever limits and speeds, and the control loop period.
pub mod config;

/// The driver control cycle.
pub mod cycle;

/// Error types.
pub mod error;

/// Filesystem utilities module.
///
/// Contains logging functionality for recording debug information to files
/// on the V5 Brain's SD card.
pub mod fs;

/// Scoring mechanisms: the lever and the intake.
pub mod mechanism;

/// Motion sensing module.
///
/// Provides the diagonal pod odometry front end.
pub mod motion;

/// Operator control utilities module.
///
/// Turns controller samples into trigger edges and toggles.
pub mod opcontrol;

/// Devices and match lifecycle.
pub mod robot;

/// Read-only reporting.
pub mod telemetry;

/// Wraps a value for sharing with a spawned task.
pub fn to_mutex<T>(t: T) -> Arc<Mutex<T>> { Arc::new(Mutex::new(t)) }
