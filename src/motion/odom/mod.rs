//! Odometry inputs from diagonal tracking pods.
//!
//! This module turns the two diagonally mounted encoder pods into the
//! forward and lateral distances an odometry integrator expects from a pair
//! of perpendicular tracking wheels.
//!
//! # Module Structure
//!
//! - **[`devices`]**: The pod sensors and the once-per-cycle read.
//! - **[`diagonal`]**: The forward/lateral transform of each reading.
//!
//! # How It Works
//!
//! Each cycle the pods are read once into a [`PodSample`](diagonal::PodSample).
//! The sample goes to [`VirtualWheels`](diagonal::VirtualWheels), which
//! returns how far the robot moved along its forward and lateral axes since
//! the previous cycle. Heading and global position are left to the
//! integrator.
//!
//! # Hardware Requirements
//!
//! - **Two encoder pods** at +45° and -45° to the chassis forward axis.
//!
//! # Example
//!
//! ```ignore
//! use atlas::{
//!     config::WheelConfig,
//!     motion::odom::{devices::DiagonalPods, diagonal::VirtualWheels},
//! };
//!
//! let mut wheels = VirtualWheels::new(WheelConfig::DEFAULT, 0.0, 0.0);
//! loop {
//!     match wheels.update(pods.sample()) {
//!         Ok(moved) => integrator.step(moved.forward, moved.lateral),
//!         Err(fault) => integrator.hold(fault),
//!     }
//!     sleep(CYCLE).await;
//! }
//! ```

/// Pod sensors.
pub mod devices;

/// Forward/lateral virtual tracking wheels.
pub mod diagonal;
