//! Operator control inputs.
//!
//! This module turns raw controller samples into the discrete events the
//! driver control cycle acts on.
//!
//! # Features
//!
//! - **Edge detection**: one event per button press, however long it is held.
//! - **Trigger sets**: several buttons that start the same one-shot action.
//! - **Toggles**: a button that flips an on/off mode and its piston.
//!
//! # Example
//!
//! ```ignore
//! use atlas::opcontrol::{
//!     controller::{ControllerButton, TriggerSet, is_pressed, read_state},
//!     toggle::AuxToggle,
//! };
//!
//! let mut triggers = TriggerSet::new(&[ControllerButton::ButtonR1, ControllerButton::ButtonR2]);
//! let mut middle = AuxToggle::new(false);
//!
//! let state = read_state(&controller);
//! let start_lever = triggers.poll_state(&state);
//! if middle.update(is_pressed(&state, ControllerButton::ButtonB)).is_some() {
//!     middle.apply(&mut piston);
//! }
//! ```

/// Controller sampling and trigger sets.
///
/// Provides [`TriggerSet`](controller::TriggerSet) and the
/// [`ControllerButton`](controller::ControllerButton) list.
pub mod controller;

/// Rising-edge detection.
pub mod edge;

/// Button-driven on/off latch.
pub mod toggle;
