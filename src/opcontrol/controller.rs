//! Controller sampling for operator control.
//!
//! The controller is read once per control cycle into a
//! [`ControllerState`]. Everything downstream (trigger edges, the middle goal
//! toggle) works from that one snapshot, so all buttons in a cycle are seen
//! at the same instant.
//!
//! # Example
//!
//! ```ignore
//! use atlas::opcontrol::controller::{ControllerButton, TriggerSet, read_state};
//!
//! let mut triggers = TriggerSet::new(&[ControllerButton::ButtonR1, ControllerButton::ButtonR2]);
//!
//! loop {
//!     let state = read_state(&controller);
//!     if triggers.poll_state(&state) {
//!         // start the lever
//!     }
//! }
//! ```

use heapless::Vec;
use log::warn;
use vexide::{
    controller::{ButtonState, ControllerState},
    prelude::Controller,
};

use super::edge::EdgeDetector;

/// Maximum number of buttons a [`TriggerSet`] can watch.
pub const MAX_TRIGGERS: usize = 4;

/// A list of Controller Buttons.
///
/// # Example
///
/// ```ignore
/// let triggers = TriggerSet::new(&[ControllerButton::ButtonR1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    ButtonL1,
    ButtonL2,
    ButtonR1,
    ButtonR2,
}

/// A group of buttons that each start the same one-shot action.
///
/// Every button keeps its own [`EdgeDetector`]. All detectors are fed on
/// every poll, even after one of them has already fired, so a second button
/// pressed in the same cycle does not fire again on the next one.
#[derive(Debug, Clone)]
pub struct TriggerSet {
    triggers: Vec<(ControllerButton, EdgeDetector), MAX_TRIGGERS>,
}

impl TriggerSet {
    /// Creates a trigger set watching `buttons`.
    ///
    /// Buttons past [`MAX_TRIGGERS`] are dropped with a warning.
    pub fn new(buttons: &[ControllerButton]) -> Self {
        let mut triggers = Vec::new();
        for &button in buttons {
            if triggers.push((button, EdgeDetector::new())).is_err() {
                warn!("Trigger set full, ignoring {:?}", button);
            }
        }
        Self { triggers }
    }

    /// Samples every button through `pressed` and returns whether any of
    /// them was pressed this cycle after being released on the last one.
    pub fn poll(&mut self, mut pressed: impl FnMut(ControllerButton) -> bool) -> bool {
        let mut fired = false;
        for (button, detector) in self.triggers.iter_mut() {
            fired |= detector.rose(pressed(*button));
        }
        fired
    }

    /// [`poll`](Self::poll) against a controller snapshot.
    pub fn poll_state(&mut self, state: &ControllerState) -> bool {
        self.poll(|button| is_pressed(state, button))
    }

    /// The watched buttons, in the order given to [`new`](Self::new).
    pub fn buttons(&self) -> impl Iterator<Item = ControllerButton> + '_ {
        self.triggers.iter().map(|(button, _)| *button)
    }
}

/// Returns whether `button` is held in `state`.
pub fn is_pressed(state: &ControllerState, button: ControllerButton) -> bool {
    get_button_state(*state, button).is_pressed()
}

/// Reads the controller once. A disconnected controller reads as all
/// buttons released.
pub fn read_state(controller: &Controller) -> ControllerState {
    controller.state().unwrap_or_else(|e| {
        warn!("Controller State Error: {}", e);
        ControllerState::default()
    })
}

fn get_button_state(state: ControllerState, button: ControllerButton) -> ButtonState {
    match button {
        ControllerButton::ButtonA => state.button_a,
        ControllerButton::ButtonB => state.button_b,
        ControllerButton::ButtonX => state.button_x,
        ControllerButton::ButtonY => state.button_y,
        ControllerButton::ButtonUp => state.button_up,
        ControllerButton::ButtonDown => state.button_down,
        ControllerButton::ButtonLeft => state.button_left,
        ControllerButton::ButtonRight => state.button_right,
        ControllerButton::ButtonL1 => state.button_l1,
        ControllerButton::ButtonL2 => state.button_l2,
        ControllerButton::ButtonR1 => state.button_r1,
        ControllerButton::ButtonR2 => state.button_r2,
    }
}
