//! Button-driven on/off latch.
//!
//! Used for the middle goal mode: one press of its button flips a piston and
//! switches the lever between its fast and slow cruise speeds.

use log::{info, warn};
use vexide::prelude::AdiDigitalOut;

use super::edge::EdgeDetector;

/// A boolean latch flipped by rising edges of one input.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuxToggle {
    edge:  EdgeDetector,
    state: bool,
}

impl AuxToggle {
    /// Creates a latch in the given state.
    pub const fn new(initial: bool) -> Self {
        Self {
            edge:  EdgeDetector::new(),
            state: initial,
        }
    }

    /// The current latch state.
    pub fn state(&self) -> bool { self.state }

    /// Feeds one sample of the button. Returns the new state if this sample
    /// flipped the latch.
    pub fn update(&mut self, pressed: bool) -> Option<bool> {
        self.edge.observe(pressed)?;
        self.state = !self.state;
        info!("Middle goal {}", if self.state { "on" } else { "off" });
        Some(self.state)
    }

    /// Drives `output` to match the latch.
    pub fn apply(&self, output: &mut AdiDigitalOut) {
        let result = if self.state {
            output.set_high()
        } else {
            output.set_low()
        };
        result.unwrap_or_else(|e| {
            warn!("ADI Set Level Error: {}", e);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_once_per_press() {
        let mut toggle = AuxToggle::new(false);
        let presses = [false, true, true, false, true, false, false];
        let flips: Vec<Option<bool>> = presses.iter().map(|&p| toggle.update(p)).collect();
        assert_eq!(
            flips,
            vec![None, Some(true), None, None, Some(false), None, None]
        );
        assert!(!toggle.state());
    }

    #[test]
    fn starts_in_given_state() {
        assert!(AuxToggle::new(true).state());
        assert!(!AuxToggle::default().state());
    }
}
