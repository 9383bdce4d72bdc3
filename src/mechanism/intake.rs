//! Hold-to-run intake.
//!
//! The intake spins at its active voltage for as long as its button is held
//! and drops to the idle voltage as soon as it is released.

use log::warn;
use vexide::prelude::Motor;

use crate::config::{INTAKE_VOLTAGE_ACTIVE, INTAKE_VOLTAGE_IDLE};

/// Voltages for the held and released states of the intake button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intake {
    pub active:  f64,
    pub passive: f64,
}

impl Intake {
    pub const DEFAULT: Self = Self {
        active:  INTAKE_VOLTAGE_ACTIVE,
        passive: INTAKE_VOLTAGE_IDLE,
    };

    /// The voltage to command this cycle.
    pub fn voltage(&self, pressed: bool) -> f64 {
        if pressed { self.active } else { self.passive }
    }
}

impl Default for Intake {
    fn default() -> Self { Self::DEFAULT }
}

/// Sets the intake motor voltage.
pub fn drive(motor: &mut Motor, voltage: f64) {
    motor.set_voltage(voltage).unwrap_or_else(|e| {
        warn!("Intake Set Voltage Error: {}", e);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_only_while_held() {
        let intake = Intake::DEFAULT;
        assert_eq!(intake.voltage(true), 12.0);
        assert_eq!(intake.voltage(false), 0.0);
    }

    #[test]
    fn reversed_intake() {
        let intake = Intake {
            active:  -12.0,
            passive: 0.0,
        };
        assert_eq!(intake.voltage(true), -12.0);
    }
}
