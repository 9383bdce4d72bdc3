//! One-shot lever sequencing.
//!
//! A trigger press sends the lever from its stowed position to full
//! extension and straight back. The extend stroke runs in three zones:
//!
//! - **Launch**: full speed until the lever clears `start_boost`.
//! - **Cruise**: fast or slow depending on the middle goal mode.
//! - **Snap**: full speed again inside the last `snap_zone` degrees.
//!
//! The return stroke runs at cruise speed throughout. Between strokes the
//! lever holds wherever it is with a low-speed position target.
//!
//! [`LeverSequencer`] is pure state: it takes the measured lever angle and
//! returns a [`LeverCommand`]. [`drive`] and [`read_position`] connect it to
//! the motor.
//!
//! # Example
//!
//! ```
//! use atlas::{
//!     config::LeverConfig,
//!     mechanism::lever::{LeverPhase, LeverSequencer},
//! };
//!
//! let mut lever = LeverSequencer::new(LeverConfig::DEFAULT);
//! assert!(lever.trigger());
//! let command = lever.update(0.0, false);
//! assert_eq!(command.target, 270.0);
//! assert_eq!(command.speed, 127);
//! assert_eq!(lever.phase(), LeverPhase::Extending);
//! ```

use log::{info, warn};
use vexide::{math::Angle, prelude::Motor};

use crate::config::LeverConfig;

/// Where the lever is in its cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeverPhase {
    /// Holding position, waiting for a trigger.
    #[default]
    Idle,
    /// Moving toward full extension.
    Extending,
    /// Returning to the stowed position.
    Retracting,
}

/// A position target for the lever motor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverCommand {
    /// Target angle in degrees.
    pub target: f64,
    /// Speed in `0..=127`.
    pub speed:  i32,
}

/// The lever state machine.
#[derive(Debug, Clone)]
pub struct LeverSequencer {
    config: LeverConfig,
    phase:  LeverPhase,
}

impl LeverSequencer {
    /// Creates an idle sequencer.
    pub fn new(config: LeverConfig) -> Self {
        Self {
            config,
            phase: LeverPhase::Idle,
        }
    }

    pub fn phase(&self) -> LeverPhase { self.phase }

    pub fn config(&self) -> &LeverConfig { &self.config }

    /// Whether a stroke is in progress.
    pub fn is_active(&self) -> bool { self.phase != LeverPhase::Idle }

    /// Starts a cycle if the lever is idle. Returns whether the trigger was
    /// accepted; triggers during a cycle are ignored.
    pub fn trigger(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        info!("Lever extending");
        self.phase = LeverPhase::Extending;
        true
    }

    /// Speed used outside the boost zones, and for the whole return stroke.
    pub fn cruise_speed(&self, middle_goal: bool) -> i32 {
        if middle_goal {
            self.config.speed_fast
        } else {
            self.config.speed_slow
        }
    }

    /// Speed of the extend stroke at `position`.
    ///
    /// When the launch and snap zones overlap, boost covers the whole stroke.
    pub fn extend_speed(&self, position: f64, middle_goal: bool) -> i32 {
        let launching = position <= self.config.start_boost;
        let snapping = position >= self.config.max - self.config.snap_zone;
        if launching || snapping {
            self.config.speed_boost
        } else {
            self.cruise_speed(middle_goal)
        }
    }

    /// Advances the state machine by one cycle.
    ///
    /// # Arguments
    ///
    /// * `position` - The lever angle measured this cycle, in degrees.
    /// * `middle_goal` - Whether the middle goal mode is on.
    ///
    /// The returned command is for this cycle. A transition triggered by
    /// `position` takes effect from the next call.
    pub fn update(&mut self, position: f64, middle_goal: bool) -> LeverCommand {
        match self.phase {
            LeverPhase::Idle => LeverCommand {
                target: position,
                speed:  self.config.speed_hold,
            },
            LeverPhase::Extending => {
                let command = LeverCommand {
                    target: self.config.max,
                    speed:  self.extend_speed(position, middle_goal),
                };
                if position >= self.config.extended_threshold() {
                    info!("Lever retracting from {:.1}°", position);
                    self.phase = LeverPhase::Retracting;
                }
                command
            }
            LeverPhase::Retracting => {
                let command = LeverCommand {
                    target: self.config.min,
                    speed:  self.cruise_speed(middle_goal),
                };
                if position <= self.config.retracted_threshold() {
                    info!("Lever stowed at {:.1}°", position);
                    self.phase = LeverPhase::Idle;
                }
                command
            }
        }
    }

    /// One control cycle: applies a trigger edge, then [`update`](Self::update).
    pub fn step(&mut self, triggered: bool, position: f64, middle_goal: bool) -> LeverCommand {
        if triggered {
            self.trigger();
        }
        self.update(position, middle_goal)
    }
}

/// Sends `command` to the lever motor.
pub fn drive(motor: &mut Motor, command: LeverCommand) {
    motor
        .set_position_target(Angle::from_degrees(command.target), command.speed)
        .unwrap_or_else(|e| {
            warn!("Lever Set Target Error: {}", e);
        });
}

/// Reads the lever angle in degrees.
///
/// Returns `None` if the motor cannot be read, in which case the caller
/// should skip sequencing for the cycle rather than guess a position.
pub fn read_position(motor: &Motor) -> Option<f64> {
    match motor.position() {
        Ok(angle) => Some(angle.as_degrees()),
        Err(e) => {
            warn!("Lever Position Error: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        LEVER_SPEED_BOOST as BOOST, LEVER_SPEED_FAST as FAST, LEVER_SPEED_HOLD as HOLD,
        LEVER_SPEED_SLOW as SLOW,
    };

    fn lever() -> LeverSequencer { LeverSequencer::new(LeverConfig::DEFAULT) }

    #[test]
    fn starts_idle_and_holds() {
        let mut lever = lever();
        assert_eq!(lever.phase(), LeverPhase::Idle);
        let command = lever.update(37.5, true);
        assert_eq!(
            command,
            LeverCommand {
                target: 37.5,
                speed:  HOLD,
            }
        );
        assert_eq!(lever.phase(), LeverPhase::Idle);
    }

    #[test]
    fn extend_zone_speeds() {
        let lever = lever();
        let speeds: Vec<i32> = [0.0, 5.0, 50.0, 260.0, 268.0, 270.0]
            .iter()
            .map(|&p| lever.extend_speed(p, false))
            .collect();
        assert_eq!(speeds, vec![BOOST, BOOST, SLOW, BOOST, BOOST, BOOST]);
        assert_eq!(lever.extend_speed(50.0, true), FAST);
        assert_eq!(lever.extend_speed(10.0, false), BOOST);
        assert_eq!(lever.extend_speed(10.1, false), SLOW);
    }

    #[test]
    fn full_cycle() {
        let mut lever = lever();
        assert_eq!(lever.step(true, 0.0, false).speed, BOOST);
        assert_eq!(lever.phase(), LeverPhase::Extending);

        for (position, speed) in [(5.0, BOOST), (50.0, SLOW), (260.0, BOOST)] {
            let command = lever.step(false, position, false);
            assert_eq!(command.target, 270.0);
            assert_eq!(command.speed, speed);
            assert_eq!(lever.phase(), LeverPhase::Extending);
        }

        let command = lever.step(false, 268.0, false);
        assert_eq!(command.target, 270.0);
        assert_eq!(command.speed, BOOST);
        assert_eq!(lever.phase(), LeverPhase::Retracting);

        for position in [270.0, 260.0, 50.0] {
            let command = lever.step(false, position, false);
            assert_eq!(command.target, 0.0);
            assert_eq!(command.speed, SLOW);
            assert_eq!(lever.phase(), LeverPhase::Retracting);
        }

        let command = lever.step(false, 2.0, false);
        assert_eq!(command.speed, SLOW);
        assert_eq!(lever.phase(), LeverPhase::Idle);

        let command = lever.step(false, 0.0, false);
        assert_eq!(command.target, 0.0);
        assert_eq!(command.speed, HOLD);
    }

    #[test]
    fn retract_speed_follows_middle_goal() {
        let mut lever = lever();
        lever.trigger();
        lever.update(269.0, true);
        assert_eq!(lever.phase(), LeverPhase::Retracting);
        assert_eq!(lever.update(150.0, true).speed, FAST);
        assert_eq!(lever.update(150.0, false).speed, SLOW);
        // No boost on the way down.
        assert_eq!(lever.update(5.0, false).speed, SLOW);
    }

    #[test]
    fn trigger_ignored_while_active() {
        let mut lever = lever();
        assert!(lever.trigger());
        let before = lever.update(100.0, false);
        assert!(!lever.trigger());
        assert_eq!(lever.phase(), LeverPhase::Extending);
        assert_eq!(lever.step(true, 100.0, false), before);

        lever.update(270.0, false);
        assert!(!lever.trigger());
        assert_eq!(lever.phase(), LeverPhase::Retracting);
        assert_eq!(lever.step(true, 100.0, false).target, 0.0);
    }

    #[test]
    fn retriggers_after_stowing() {
        let mut lever = lever();
        lever.step(true, 0.0, false);
        lever.step(false, 270.0, false);
        lever.step(false, 0.0, false);
        assert_eq!(lever.phase(), LeverPhase::Idle);
        assert!(lever.trigger());
    }

    #[test]
    fn overlapping_zones_boost_everywhere() {
        let mut lever = LeverSequencer::new(LeverConfig {
            start_boost: 150.0,
            snap_zone: 150.0,
            ..LeverConfig::DEFAULT
        });
        lever.trigger();
        for position in [0.0, 100.0, 135.0, 150.0, 200.0, 267.0] {
            assert_eq!(lever.update(position, false).speed, BOOST);
        }
    }

    #[test]
    fn overshoot_still_transitions() {
        let mut lever = lever();
        lever.trigger();
        lever.update(275.0, false);
        assert_eq!(lever.phase(), LeverPhase::Retracting);
        lever.update(-4.0, false);
        assert_eq!(lever.phase(), LeverPhase::Idle);
    }
}
