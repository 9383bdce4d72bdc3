//! Build-time configuration.
//!
//! Every tunable number the control cycle depends on lives here as a named
//! constant, grouped into [`WheelConfig`] and [`LeverConfig`] for the
//! components that consume them. None of these are adjustable at runtime.
//!
//! The shipped constants are checked at compile time where the check can be
//! expressed as a constant expression. The remaining invariants are covered
//! by [`LeverConfig::validate`], [`LeverConfig::check_cadence`] and
//! [`WheelConfig::validate`], which the unit tests run against the defaults.

use std::{f64::consts::PI, time::Duration};

use static_assertions::const_assert;

use crate::error::CalibrationError;

/// The period of the driver control loop.
///
/// Shared by everything whose thresholds assume a fixed amount of motion per
/// cycle, see [`LeverConfig::check_cadence`].
pub const CYCLE: Duration = Duration::from_millis(10);

/// Counts reported by a pod encoder per wheel revolution.
pub const TICKS_PER_REVOLUTION: f64 = 8192.0;

/// Diameter of the omni wheels on the diagonal pods, in inches.
pub const POD_WHEEL_DIAMETER: f64 = 2.0;

/// Lever angle at full retraction, in degrees.
pub const LEVER_MIN: f64 = 0.0;
/// Lever angle at full extension, in degrees.
pub const LEVER_MAX: f64 = 270.0;
/// Launch zone at the start of the extend stroke, in degrees.
pub const LEVER_START_BOOST: f64 = 10.0;
/// Snap zone at the end of the extend stroke, in degrees.
pub const LEVER_SNAP_ZONE: f64 = 10.0;
/// How close to an end stop counts as having reached it, in degrees.
pub const LEVER_EPSILON: f64 = 2.0;

/// Cruise speed while the middle goal mode is on.
pub const LEVER_SPEED_FAST: i32 = 70;
/// Cruise speed while the middle goal mode is off.
pub const LEVER_SPEED_SLOW: i32 = 30;
/// Full throttle.
pub const LEVER_SPEED_BOOST: i32 = 127;
/// Low-torque hold used while idle.
pub const LEVER_SPEED_HOLD: i32 = 50;

/// Upper bound of the actuator speed command.
pub const MAX_SPEED: i32 = 127;

/// Measured lever speed at [`LEVER_SPEED_BOOST`] inside the transition bands,
/// in degrees per second. The lever decelerates into its end stops, so this
/// is far below the free speed of the motor.
pub const LEVER_BOOST_DEGREES_PER_SECOND: f64 = 180.0;

/// Intake voltage while its button is held.
pub const INTAKE_VOLTAGE_ACTIVE: f64 = 12.0;
/// Intake voltage while its button is released.
pub const INTAKE_VOLTAGE_IDLE: f64 = 0.0;

const_assert!(TICKS_PER_REVOLUTION > 0.0);
const_assert!(POD_WHEEL_DIAMETER > 0.0);
const_assert!(LEVER_MIN < LEVER_MAX);
const_assert!(LEVER_EPSILON > 0.0);
const_assert!(LEVER_MIN + LEVER_EPSILON < LEVER_MAX - LEVER_EPSILON);
const_assert!(LEVER_SPEED_BOOST <= MAX_SPEED);
const_assert!(LEVER_SPEED_FAST <= MAX_SPEED && LEVER_SPEED_SLOW >= 0);
const_assert!(LEVER_EPSILON > LEVER_BOOST_DEGREES_PER_SECOND * CYCLE.as_millis() as f64 / 1000.0);
const_assert!(INTAKE_VOLTAGE_ACTIVE <= 12.0 && INTAKE_VOLTAGE_IDLE >= -12.0);

/// Physical properties of a diagonal tracking pod.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelConfig {
    /// Wheel diameter in inches.
    pub wheel_diameter:       f64,
    /// Encoder counts per wheel revolution.
    pub ticks_per_revolution: f64,
}

impl WheelConfig {
    /// The pods as built.
    pub const DEFAULT: Self = Self {
        wheel_diameter:       POD_WHEEL_DIAMETER,
        ticks_per_revolution: TICKS_PER_REVOLUTION,
    };

    /// Linear wheel travel per encoder count, in inches.
    pub fn inches_per_tick(&self) -> f64 { PI * self.wheel_diameter / self.ticks_per_revolution }

    /// Checks that the wheel geometry is physically meaningful.
    ///
    /// A wrong but positive value still passes. That kind of error only shows
    /// up as a scale error in the reported distances and has to be caught by
    /// pushing the robot a known distance.
    ///
    /// # Errors
    ///
    /// Returns a [`CalibrationError`] for a non-positive diameter or tick count.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !(self.wheel_diameter > 0.0) {
            return Err(CalibrationError::NonPositiveDiameter(self.wheel_diameter));
        }
        if !(self.ticks_per_revolution > 0.0) {
            return Err(CalibrationError::NonPositiveTicks(self.ticks_per_revolution));
        }
        Ok(())
    }
}

impl Default for WheelConfig {
    fn default() -> Self { Self::DEFAULT }
}

/// Travel limits, speed zones and speeds of the lever.
///
/// Speeds are motor velocity commands in `0..=127` and angles are degrees of
/// the lever motor shaft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeverConfig {
    pub min:         f64,
    pub max:         f64,
    pub start_boost: f64,
    pub snap_zone:   f64,
    pub epsilon:     f64,
    pub speed_fast:  i32,
    pub speed_slow:  i32,
    pub speed_boost: i32,
    pub speed_hold:  i32,
}

impl LeverConfig {
    /// The lever as built.
    pub const DEFAULT: Self = Self {
        min:         LEVER_MIN,
        max:         LEVER_MAX,
        start_boost: LEVER_START_BOOST,
        snap_zone:   LEVER_SNAP_ZONE,
        epsilon:     LEVER_EPSILON,
        speed_fast:  LEVER_SPEED_FAST,
        speed_slow:  LEVER_SPEED_SLOW,
        speed_boost: LEVER_SPEED_BOOST,
        speed_hold:  LEVER_SPEED_HOLD,
    };

    /// Position at or above which the extend stroke is complete.
    pub fn extended_threshold(&self) -> f64 { self.max - self.epsilon }

    /// Position at or below which the retract stroke is complete.
    pub fn retracted_threshold(&self) -> f64 { self.min + self.epsilon }

    /// Checks the structural invariants of the lever configuration.
    ///
    /// Overlapping boost and snap zones are allowed; boost then covers the
    /// whole stroke.
    ///
    /// # Errors
    ///
    /// Returns the first [`CalibrationError`] found.
    pub fn validate(&self) -> Result<(), CalibrationError> {
        if !(self.min < self.max) {
            return Err(CalibrationError::EmptyTravel {
                min: self.min,
                max: self.max,
            });
        }
        if !(self.epsilon > 0.0) {
            return Err(CalibrationError::NonPositiveEpsilon(self.epsilon));
        }
        if self.retracted_threshold() >= self.extended_threshold() {
            return Err(CalibrationError::OverlappingBands {
                epsilon: self.epsilon,
            });
        }
        for (name, speed) in [
            ("fast", self.speed_fast),
            ("slow", self.speed_slow),
            ("boost", self.speed_boost),
            ("hold", self.speed_hold),
        ] {
            if !(0..=MAX_SPEED).contains(&speed) {
                return Err(CalibrationError::SpeedOutOfRange { name, speed });
            }
        }
        Ok(())
    }

    /// Checks that the transition bands are wide enough for the loop rate.
    ///
    /// `boost_degrees_per_second` is the lever's measured speed while running
    /// at boost. If it can cover more than `epsilon` degrees within one
    /// `cadence`, a stroke may end without a cycle ever observing the lever
    /// inside the band.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::EpsilonBelowCycleTravel`] when the band is
    /// too narrow.
    pub fn check_cadence(
        &self,
        cadence: Duration,
        boost_degrees_per_second: f64,
    ) -> Result<(), CalibrationError> {
        let per_cycle = boost_degrees_per_second * cadence.as_secs_f64();
        if self.epsilon <= per_cycle {
            return Err(CalibrationError::EpsilonBelowCycleTravel {
                epsilon: self.epsilon,
                per_cycle,
            });
        }
        Ok(())
    }
}

impl Default for LeverConfig {
    fn default() -> Self { Self::DEFAULT }
}

/// Converts a motor speed in RPM to degrees per second of shaft rotation.
pub fn rpm_to_degrees_per_second(rpm: f64) -> f64 { rpm * 360.0 / 60.0 }
