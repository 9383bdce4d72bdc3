//! Error types shared across the crate.
//!
//! Device failures that callers must be able to tell apart from valid data
//! are reported as [`SensorFault`]. Configuration problems found by the
//! calibration checks in [`config`](crate::config) are reported as
//! [`CalibrationError`].

use std::fmt;

use thiserror::Error;

/// One of the two diagonal pod channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// The pod mounted at +45° to the chassis forward axis.
    A,
    /// The pod mounted at -45° to the chassis forward axis.
    B,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::A => write!(f, "A"),
            Channel::B => write!(f, "B"),
        }
    }
}

/// A tracking sensor could not be read.
///
/// Returned instead of a zero reading so that a stalled or unplugged
/// encoder is never mistaken for a robot standing still.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SensorFault {
    /// The device on the given channel returned an error.
    #[error("pod channel {channel} unavailable: {reason}")]
    Unavailable {
        /// The channel that failed.
        channel: Channel,
        /// The device error, as reported by vexide.
        reason:  String,
    },
}

impl SensorFault {
    /// Returns the channel that failed.
    pub fn channel(&self) -> Channel {
        match self {
            SensorFault::Unavailable { channel, .. } => *channel,
        }
    }
}

/// A configuration constant breaks one of the calibration invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("lever travel is empty: min {min}° is not below max {max}°")]
    EmptyTravel { min: f64, max: f64 },

    #[error("transition epsilon must be positive, got {0}°")]
    NonPositiveEpsilon(f64),

    #[error("transition bands overlap: epsilon {epsilon}° spans more than half of the travel")]
    OverlappingBands { epsilon: f64 },

    #[error("speed {speed} for {name} is outside 0..=127")]
    SpeedOutOfRange { name: &'static str, speed: i32 },

    #[error(
        "epsilon {epsilon}° does not cover the {per_cycle:.2}° the lever can travel in one cycle at boost"
    )]
    EpsilonBelowCycleTravel { epsilon: f64, per_cycle: f64 },

    #[error("wheel diameter must be positive, got {0} in")]
    NonPositiveDiameter(f64),

    #[error("ticks per revolution must be positive, got {0}")]
    NonPositiveTicks(f64),
}
