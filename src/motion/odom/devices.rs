//! Pod sensors for the diagonal tracking wheels.
//!
//! This module reads the two encoder pods into a [`PodSample`]. It includes:
//!
//! - **PodSensor**: An abstraction over the encoder types a pod can use.
//! - **DiagonalPods**: The pair of pods, read together once per cycle.
//!
//! # Example
//!
//! ```ignore
//! use atlas::motion::odom::devices::{DiagonalPods, PodSensor};
//! use vexide::prelude::*;
//!
//! let pods = DiagonalPods::new(
//!     PodSensor::new_adi_optical_encoder(AdiOpticalEncoder::new(
//!         peripherals.adi_a,
//!         peripherals.adi_b,
//!     )),
//!     PodSensor::new_adi_optical_encoder(AdiOpticalEncoder::new(
//!         peripherals.adi_c,
//!         peripherals.adi_d,
//!     )),
//!     8192.0,
//! );
//!
//! let sample = pods.sample()?;
//! ```

use std::f64::consts::TAU;

use log::warn;
use vexide::{
    adi::encoder::AdiOpticalEncoder,
    math::Angle,
    smart::{PortError, rotation::RotationSensor},
};

use super::diagonal::PodSample;
use crate::error::{Channel, SensorFault};

/// An encoder that can sit on a diagonal pod.
///
/// # Variants
///
/// - `AdiOpticalEncoder`: A 3-wire optical shaft encoder.
/// - `RotationSensor`: A V5 rotation sensor (high resolution).
pub enum PodSensor {
    /// An ADI (3-wire) optical shaft encoder.
    AdiOpticalEncoder(AdiOpticalEncoder),
    /// A V5 rotation sensor.
    RotationSensor(RotationSensor),
}

impl PodSensor {
    /// Creates a new PodSensor from an ADI optical encoder.
    pub fn new_adi_optical_encoder(encoder: AdiOpticalEncoder) -> Self {
        Self::AdiOpticalEncoder(encoder)
    }

    /// Creates a new PodSensor from a V5 rotation sensor.
    pub fn new_rotation_sensor(sensor: RotationSensor) -> Self { Self::RotationSensor(sensor) }

    /// Returns the current rotational position of the pod wheel.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the sensor is disconnected or encounters an error.
    pub fn position(&self) -> Result<Angle, PortError> {
        match self {
            PodSensor::AdiOpticalEncoder(encoder) => encoder.position(),
            PodSensor::RotationSensor(sensor) => sensor.position(),
        }
    }

    /// Resets the pod position to zero.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the sensor is disconnected or encounters an error.
    pub fn reset_position(&mut self) -> Result<(), PortError> {
        match self {
            PodSensor::AdiOpticalEncoder(encoder) => encoder.reset_position(),
            PodSensor::RotationSensor(sensor) => sensor.reset_position(),
        }
    }
}

/// The two diagonal pods.
pub struct DiagonalPods {
    /// The +45° pod.
    pub a:                    PodSensor,
    /// The -45° pod.
    pub b:                    PodSensor,
    /// Resolution the pod angles are expressed in.
    pub ticks_per_revolution: f64,
}

impl DiagonalPods {
    /// Creates the pod pair.
    ///
    /// # Arguments
    ///
    /// * `a` - The pod mounted at +45° to the chassis.
    /// * `b` - The pod mounted at -45° to the chassis.
    /// * `ticks_per_revolution` - Counts per revolution reported in each
    ///   [`PodSample`]. Must match the value the transforms are built with.
    pub fn new(a: PodSensor, b: PodSensor, ticks_per_revolution: f64) -> Self {
        Self {
            a,
            b,
            ticks_per_revolution,
        }
    }

    /// Reads both pods back to back.
    ///
    /// This is the only place the pods are read. Call it once per cycle and
    /// hand the result to every consumer.
    ///
    /// # Errors
    ///
    /// Returns a [`SensorFault`] naming the first pod that failed to read.
    pub fn sample(&self) -> Result<PodSample, SensorFault> {
        let a = read_ticks(&self.a, Channel::A, self.ticks_per_revolution)?;
        let b = read_ticks(&self.b, Channel::B, self.ticks_per_revolution)?;
        Ok(PodSample::new(a, b))
    }

    /// Tares both pods.
    ///
    /// # Errors
    ///
    /// Returns a [`SensorFault`] naming the first pod that could not be reset.
    pub fn reset(&mut self) -> Result<(), SensorFault> {
        self.a.reset_position().map_err(|e| fault(Channel::A, e))?;
        self.b.reset_position().map_err(|e| fault(Channel::B, e))?;
        Ok(())
    }
}

fn read_ticks(
    sensor: &PodSensor,
    channel: Channel,
    ticks_per_revolution: f64,
) -> Result<i64, SensorFault> {
    sensor
        .position()
        .map(|angle| angle_to_ticks(angle.as_radians(), ticks_per_revolution))
        .map_err(|e| fault(channel, e))
}

fn fault(channel: Channel, e: PortError) -> SensorFault {
    warn!("Pod {} Position Error: {}", channel, e);
    SensorFault::Unavailable {
        channel,
        reason: e.to_string(),
    }
}

fn angle_to_ticks(radians: f64, ticks_per_revolution: f64) -> i64 {
    (radians / TAU * ticks_per_revolution).round() as i64
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn full_turn_is_one_revolution_of_ticks() {
        assert_eq!(angle_to_ticks(TAU, 8192.0), 8192);
        assert_eq!(angle_to_ticks(-PI, 8192.0), -4096);
        assert_eq!(angle_to_ticks(0.0, 8192.0), 0);
    }

    #[test]
    fn partial_ticks_round_to_nearest() {
        let one_tick = TAU / 8192.0;
        assert_eq!(angle_to_ticks(one_tick * 0.6, 8192.0), 1);
        assert_eq!(angle_to_ticks(one_tick * 0.4, 8192.0), 0);
    }
}
