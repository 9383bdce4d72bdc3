//! Virtual tracking wheels built from two diagonal pods.
//!
//! Two encoder pods are mounted at ±45° to the chassis. Neither measures
//! forward or sideways travel on its own, but their sum and difference do:
//!
//! ```text
//! forward = (dA + dB) / √2
//! lateral = (dA - dB) / √2
//! ```
//!
//! Each [`AxisTransform`] turns successive raw tick pairs into the distance
//! travelled along one robot axis since the previous pair. The forward and
//! lateral transforms must see the same pair every cycle, otherwise ticks
//! that arrive between two reads are counted by one axis and not the other.
//! [`VirtualWheels`] owns both transforms and feeds them one [`PodSample`],
//! which is read from hardware exactly once per cycle.
//!
//! # Example
//!
//! ```
//! use atlas::{
//!     config::WheelConfig,
//!     motion::odom::diagonal::{PodSample, VirtualWheels},
//! };
//!
//! let mut wheels = VirtualWheels::new(WheelConfig::DEFAULT, 0.0, 0.0);
//! let moved = wheels.update(Ok(PodSample::new(8192, 8192))).unwrap();
//! assert!(moved.lateral.abs() < 1e-12);
//! assert!(moved.forward > 0.0);
//! ```

use std::f64::consts::SQRT_2;

use crate::{config::WheelConfig, error::SensorFault};

/// Absolute tick counts of both pods, read in the same cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PodSample {
    /// Channel A count.
    pub a: i64,
    /// Channel B count.
    pub b: i64,
}

impl PodSample {
    /// Both encoders at their tare position.
    pub const ZERO: Self = Self { a: 0, b: 0 };

    pub const fn new(a: i64, b: i64) -> Self { Self { a, b } }

    /// Tick change from `earlier` to `self`, per channel.
    pub fn delta_since(&self, earlier: &PodSample) -> (i64, i64) {
        (self.a - earlier.a, self.b - earlier.b)
    }
}

/// The robot axis a transform reports along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Along the chassis' direction of travel.
    Forward,
    /// Sideways, perpendicular to [`Orientation::Forward`].
    Lateral,
}

/// One virtual tracking wheel.
#[derive(Debug, Clone)]
pub struct AxisTransform {
    orientation: Orientation,
    wheel:       WheelConfig,
    /// Distance from the tracking center, in inches. Only the pose
    /// integrator uses this.
    offset:      f64,
    last:        PodSample,
}

impl AxisTransform {
    /// Creates a transform for `orientation`, starting from tared encoders.
    pub fn new(orientation: Orientation, wheel: WheelConfig, offset: f64) -> Self {
        Self {
            orientation,
            wheel,
            offset,
            last: PodSample::ZERO,
        }
    }

    /// Distance travelled along this axis since the previous sample, in
    /// inches. Returns exactly `0.0` when neither count has changed.
    pub fn sample(&mut self, sample: PodSample) -> f64 {
        let (da, db) = sample.delta_since(&self.last);
        self.last = sample;
        self.project(da, db)
    }

    /// Projects a pair of tick deltas onto this axis without touching the
    /// stored sample.
    pub fn project(&self, da: i64, db: i64) -> f64 {
        let inches_per_tick = self.wheel.inches_per_tick();
        let da = da as f64 * inches_per_tick;
        let db = db as f64 * inches_per_tick;
        match self.orientation {
            Orientation::Forward => (da + db) / SQRT_2,
            Orientation::Lateral => (da - db) / SQRT_2,
        }
    }

    /// Makes `sample` the reference for the next call to
    /// [`sample`](Self::sample).
    pub fn reset(&mut self, sample: PodSample) { self.last = sample; }

    pub fn orientation(&self) -> Orientation { self.orientation }

    pub fn offset(&self) -> f64 { self.offset }

    pub fn wheel(&self) -> WheelConfig { self.wheel }

    /// The last sample this transform consumed.
    pub fn last(&self) -> PodSample { self.last }
}

/// Per-cycle motion along both robot axes, in inches.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisDistances {
    pub forward: f64,
    pub lateral: f64,
}

/// The forward and lateral transforms of one pod pair.
#[derive(Debug, Clone)]
pub struct VirtualWheels {
    forward: AxisTransform,
    lateral: AxisTransform,
}

impl VirtualWheels {
    /// Creates both virtual wheels.
    ///
    /// # Arguments
    ///
    /// * `wheel` - The pod wheel geometry, shared by both axes.
    /// * `forward_offset` - Offset of the forward wheel from the tracking center.
    /// * `lateral_offset` - Offset of the lateral wheel from the tracking center.
    pub fn new(wheel: WheelConfig, forward_offset: f64, lateral_offset: f64) -> Self {
        Self {
            forward: AxisTransform::new(Orientation::Forward, wheel, forward_offset),
            lateral: AxisTransform::new(Orientation::Lateral, wheel, lateral_offset),
        }
    }

    /// Feeds this cycle's pod reading to both axes.
    ///
    /// # Errors
    ///
    /// Passes a [`SensorFault`] through unchanged. Neither axis advances, so
    /// once the pods read again the whole motion since the last good sample
    /// is reported.
    pub fn update(
        &mut self,
        reading: Result<PodSample, SensorFault>,
    ) -> Result<AxisDistances, SensorFault> {
        let sample = reading?;
        Ok(AxisDistances {
            forward: self.forward.sample(sample),
            lateral: self.lateral.sample(sample),
        })
    }

    /// Re-baselines both axes to `sample`.
    pub fn reset(&mut self, sample: PodSample) {
        self.forward.reset(sample);
        self.lateral.reset(sample);
    }

    pub fn forward(&self) -> &AxisTransform { &self.forward }

    pub fn lateral(&self) -> &AxisTransform { &self.lateral }
}
