//! Read-only view of the driver loop for reporting.
//!
//! The driver loop records each tick into a shared [`Telemetry`]. A
//! reporter task only reads it. Fields are updated one by one, so a reader
//! may see some fields from one tick and some from the next; each field on
//! its own is always consistent.
//!
//! The accumulated `forward_travel`/`lateral_travel` are there for
//! calibrating the pods: push the robot a measured distance and compare.

use std::{sync::Arc, time::Duration};

use log::{debug, info};
use vexide::{sync::Mutex, task::spawn, time::sleep};

use crate::{
    cycle::CycleReport,
    error::SensorFault,
    mechanism::lever::LeverPhase,
    motion::odom::diagonal::AxisDistances,
};

/// How often the reporter task logs.
pub const REPORT_PERIOD: Duration = Duration::from_millis(250);

/// Latest state of the driver loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Telemetry {
    /// Ticks recorded so far.
    pub cycles:         u64,
    /// Sum of forward motion, in inches.
    pub forward_travel: f64,
    /// Sum of lateral motion, in inches.
    pub lateral_travel: f64,
    /// Motion reported by the most recent good pod read.
    pub last_motion:    AxisDistances,
    /// Set while the pods are failing to read.
    pub pod_fault:      Option<SensorFault>,
    /// Lever angle in degrees, if it was readable this tick.
    pub lever_position: Option<f64>,
    pub lever_phase:    LeverPhase,
    pub middle_goal:    bool,
}

impl Telemetry {
    /// Folds one tick into the snapshot.
    pub fn record(
        &mut self,
        report: &CycleReport,
        lever_position: Option<f64>,
        middle_goal: bool,
    ) {
        self.cycles += 1;
        match &report.motion {
            Ok(motion) => {
                if self.pod_fault.take().is_some() {
                    info!("Pods readable again");
                }
                self.forward_travel += motion.forward;
                self.lateral_travel += motion.lateral;
                self.last_motion = *motion;
            }
            Err(fault) => self.pod_fault = Some(fault.clone()),
        }
        self.lever_position = lever_position;
        self.lever_phase = report.lever_phase;
        self.middle_goal = middle_goal;
    }
}

/// Starts a background task that logs `telemetry` every `period`.
pub fn spawn_reporter(telemetry: Arc<Mutex<Telemetry>>, period: Duration) {
    let reporter = spawn(async move {
        loop {
            let snapshot = telemetry.lock().await.clone();
            debug!(
                "fwd {:.2} in, lat {:.2} in, lever {} ({:?}), middle goal {}{}",
                snapshot.forward_travel,
                snapshot.lateral_travel,
                snapshot
                    .lever_position
                    .map_or_else(|| "?".to_string(), |p| format!("{:.1}°", p)),
                snapshot.lever_phase,
                snapshot.middle_goal,
                if snapshot.pod_fault.is_some() { ", pods faulted" } else { "" },
            );
            sleep(period).await;
        }
    });
    reporter.detach();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Channel;

    fn report(motion: Result<AxisDistances, SensorFault>) -> CycleReport {
        CycleReport {
            motion,
            lever: None,
            lever_phase: LeverPhase::Idle,
            middle_goal_changed: None,
            intake_voltage: 0.0,
        }
    }

    #[test]
    fn accumulates_travel() {
        let mut telemetry = Telemetry::default();
        let step = AxisDistances {
            forward: 1.5,
            lateral: -0.25,
        };
        for _ in 0..4 {
            telemetry.record(&report(Ok(step)), Some(10.0), false);
        }
        assert_eq!(telemetry.cycles, 4);
        assert!((telemetry.forward_travel - 6.0).abs() < 1e-12);
        assert!((telemetry.lateral_travel + 1.0).abs() < 1e-12);
        assert_eq!(telemetry.last_motion, step);
        assert_eq!(telemetry.lever_position, Some(10.0));
    }

    #[test]
    fn fault_is_kept_until_recovery() {
        let mut telemetry = Telemetry::default();
        let fault = SensorFault::Unavailable {
            channel: Channel::B,
            reason:  "disconnected".to_string(),
        };
        telemetry.record(&report(Err(fault.clone())), None, true);
        assert_eq!(telemetry.pod_fault, Some(fault));
        assert_eq!(telemetry.forward_travel, 0.0);

        telemetry.record(&report(Ok(AxisDistances::default())), None, true);
        assert_eq!(telemetry.pod_fault, None);
        assert!(telemetry.middle_goal);
    }
}
