//! The driver control cycle.
//!
//! [`ControlCycle`] holds every piece of state the driver loop mutates and
//! advances it by one tick from inputs that were each sampled once. The
//! hardware reads and the commands it returns are handled by
//! [`Robot`](crate::robot::Robot); keeping them out of here lets the whole
//! cycle run on the host in tests.
//!
//! Per tick, in order:
//!
//! 1. The pod sample goes to the virtual wheels.
//! 2. The trigger buttons go through their edge detectors.
//! 3. The lever sequencer steps with the middle goal mode as it stood at the
//!    start of the tick.
//! 4. The middle goal button updates its toggle.
//! 5. The intake follows its button.

use log::debug;

use crate::{
    config::{LeverConfig, WheelConfig},
    error::SensorFault,
    mechanism::{
        intake::Intake,
        lever::{LeverCommand, LeverPhase, LeverSequencer},
    },
    motion::odom::diagonal::{AxisDistances, PodSample, VirtualWheels},
    opcontrol::{
        controller::{ControllerButton, TriggerSet},
        toggle::AuxToggle,
    },
};

/// Button assignments for the driver cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMap {
    /// Either of these starts a lever cycle.
    pub lever_triggers: [ControllerButton; 2],
    /// Flips the middle goal mode.
    pub middle_goal:    ControllerButton,
    /// Runs the intake while held.
    pub intake:         ControllerButton,
}

impl ButtonMap {
    pub const DEFAULT: Self = Self {
        lever_triggers: [ControllerButton::ButtonR1, ControllerButton::ButtonR2],
        middle_goal:    ControllerButton::ButtonB,
        intake:         ControllerButton::ButtonL1,
    };
}

impl Default for ButtonMap {
    fn default() -> Self { Self::DEFAULT }
}

/// What one tick decided.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Motion along the robot axes, or why it is unknown this tick.
    pub motion:              Result<AxisDistances, SensorFault>,
    /// Command for the lever motor. `None` when the lever angle could not be
    /// read, in which case the motor keeps its previous target.
    pub lever:               Option<LeverCommand>,
    /// Lever phase after the tick.
    pub lever_phase:         LeverPhase,
    /// The new middle goal state, if it changed this tick.
    pub middle_goal_changed: Option<bool>,
    /// Voltage for the intake motor.
    pub intake_voltage:      f64,
}

/// All state owned by the driver loop.
#[derive(Debug, Clone)]
pub struct ControlCycle {
    wheels:      VirtualWheels,
    triggers:    TriggerSet,
    lever:       LeverSequencer,
    middle_goal: AuxToggle,
    intake:      Intake,
    buttons:     ButtonMap,
}

impl ControlCycle {
    /// Creates the cycle state with the lever idle and the middle goal off.
    ///
    /// # Arguments
    ///
    /// * `wheel` - Pod wheel geometry.
    /// * `offsets` - Forward and lateral tracking offsets, in inches.
    /// * `lever` - Lever limits and speeds.
    /// * `buttons` - Controller button assignments.
    pub fn new(
        wheel: WheelConfig,
        offsets: (f64, f64),
        lever: LeverConfig,
        buttons: ButtonMap,
    ) -> Self {
        Self {
            wheels: VirtualWheels::new(wheel, offsets.0, offsets.1),
            triggers: TriggerSet::new(&buttons.lever_triggers),
            lever: LeverSequencer::new(lever),
            middle_goal: AuxToggle::new(false),
            intake: Intake::DEFAULT,
            buttons,
        }
    }

    /// Advances one tick.
    ///
    /// # Arguments
    ///
    /// * `pods` - This tick's single read of the diagonal pods.
    /// * `lever_position` - This tick's lever angle in degrees, if readable.
    /// * `pressed` - Button states from this tick's controller snapshot.
    pub fn step(
        &mut self,
        pods: Result<PodSample, SensorFault>,
        lever_position: Option<f64>,
        pressed: impl Fn(ControllerButton) -> bool,
    ) -> CycleReport {
        let motion = self.wheels.update(pods);

        let triggered = self.triggers.poll(&pressed);
        let middle_goal = self.middle_goal.state();
        let lever = match lever_position {
            Some(position) => Some(self.lever.step(triggered, position, middle_goal)),
            None => {
                if triggered {
                    self.lever.trigger();
                }
                None
            }
        };

        let middle_goal_changed = self.middle_goal.update(pressed(self.buttons.middle_goal));
        let intake_voltage = self.intake.voltage(pressed(self.buttons.intake));

        if let Some(command) = lever {
            debug!(
                "Lever {:?} -> {:.1}° at {}",
                self.lever.phase(),
                command.target,
                command.speed
            );
        }

        CycleReport {
            motion,
            lever,
            lever_phase: self.lever.phase(),
            middle_goal_changed,
            intake_voltage,
        }
    }

    /// Re-baselines the virtual wheels, e.g. after the pods are tared.
    pub fn reset_odometry(&mut self, sample: PodSample) { self.wheels.reset(sample); }

    pub fn wheels(&self) -> &VirtualWheels { &self.wheels }

    pub fn lever(&self) -> &LeverSequencer { &self.lever }

    pub fn middle_goal(&self) -> &AuxToggle { &self.middle_goal }

    pub fn buttons(&self) -> ButtonMap { self.buttons }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{
            INTAKE_VOLTAGE_ACTIVE, INTAKE_VOLTAGE_IDLE, LEVER_SPEED_BOOST, LEVER_SPEED_FAST,
            LEVER_SPEED_HOLD, LEVER_SPEED_SLOW,
        },
        error::Channel,
    };

    fn cycle() -> ControlCycle {
        ControlCycle::new(
            WheelConfig::DEFAULT,
            (0.0, 0.0),
            LeverConfig::DEFAULT,
            ButtonMap::DEFAULT,
        )
    }

    fn none(_: ControllerButton) -> bool { false }

    fn only(button: ControllerButton) -> impl Fn(ControllerButton) -> bool {
        move |b| b == button
    }

    #[test]
    fn idle_cycle_holds_lever() {
        let mut cycle = cycle();
        let report = cycle.step(Ok(PodSample::ZERO), Some(12.0), none);
        assert_eq!(report.motion, Ok(AxisDistances::default()));
        assert_eq!(
            report.lever,
            Some(LeverCommand {
                target: 12.0,
                speed:  LEVER_SPEED_HOLD,
            })
        );
        assert_eq!(report.lever_phase, LeverPhase::Idle);
        assert_eq!(report.middle_goal_changed, None);
        assert_eq!(report.intake_voltage, 0.0);
    }

    #[test]
    fn intake_runs_while_held() {
        let mut cycle = cycle();
        let intake = only(cycle.buttons().intake);
        for _ in 0..3 {
            let report = cycle.step(Ok(PodSample::ZERO), Some(0.0), &intake);
            assert_eq!(report.intake_voltage, INTAKE_VOLTAGE_ACTIVE);
            assert_eq!(report.lever_phase, LeverPhase::Idle);
        }
        let report = cycle.step(Ok(PodSample::ZERO), Some(0.0), none);
        assert_eq!(report.intake_voltage, INTAKE_VOLTAGE_IDLE);
    }

    #[test]
    fn held_trigger_runs_one_cycle() {
        let mut cycle = cycle();
        let r1 = only(ControllerButton::ButtonR1);

        let report = cycle.step(Ok(PodSample::ZERO), Some(0.0), &r1);
        assert_eq!(report.lever_phase, LeverPhase::Extending);
        cycle.step(Ok(PodSample::ZERO), Some(269.0), &r1);
        assert_eq!(cycle.lever().phase(), LeverPhase::Retracting);
        cycle.step(Ok(PodSample::ZERO), Some(1.0), &r1);
        assert_eq!(cycle.lever().phase(), LeverPhase::Idle);

        // R1 was never released, so it does not start another cycle.
        let report = cycle.step(Ok(PodSample::ZERO), Some(0.0), &r1);
        assert_eq!(report.lever_phase, LeverPhase::Idle);

        cycle.step(Ok(PodSample::ZERO), Some(0.0), none);
        let report = cycle.step(Ok(PodSample::ZERO), Some(0.0), &r1);
        assert_eq!(report.lever_phase, LeverPhase::Extending);
    }

    #[test]
    fn middle_goal_applies_from_next_tick() {
        let mut cycle = cycle();
        cycle.step(Ok(PodSample::ZERO), Some(0.0), only(ControllerButton::ButtonR2));
        let report = cycle.step(
            Ok(PodSample::ZERO),
            Some(100.0),
            only(ControllerButton::ButtonB),
        );
        assert_eq!(report.middle_goal_changed, Some(true));
        assert_eq!(report.lever.map(|c| c.speed), Some(LEVER_SPEED_SLOW));

        let report = cycle.step(Ok(PodSample::ZERO), Some(100.0), none);
        assert_eq!(report.lever.map(|c| c.speed), Some(LEVER_SPEED_FAST));
        assert!(cycle.middle_goal().state());
    }

    #[test]
    fn pod_fault_does_not_stop_lever() {
        let mut cycle = cycle();
        let fault = SensorFault::Unavailable {
            channel: Channel::A,
            reason:  "disconnected".to_string(),
        };
        let report = cycle.step(
            Err(fault.clone()),
            Some(0.0),
            only(ControllerButton::ButtonR1),
        );
        assert_eq!(report.motion, Err(fault));
        assert_eq!(report.lever.map(|c| c.speed), Some(LEVER_SPEED_BOOST));
    }

    #[test]
    fn unreadable_lever_skips_command_but_keeps_trigger() {
        let mut cycle = cycle();
        let report = cycle.step(Ok(PodSample::ZERO), None, only(ControllerButton::ButtonR1));
        assert_eq!(report.lever, None);
        assert_eq!(report.lever_phase, LeverPhase::Extending);

        let report = cycle.step(Ok(PodSample::ZERO), Some(50.0), none);
        assert_eq!(report.lever.map(|c| c.target), Some(270.0));
    }

    #[test]
    fn both_axes_see_the_same_sample() {
        let mut cycle = cycle();
        cycle.step(Ok(PodSample::new(300, -300)), Some(0.0), none);
        assert_eq!(cycle.wheels().forward().last(), PodSample::new(300, -300));
        assert_eq!(cycle.wheels().lateral().last(), PodSample::new(300, -300));

        cycle.reset_odometry(PodSample::ZERO);
        let report = cycle.step(Ok(PodSample::ZERO), Some(0.0), none);
        assert_eq!(report.motion, Ok(AxisDistances::default()));
    }
}
