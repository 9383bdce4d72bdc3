//! The robot: devices, driver loop state and match lifecycle.
//!
//! [`Robot`] is built once at startup and owns every device the driver loop
//! touches. Nothing is reachable through globals; the loop gets at the
//! hardware only through `&mut Robot`.
//!
//! # Example
//!
//! ```ignore
//! use atlas::{fs::logger, robot::Robot};
//! use log::LevelFilter;
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Info).expect("Failed to initialize logger");
//!
//!     let mut robot = Robot::default_config(peripherals);
//!     robot.init();
//!     robot.compete().await;
//! }
//! ```

use std::{sync::Arc, time::Duration};

use log::{error, info, warn};
use vexide::{
    adi::encoder::AdiOpticalEncoder,
    prelude::{AdiDigitalOut, Compete, Controller, Direction, Gearset, Motor, Peripherals},
    sync::Mutex,
    time::sleep,
};

use crate::{
    config::{
        CYCLE, LEVER_BOOST_DEGREES_PER_SECOND, LeverConfig, TICKS_PER_REVOLUTION, WheelConfig,
    },
    cycle::{ButtonMap, ControlCycle, CycleReport},
    mechanism::{intake, lever},
    motion::odom::{
        devices::{DiagonalPods, PodSensor},
        diagonal::PodSample,
    },
    opcontrol::controller::{is_pressed, read_state},
    telemetry::{REPORT_PERIOD, Telemetry, spawn_reporter},
    to_mutex,
};

/// Tracking offsets of the virtual wheels, in inches.
///
/// The lateral offset of a diagonal pair is `(dx + dy) / √2` of the pod
/// mounting position. Both are zero until measured.
pub const TRACKING_OFFSETS: (f64, f64) = (0.0, 0.0);

/// Every device and all driver loop state.
pub struct Robot {
    pub controller:         Controller,
    pub pods:               DiagonalPods,
    pub lever_motor:        Motor,
    pub intake_motor:       Motor,
    /// Piston driven by the middle goal toggle.
    pub middle_goal_piston: AdiDigitalOut,
    pub cycle:              ControlCycle,
    /// Shared with the reporter task, written once per tick.
    pub telemetry:          Arc<Mutex<Telemetry>>,
    /// Driver loop period.
    pub cadence:            Duration,
}

impl Robot {
    /// Builds the competition robot from its port map.
    ///
    /// - Lever motor on port 8 (green cartridge).
    /// - Intake motor on port 10 (green cartridge).
    /// - Diagonal pods on ADI A/B and C/D.
    /// - Middle goal piston on ADI H.
    pub fn default_config(peripherals: Peripherals) -> Self {
        let pods = DiagonalPods::new(
            PodSensor::new_adi_optical_encoder(AdiOpticalEncoder::new(
                peripherals.adi_a,
                peripherals.adi_b,
            )),
            PodSensor::new_adi_optical_encoder(AdiOpticalEncoder::new(
                peripherals.adi_c,
                peripherals.adi_d,
            )),
            TICKS_PER_REVOLUTION,
        );

        Self {
            controller: peripherals.primary_controller,
            pods,
            lever_motor: Motor::new(peripherals.port_8, Gearset::Green, Direction::Forward),
            intake_motor: Motor::new(peripherals.port_10, Gearset::Green, Direction::Forward),
            middle_goal_piston: AdiDigitalOut::new(peripherals.adi_h),
            cycle: ControlCycle::new(
                WheelConfig::DEFAULT,
                TRACKING_OFFSETS,
                LeverConfig::DEFAULT,
                ButtonMap::DEFAULT,
            ),
            telemetry: to_mutex(Telemetry::default()),
            cadence: CYCLE,
        }
    }

    /// Checks the configuration, tares the pods and the lever, and starts the
    /// reporter task. Call once before [`compete`](vexide::prelude::Compete).
    pub fn init(&mut self) {
        self.check_config();

        match self.pods.reset() {
            Ok(()) => self.cycle.reset_odometry(PodSample::ZERO),
            // The wheels keep their zero baseline and the first good read
            // reports everything since power-on.
            Err(e) => error!("Pod tare failed: {}", e),
        }
        self.lever_motor.reset_position().unwrap_or_else(|e| {
            warn!("Lever Reset Position Error: {}", e);
        });

        spawn_reporter(self.telemetry.clone(), REPORT_PERIOD);
        info!("Robot initialized");
    }

    fn check_config(&self) {
        let wheel = self.cycle.wheels().forward().wheel();
        if let Err(e) = wheel.validate() {
            error!("Pod wheel config: {}", e);
        }
        if wheel.ticks_per_revolution != self.pods.ticks_per_revolution {
            error!(
                "Pods report {} ticks/rev but the wheels expect {}",
                self.pods.ticks_per_revolution, wheel.ticks_per_revolution
            );
        }
        let lever = self.cycle.lever().config();
        if let Err(e) = lever.validate() {
            error!("Lever config: {}", e);
        }
        if let Err(e) = lever.check_cadence(self.cadence, LEVER_BOOST_DEGREES_PER_SECOND) {
            error!("Lever config at {:?} cadence: {}", self.cadence, e);
        }
    }

    /// Runs one driver tick: samples every input once, steps the cycle and
    /// sends the resulting commands.
    pub async fn tick(&mut self) -> CycleReport {
        let state = read_state(&self.controller);
        let pods = self.pods.sample();
        let lever_position = lever::read_position(&self.lever_motor);

        let report = self
            .cycle
            .step(pods, lever_position, |button| is_pressed(&state, button));

        if let Some(command) = report.lever {
            lever::drive(&mut self.lever_motor, command);
        }
        intake::drive(&mut self.intake_motor, report.intake_voltage);
        if report.middle_goal_changed.is_some() {
            self.cycle.middle_goal().apply(&mut self.middle_goal_piston);
        }

        self.telemetry.lock().await.record(
            &report,
            lever_position,
            self.cycle.middle_goal().state(),
        );
        report
    }

    /// The driver control loop. Never returns.
    pub async fn driver_loop(&mut self) {
        info!("Driver control started");
        loop {
            self.tick().await;
            sleep(self.cadence).await;
        }
    }
}

impl Compete for Robot {
    async fn driver(&mut self) { self.driver_loop().await; }
}
