//! # Data Store

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::info;
use std::time::Duration;
use util::{
    archive::{Archived, Archiver},
    time::seconds_to_duration,
};

use crate::{
    action::{Action, ActionId, Scheduler},
    arm_ctrl::StatusReport,
    bindings::Bindings,
    robot::{Robot, RobotMode},
    tm::ArmTm,
};

// ------------------------------------------------------------------------------------------------
// DATA STRUCTURES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable.
pub struct DataStore {
    pub robot: Robot,

    pub scheduler: Scheduler,

    /// Bindings polled while in teleop
    pub bindings: Bindings,

    // Autonomy
    /// The autonomous routine, if one was started and is still running
    pub auto_action: Option<ActionId>,

    /// Clock time at which the autonomous period ends
    pub auto_end: Option<Duration>,

    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u64,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Arm status report from the previous cycle
    pub arm_status_rpt: StatusReport,

    /// Telemetry of the last completed cycle
    pub arm_tm: Option<ArmTm>,

    pub arch_arm_tm: Archiver,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DataStore {
    pub fn new(robot: Robot, bindings: Bindings) -> Self {
        Self {
            robot,
            scheduler: Scheduler::new(),
            bindings,
            auto_action: None,
            auto_end: None,
            num_cycles: 0,
            is_1_hz_cycle: false,
            arm_status_rpt: StatusReport::default(),
            arm_tm: None,
            arch_arm_tm: Archiver::default(),
            num_consec_cycle_overruns: 0,
        }
    }

    /// Perform actions required at the start of a cycle.
    ///
    /// Advances the clock, clears the arm status report and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self) {
        self.robot.clock.advance();
        self.num_cycles = self.robot.clock.num_cycles();

        let cycles_per_second = (1.0 / self.robot.clock.period().as_secs_f64()).round() as u64;
        self.is_1_hz_cycle = self.num_cycles % cycles_per_second.max(1) == 0;

        self.arm_status_rpt = self.robot.arm.cycle_start();
    }

    /// Handle mode transitions due this cycle, ending the autonomous period once its time is up.
    pub fn proc_mode(&mut self) {
        if let Some(end) = self.auto_end {
            if self.robot.mode == RobotMode::Autonomous && self.robot.clock.now() >= end {
                info!("Autonomous period over");
                self.set_mode(RobotMode::Disabled);
            }
        }
    }

    /// Change the robot's operating mode.
    ///
    /// Every active action is cancelled and the bindings are reset, so nothing carries over from
    /// one mode into the next. Entering `Disabled` also makes the robot safe.
    pub fn set_mode(&mut self, mode: RobotMode) {
        if mode == self.robot.mode {
            return;
        }

        info!("Mode change {} -> {}", self.robot.mode, mode);

        self.scheduler.cancel_all(&mut self.robot);
        self.bindings.reset();
        self.auto_action = None;
        self.auto_end = None;
        self.robot.mode = mode;

        if mode == RobotMode::Disabled {
            self.robot.make_safe();
        }
    }

    /// Enter autonomous and schedule the routine, which is cancelled after `period_s` seconds.
    ///
    /// With no routine the robot sits idle in autonomous for the period.
    pub fn start_auto(&mut self, routine: Option<Box<dyn Action>>, period_s: f64) {
        self.set_mode(RobotMode::Autonomous);

        self.auto_end = Some(self.robot.clock.now() + seconds_to_duration(period_s));
        match routine {
            Some(r) => self.auto_action = Some(self.scheduler.schedule(r, &mut self.robot)),
            None => info!("No autonomous routine"),
        }
    }

    /// True while the autonomous routine is still scheduled.
    pub fn is_auto_running(&self) -> bool {
        match self.auto_action {
            Some(id) => self.scheduler.is_scheduled(id),
            None => false,
        }
    }

    /// Poll the bindings (in teleop) and run one scheduler cycle.
    pub fn proc_actions(&mut self) {
        match self.robot.mode {
            RobotMode::Disabled => (),
            RobotMode::Autonomous => self.scheduler.run_cycle(&mut self.robot),
            RobotMode::Teleop => {
                self.bindings.poll(&mut self.robot, &mut self.scheduler);
                self.scheduler.run_cycle(&mut self.robot);
            }
        }
    }

    /// Build the telemetry frame for the cycle just processed.
    pub fn cycle_end(&mut self) {
        self.arm_tm = Some(ArmTm::from_robot(&self.robot, &self.scheduler));
    }
}

impl Archived for DataStore {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref tm) = self.arm_tm {
            self.arch_arm_tm.serialise(tm)?;
        }
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
