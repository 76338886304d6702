//! Test doubles shared by the unit tests.
//!
//! Every double is a cheap handle on shared state, so a test can hand one clone to the
//! [`Robot`] and keep another to inspect or drive it.

use hw_if::{
    eqpt::{ActuatorPort, Drivetrain, EndEffector, Joint, Trajectory},
    input::OperatorFeedback,
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};
use util::time::Clock;

use crate::{
    action::{Action, Requirements},
    arm_ctrl::{ArmCtrl, ArmCtrlParams},
    robot::Robot,
};

// ------------------------------------------------------------------------------------------------
// ACTUATOR PORT
// ------------------------------------------------------------------------------------------------

/// A command received by a [`RecordingPort`].
#[derive(Debug, Clone, PartialEq)]
pub enum PortCmd {
    Speed(Joint, f64),
    Target(Joint, f64, f64),
    SoftLimits(Joint, bool),
    Reset(Joint, f64),
}

/// Actuator port which records every command and never moves unless told to.
#[derive(Clone)]
pub struct RecordingPort {
    positions: Rc<RefCell<[f64; 2]>>,
    cmds: Rc<RefCell<Vec<PortCmd>>>,
}

impl RecordingPort {
    pub fn new(extension: f64, tilt: f64) -> Self {
        Self {
            positions: Rc::new(RefCell::new([extension, tilt])),
            cmds: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn set_position(&self, joint: Joint, value: f64) {
        self.positions.borrow_mut()[joint as usize] = value;
    }

    pub fn cmds(&self) -> Vec<PortCmd> {
        self.cmds.borrow().clone()
    }

    pub fn take_cmds(&self) -> Vec<PortCmd> {
        self.cmds.borrow_mut().drain(..).collect()
    }
}

impl ActuatorPort for RecordingPort {
    fn set_speed(&mut self, joint: Joint, value: f64) {
        self.cmds.borrow_mut().push(PortCmd::Speed(joint, value));
    }

    fn set_target_position(&mut self, joint: Joint, value: f64, speed_scale: f64) {
        self.cmds
            .borrow_mut()
            .push(PortCmd::Target(joint, value, speed_scale));
    }

    fn get_position(&self, joint: Joint) -> f64 {
        self.positions.borrow()[joint as usize]
    }

    fn set_soft_limits_enabled(&mut self, joint: Joint, enabled: bool) {
        self.cmds
            .borrow_mut()
            .push(PortCmd::SoftLimits(joint, enabled));
    }

    fn reset_position(&mut self, joint: Joint, position: f64) {
        self.set_position(joint, position);
        self.cmds.borrow_mut().push(PortCmd::Reset(joint, position));
    }
}

// ------------------------------------------------------------------------------------------------
// SUCTION
// ------------------------------------------------------------------------------------------------

/// End-effector whose seal and vacuum are set by the test.
#[derive(Clone, Default)]
pub struct TestSuction {
    enabled: Rc<Cell<bool>>,
    seal: Rc<Cell<bool>>,
    min_vacuum: Rc<Cell<bool>>,
}

impl TestSuction {
    pub fn enabled(&self) -> bool {
        self.enabled.get()
    }

    pub fn set_seal(&self, seal: bool) {
        self.seal.set(seal);
    }

    pub fn set_min_vacuum(&self, min_vacuum: bool) {
        self.min_vacuum.set(min_vacuum);
    }
}

impl EndEffector for TestSuction {
    fn enable(&mut self) {
        self.enabled.set(true);
    }

    fn disable(&mut self) {
        self.enabled.set(false);
    }

    fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    fn has_vacuum_seal(&self) -> bool {
        self.seal.get()
    }

    fn has_min_vacuum(&self) -> bool {
        self.min_vacuum.get()
    }
}

// ------------------------------------------------------------------------------------------------
// DRIVE
// ------------------------------------------------------------------------------------------------

#[derive(Default)]
pub struct TestDriveState {
    /// Trajectories started, with their reset pose flag
    pub started: Vec<(String, bool)>,
    pub complete: bool,
    pub num_stops: u32,
    pub num_zero_heading: u32,
}

/// Drivetrain whose trajectory completion is set by the test.
#[derive(Clone, Default)]
pub struct TestDrive(pub Rc<RefCell<TestDriveState>>);

impl TestDrive {
    pub fn set_complete(&self, complete: bool) {
        self.0.borrow_mut().complete = complete;
    }
}

impl Drivetrain for TestDrive {
    fn start_trajectory(&mut self, trajectory: &Trajectory, reset_pose: bool) {
        let mut s = self.0.borrow_mut();
        s.started.push((trajectory.name.clone(), reset_pose));
        s.complete = false;
    }

    fn is_trajectory_complete(&self) -> bool {
        self.0.borrow().complete
    }

    fn stop(&mut self) {
        self.0.borrow_mut().num_stops += 1;
    }

    fn zero_heading(&mut self) {
        self.0.borrow_mut().num_zero_heading += 1;
    }
}

// ------------------------------------------------------------------------------------------------
// FEEDBACK
// ------------------------------------------------------------------------------------------------

/// Feedback sink recording every rumble strength set.
#[derive(Clone, Default)]
pub struct TestFeedback(Rc<RefCell<Vec<f64>>>);

impl TestFeedback {
    pub fn history(&self) -> Vec<f64> {
        self.0.borrow().clone()
    }
}

impl OperatorFeedback for TestFeedback {
    fn set_rumble(&mut self, strength: f64) {
        self.0.borrow_mut().push(strength);
    }
}

// ------------------------------------------------------------------------------------------------
// RIG
// ------------------------------------------------------------------------------------------------

/// A robot built from test doubles, with handles on each double.
pub struct TestRig {
    pub robot: Robot,
    pub port: RecordingPort,
    pub suction: TestSuction,
    pub drive: TestDrive,
    pub feedback: TestFeedback,
}

impl TestRig {
    /// Robot with the arm at the given positions, default parameters and a 20 ms clock.
    pub fn new(extension: f64, tilt: f64) -> Self {
        Self::with_params(extension, tilt, ArmCtrlParams::default())
    }

    pub fn with_params(extension: f64, tilt: f64, params: ArmCtrlParams) -> Self {
        let port = RecordingPort::new(extension, tilt);
        let suction = TestSuction::default();
        let drive = TestDrive::default();
        let feedback = TestFeedback::default();

        let robot = Robot::new(
            ArmCtrl::new(Box::new(port.clone()), params),
            Box::new(suction.clone()),
            Box::new(drive.clone()),
            Box::new(feedback.clone()),
            Clock::new(Duration::from_millis(20)),
        );

        Self {
            robot,
            port,
            suction,
            drive,
            feedback,
        }
    }

    /// Advance the clock by one cycle.
    pub fn tick(&mut self) {
        self.robot.clock.advance();
        self.robot.arm.cycle_start();
    }
}

// ------------------------------------------------------------------------------------------------
// PROBE ACTION
// ------------------------------------------------------------------------------------------------

thread_local! {
    static EXEC_SEQ: Cell<u64> = Cell::new(0);
}

/// Lifecycle call counts of a [`Probe`].
#[derive(Default)]
pub struct ProbeCounts {
    init: Cell<u32>,
    exec: Cell<u32>,
    end_normal: Cell<u32>,
    end_interrupted: Cell<u32>,
    first_exec_seq: Cell<Option<u64>>,
}

impl ProbeCounts {
    pub fn init(&self) -> u32 {
        self.init.get()
    }

    pub fn exec(&self) -> u32 {
        self.exec.get()
    }

    /// Number of (normal, interrupted) ends.
    pub fn ends(&self) -> (u32, u32) {
        (self.end_normal.get(), self.end_interrupted.get())
    }

    /// Position of this probe's first execute among all probe executes on this thread.
    pub fn first_exec_seq(&self) -> u64 {
        self.first_exec_seq.get().unwrap_or(u64::MAX)
    }
}

/// Action which counts its lifecycle calls.
pub struct Probe {
    name: String,
    requirements: Requirements,
    finish_after: Option<u32>,
    counts: Rc<ProbeCounts>,
}

impl Probe {
    /// Probe which finishes once it has been executed `n` times.
    pub fn finishing_after(name: &str, n: u32) -> (Self, Rc<ProbeCounts>) {
        Self::build(name, Requirements::none(), Some(n))
    }

    pub fn never_finishing(name: &str) -> (Self, Rc<ProbeCounts>) {
        Self::build(name, Requirements::none(), None)
    }

    /// Never finishing probe with requirements.
    pub fn with_requirements(name: &str, requirements: Requirements) -> (Self, Rc<ProbeCounts>) {
        Self::build(name, requirements, None)
    }

    fn build(
        name: &str,
        requirements: Requirements,
        finish_after: Option<u32>,
    ) -> (Self, Rc<ProbeCounts>) {
        let counts = Rc::new(ProbeCounts::default());
        (
            Self {
                name: String::from(name),
                requirements,
                finish_after,
                counts: counts.clone(),
            },
            counts,
        )
    }
}

impl Action for Probe {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements
    }

    fn initialize(&mut self, _robot: &mut Robot) {
        self.counts.init.set(self.counts.init.get() + 1);
    }

    fn execute(&mut self, _robot: &mut Robot) {
        self.counts.exec.set(self.counts.exec.get() + 1);
        if self.counts.first_exec_seq.get().is_none() {
            let seq = EXEC_SEQ.with(|s| {
                s.set(s.get() + 1);
                s.get()
            });
            self.counts.first_exec_seq.set(Some(seq));
        }
    }

    fn is_finished(&self, _robot: &Robot) -> bool {
        match self.finish_after {
            Some(n) => self.counts.exec.get() >= n,
            None => false,
        }
    }

    fn end(&mut self, _robot: &mut Robot, interrupted: bool) {
        if interrupted {
            self.counts
                .end_interrupted
                .set(self.counts.end_interrupted.get() + 1);
        } else {
            self.counts.end_normal.set(self.counts.end_normal.get() + 1);
        }
    }
}
