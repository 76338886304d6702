//! # Primitive actions
//!
//! The smallest schedulable units. Every primitive which moves the arm goes through
//! [`ArmCtrl`](crate::arm_ctrl::ArmCtrl), so the interlock is consulted on every cycle it runs.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::Joint;
use log::debug;
use util::time::Timer;

use super::{Action, Requirements, Subsystem};
use crate::robot::Robot;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// Source of a value read from the robot every cycle.
pub type RobotFn<T> = Box<dyn Fn(&Robot) -> T>;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// What a [`SuctionCmd`] does to the end-effector.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SuctionDem {
    Enable,
    Disable,
    Toggle,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Run a joint open loop at a speed read every cycle. Never finishes on its own.
pub struct RunJointAtSpeed {
    name: String,
    joint: Joint,
    speed: RobotFn<f64>,
}

/// Drive a joint closed loop to a target position. Finishes once within tolerance.
pub struct DriveJointToPosition {
    name: String,
    joint: Joint,
    speed_scale: f64,
    target: f64,
}

/// Set the suction state. Finishes immediately.
pub struct SuctionCmd {
    name: String,
    dem: SuctionDem,
}

/// Finishes once the given time has elapsed since activation.
pub struct WaitForDuration {
    name: String,
    duration_s: f64,
    timer: Timer,
}

/// Finishes once the predicate holds. The predicate is polled once per cycle.
pub struct WaitUntil {
    name: String,
    predicate: RobotFn<bool>,
}

/// Run a function once on activation. Finishes immediately.
pub struct Instant {
    name: String,
    requirements: Requirements,
    func: Box<dyn FnMut(&mut Robot)>,
}

/// Drive a joint onto its reverse stop with the soft limits disabled, re-zeroing it on release.
///
/// This is the only motion not gated by the interlock, so it can recover an arm left low and
/// extended. Runs until interrupted, normally by the operator releasing the override button.
pub struct JointOverride {
    name: String,
    joint: Joint,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl RunJointAtSpeed {
    pub fn new<F>(joint: Joint, speed: F) -> Self
    where
        F: Fn(&Robot) -> f64 + 'static,
    {
        Self {
            name: format!("Run{}", joint),
            joint,
            speed: Box::new(speed),
        }
    }
}

impl Action for RunJointAtSpeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        Requirements::none().with(Subsystem::from(self.joint))
    }

    fn execute(&mut self, robot: &mut Robot) {
        let speed = (self.speed)(robot);
        robot.arm.run(self.joint, speed);
    }

    fn is_finished(&self, _robot: &Robot) -> bool {
        false
    }

    fn end(&mut self, robot: &mut Robot, _interrupted: bool) {
        robot.arm.stop(self.joint);
    }
}

impl DriveJointToPosition {
    pub fn new(joint: Joint, speed_scale: f64, target: f64) -> Self {
        let verb = match joint {
            Joint::Extension => "Extend",
            Joint::Tilt => "Tilt",
        };
        Self {
            name: format!("{}To({:.2})", verb, target),
            joint,
            speed_scale,
            target,
        }
    }

    pub fn target(&self) -> f64 {
        self.target
    }
}

impl Action for DriveJointToPosition {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        Requirements::none().with(Subsystem::from(self.joint))
    }

    fn execute(&mut self, robot: &mut Robot) {
        robot.arm.drive_to(self.joint, self.target, self.speed_scale);
    }

    fn is_finished(&self, robot: &Robot) -> bool {
        robot.arm.is_at(self.joint, self.target)
    }

    fn end(&mut self, robot: &mut Robot, _interrupted: bool) {
        robot.arm.stop(self.joint);
    }
}

impl SuctionCmd {
    pub fn enable() -> Self {
        Self::new(SuctionDem::Enable)
    }

    pub fn disable() -> Self {
        Self::new(SuctionDem::Disable)
    }

    pub fn toggle() -> Self {
        Self::new(SuctionDem::Toggle)
    }

    fn new(dem: SuctionDem) -> Self {
        Self {
            name: format!("{:?}Suction", dem),
            dem,
        }
    }
}

impl Action for SuctionCmd {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        Requirements::none().with(Subsystem::Suction)
    }

    fn initialize(&mut self, robot: &mut Robot) {
        let enable = match self.dem {
            SuctionDem::Enable => true,
            SuctionDem::Disable => false,
            SuctionDem::Toggle => !robot.suction.is_enabled(),
        };

        if enable {
            robot.suction.enable();
        } else {
            robot.suction.disable();
        }
        debug!("Suction {}", if enable { "enabled" } else { "disabled" });
    }

    fn is_finished(&self, _robot: &Robot) -> bool {
        true
    }
}

impl WaitForDuration {
    pub fn new(duration_s: f64) -> Self {
        Self {
            name: format!("Wait({:.2}s)", duration_s),
            duration_s,
            timer: Timer::default(),
        }
    }
}

impl Action for WaitForDuration {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, robot: &mut Robot) {
        self.timer.start(&robot.clock);
    }

    fn is_finished(&self, robot: &Robot) -> bool {
        self.timer.has_elapsed(&robot.clock, self.duration_s)
    }

    fn end(&mut self, _robot: &mut Robot, _interrupted: bool) {
        self.timer.stop();
    }
}

impl WaitUntil {
    pub fn new<F>(name: &str, predicate: F) -> Self
    where
        F: Fn(&Robot) -> bool + 'static,
    {
        Self {
            name: format!("WaitUntil({})", name),
            predicate: Box::new(predicate),
        }
    }
}

impl Action for WaitUntil {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_finished(&self, robot: &Robot) -> bool {
        (self.predicate)(robot)
    }
}

impl Instant {
    pub fn new<F>(name: &str, requirements: Requirements, func: F) -> Self
    where
        F: FnMut(&mut Robot) + 'static,
    {
        Self {
            name: String::from(name),
            requirements,
            func: Box::new(func),
        }
    }
}

impl Action for Instant {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        self.requirements
    }

    fn initialize(&mut self, robot: &mut Robot) {
        (self.func)(robot);
    }

    fn is_finished(&self, _robot: &Robot) -> bool {
        true
    }
}

impl JointOverride {
    pub fn new(joint: Joint) -> Self {
        Self {
            name: format!("{}Override", joint),
            joint,
        }
    }
}

impl Action for JointOverride {
    fn name(&self) -> &str {
        &self.name
    }

    fn requirements(&self) -> Requirements {
        Requirements::none().with(Subsystem::from(self.joint))
    }

    fn initialize(&mut self, robot: &mut Robot) {
        robot.arm.set_soft_limits_enabled(self.joint, false);
    }

    fn execute(&mut self, robot: &mut Robot) {
        let speed = -robot.arm.params().override_speed.abs();
        robot.arm.run_overriding_interlock(self.joint, speed);
    }

    fn is_finished(&self, _robot: &Robot) -> bool {
        false
    }

    fn end(&mut self, robot: &mut Robot, _interrupted: bool) {
        robot.arm.stop(self.joint);
        let zero = robot.arm.params().override_zero_pos_in;
        robot.arm.reset_position(self.joint, zero);
        robot.arm.set_soft_limits_enabled(self.joint, true);
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
