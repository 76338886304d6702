//! Implementations for the ArmCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::{Deserialize, Serialize};

// Internal
use super::{interlock, ArmCtrlParams};
use hw_if::eqpt::{ActuatorPort, Joint, JointDem};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Arm control module state
pub struct ArmCtrl {
    pub(crate) params: ArmCtrlParams,

    port: Box<dyn ActuatorPort>,

    report: StatusReport,

    prev_report: StatusReport,
}

/// Status report for ArmCtrl processing.
///
/// Accumulated over one control cycle and cleared by [`ArmCtrl::cycle_start`].
#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug, PartialEq)]
pub struct StatusReport {
    /// A demand on the extension was vetoed by the interlock this cycle
    pub extension_vetoed: bool,

    /// A demand on the tilt was vetoed by the interlock this cycle
    pub tilt_vetoed: bool,

    /// Number of demands issued to the port this cycle
    pub num_dems: u32,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ArmCtrl {
    /// Create a new arm controller driving the given port.
    pub fn new(port: Box<dyn ActuatorPort>, params: ArmCtrlParams) -> Self {
        Self {
            params,
            port,
            report: StatusReport::default(),
            prev_report: StatusReport::default(),
        }
    }

    pub fn params(&self) -> &ArmCtrlParams {
        &self.params
    }

    /// Clear the status report ready for a new cycle, returning the previous cycle's report.
    pub fn cycle_start(&mut self) -> StatusReport {
        self.prev_report = self.report;
        self.report = StatusReport::default();
        self.prev_report
    }

    /// The status report accumulated so far this cycle.
    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    /// Current position of a joint.
    pub fn position(&self, joint: Joint) -> f64 {
        self.port.get_position(joint)
    }

    /// True if the extension may currently be driven.
    pub fn is_extend_safe(&self) -> bool {
        interlock::is_extend_safe(self.position(Joint::Tilt), &self.params)
    }

    /// True if the tilt may currently be driven.
    pub fn is_tilt_safe(&self) -> bool {
        interlock::is_tilt_safe(
            self.position(Joint::Extension),
            self.position(Joint::Tilt),
            &self.params,
        )
    }

    /// True if the joint is within the arrival tolerance of the target.
    pub fn is_at(&self, joint: Joint, target: f64) -> bool {
        util::maths::within(self.position(joint), target, self.params.arrival_tolerance_in)
    }

    /// Run the joint open loop at the given speed, unless vetoed by the interlock.
    ///
    /// Returns `true` if the demand was issued unchanged.
    pub fn run(&mut self, joint: Joint, speed: f64) -> bool {
        self.demand(joint, JointDem::Speed(speed))
    }

    /// Drive the joint to the given position, unless vetoed by the interlock.
    ///
    /// Returns `true` if the demand was issued unchanged.
    pub fn drive_to(&mut self, joint: Joint, target: f64, speed_scale: f64) -> bool {
        self.demand(
            joint,
            JointDem::Position {
                target,
                speed_scale,
            },
        )
    }

    /// Run the joint open loop at the given speed without consulting the interlock.
    ///
    /// Only for the soft-limit override, which is how an operator recovers the arm from an unsafe
    /// position.
    pub fn run_overriding_interlock(&mut self, joint: Joint, speed: f64) {
        let ext = self.position(Joint::Extension);
        let tilt = self.position(Joint::Tilt);
        trace!(
            "{} override at {:.2} (ext {:.2}, tilt {:.2})",
            joint,
            speed,
            ext,
            tilt
        );
        self.issue(joint, JointDem::Speed(speed));
    }

    /// Command zero speed on the joint. Never vetoed.
    pub fn stop(&mut self, joint: Joint) {
        self.issue(joint, JointDem::Speed(0.0));
    }

    pub fn set_soft_limits_enabled(&mut self, joint: Joint, enabled: bool) {
        debug!(
            "{} soft limits {}",
            joint,
            if enabled { "enabled" } else { "disabled" }
        );
        self.port.set_soft_limits_enabled(joint, enabled);
    }

    /// Re-zero the joint's position sensor to the given position.
    pub fn reset_position(&mut self, joint: Joint, position: f64) {
        debug!("{} position reset to {:.2}", joint, position);
        self.port.reset_position(joint, position);
    }

    /// Gate a demand through the interlock and issue it, or a zero speed demand if vetoed.
    fn demand(&mut self, joint: Joint, dem: JointDem) -> bool {
        let ext = self.position(Joint::Extension);
        let tilt = self.position(Joint::Tilt);

        if interlock::is_permitted(joint, &dem, ext, tilt, &self.params) {
            self.issue(joint, dem);
            return true;
        }

        // Only the first veto of a run is worth a debug message, the rest are telemetry
        let already_vetoed = self.prev_report.is_vetoed(joint) || self.report.is_vetoed(joint);
        if already_vetoed {
            trace!("{} demand {:?} vetoed (ext {:.2}, tilt {:.2})", joint, dem, ext, tilt);
        } else {
            debug!("{} demand {:?} vetoed (ext {:.2}, tilt {:.2})", joint, dem, ext, tilt);
        }

        match joint {
            Joint::Extension => self.report.extension_vetoed = true,
            Joint::Tilt => self.report.tilt_vetoed = true,
        }

        self.issue(joint, JointDem::Speed(0.0));
        false
    }

    fn issue(&mut self, joint: Joint, dem: JointDem) {
        match dem {
            JointDem::Speed(s) => self.port.set_speed(joint, s),
            JointDem::Position {
                target,
                speed_scale,
            } => self.port.set_target_position(joint, target, speed_scale),
        }
        self.report.num_dems += 1;
    }
}

impl StatusReport {
    pub fn is_vetoed(&self, joint: Joint) -> bool {
        match joint {
            Joint::Extension => self.extension_vetoed,
            Joint::Tilt => self.tilt_vetoed,
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::{PortCmd, RecordingPort};

    #[test]
    fn test_low_and_extended_holds_both_joints() {
        let port = RecordingPort::new(3.0, 5.0);
        let mut arm = ArmCtrl::new(Box::new(port.clone()), ArmCtrlParams::default());

        assert!(!arm.is_extend_safe());
        assert!(!arm.is_tilt_safe());

        assert!(!arm.run(Joint::Extension, 0.8));
        assert!(!arm.run(Joint::Tilt, -0.8));

        assert_eq!(
            port.cmds(),
            vec![
                PortCmd::Speed(Joint::Extension, 0.0),
                PortCmd::Speed(Joint::Tilt, 0.0)
            ]
        );
        assert!(arm.report().extension_vetoed);
        assert!(arm.report().tilt_vetoed);
        assert_eq!(arm.report().num_dems, 2);
    }

    #[test]
    fn test_low_and_extended_holds_recovery_moves() {
        let port = RecordingPort::new(3.0, 5.0);
        let mut arm = ArmCtrl::new(Box::new(port.clone()), ArmCtrlParams::default());

        assert!(!arm.run(Joint::Extension, -0.5));
        assert!(!arm.run(Joint::Tilt, 0.5));
        assert!(!arm.drive_to(Joint::Extension, 0.0, 1.0));
        assert!(!arm.drive_to(Joint::Tilt, 12.0, 0.5));

        assert_eq!(
            port.cmds(),
            vec![
                PortCmd::Speed(Joint::Extension, 0.0),
                PortCmd::Speed(Joint::Tilt, 0.0),
                PortCmd::Speed(Joint::Extension, 0.0),
                PortCmd::Speed(Joint::Tilt, 0.0)
            ]
        );
        assert!(arm.report().extension_vetoed);
        assert!(arm.report().tilt_vetoed);
    }

    #[test]
    fn test_override_bypasses_interlock() {
        let port = RecordingPort::new(3.0, 5.0);
        let mut arm = ArmCtrl::new(Box::new(port.clone()), ArmCtrlParams::default());

        arm.run_overriding_interlock(Joint::Extension, -0.2);

        assert_eq!(port.cmds(), vec![PortCmd::Speed(Joint::Extension, -0.2)]);
        assert_eq!(*arm.report(), StatusReport { num_dems: 1, ..Default::default() });
    }

    #[test]
    fn test_stop_never_vetoed() {
        let port = RecordingPort::new(3.0, 5.0);
        let mut arm = ArmCtrl::new(Box::new(port.clone()), ArmCtrlParams::default());

        assert!(arm.run(Joint::Tilt, 0.0));
        arm.stop(Joint::Extension);

        assert_eq!(
            port.cmds(),
            vec![
                PortCmd::Speed(Joint::Tilt, 0.0),
                PortCmd::Speed(Joint::Extension, 0.0)
            ]
        );
        assert!(!arm.report().tilt_vetoed);
        assert!(!arm.report().extension_vetoed);
    }

    #[test]
    fn test_safe_envelope() {
        let port = RecordingPort::new(0.0, 12.0);
        let mut arm = ArmCtrl::new(Box::new(port.clone()), ArmCtrlParams::default());

        assert!(arm.drive_to(Joint::Extension, 27.5, 1.0));
        assert!(arm.run(Joint::Tilt, -1.0));
        assert!(!arm.report().extension_vetoed);
        assert!(!arm.report().tilt_vetoed);
    }

    #[test]
    fn test_cycle_start() {
        let port = RecordingPort::new(3.0, 5.0);
        let mut arm = ArmCtrl::new(Box::new(port), ArmCtrlParams::default());

        arm.run(Joint::Extension, 1.0);
        let prev = arm.cycle_start();

        assert!(prev.extension_vetoed);
        assert_eq!(*arm.report(), StatusReport::default());
    }

    #[test]
    fn test_is_at() {
        let port = RecordingPort::new(11.6, 0.0);
        let arm = ArmCtrl::new(Box::new(port), ArmCtrlParams::default());

        assert!(arm.is_at(Joint::Extension, 12.0));
        assert!(!arm.is_at(Joint::Extension, 12.2));
        assert!(arm.is_at(Joint::Tilt, 0.0));
    }
}
