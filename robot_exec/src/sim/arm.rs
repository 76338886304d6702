//! Simulated arm motor drivers

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use hw_if::eqpt::{ActuatorPort, Joint, JointDem, SoftLimits};
use log::trace;
use std::{cell::RefCell, rc::Rc};
use util::maths::clamp;

use super::SimParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Rate-limited joints holding the last demand they were given, as the motor controllers do.
#[derive(Clone)]
pub struct SimArm(Rc<RefCell<SimArmState>>);

struct SimArmState {
    joints: [SimJoint; 2],
    position_gain: f64,
}

struct SimJoint {
    position: f64,
    dem: JointDem,
    max_rate: f64,
    soft_limits: SoftLimits,
    soft_limits_enabled: bool,
    hard_stops: SoftLimits,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl SimArm {
    pub fn new(params: &SimParams) -> Self {
        let joint = |i: usize| SimJoint {
            position: params.initial_position_in[i],
            dem: JointDem::Speed(0.0),
            max_rate: params.max_rate_in_s[i],
            soft_limits: params.soft_limits[i],
            soft_limits_enabled: true,
            hard_stops: params.hard_stops[i],
        };

        Self(Rc::new(RefCell::new(SimArmState {
            joints: [joint(0), joint(1)],
            position_gain: params.position_gain,
        })))
    }

    /// Move both joints on by `dt_s` seconds under their current demands.
    pub fn step(&self, dt_s: f64) {
        let mut state = self.0.borrow_mut();
        let gain = state.position_gain;

        for (i, j) in state.joints.iter_mut().enumerate() {
            let output = match j.dem {
                JointDem::Speed(s) => clamp(s, -1.0, 1.0),
                JointDem::Position {
                    target,
                    speed_scale,
                } => {
                    let scale = clamp(speed_scale.abs(), 0.0, 1.0);
                    clamp(gain * (target - j.position), -scale, scale)
                }
            };

            let mut position = j.position + output * j.max_rate * dt_s;
            if j.soft_limits_enabled {
                position = j.soft_limits.clamp(position);
            }
            j.position = j.hard_stops.clamp(position);

            trace!("Sim {}: {:.3} (output {:.3})", Joint::ALL[i], j.position, output);
        }
    }
}

impl ActuatorPort for SimArm {
    fn set_speed(&mut self, joint: Joint, value: f64) {
        self.0.borrow_mut().joints[joint as usize].dem = JointDem::Speed(value);
    }

    fn set_target_position(&mut self, joint: Joint, value: f64, speed_scale: f64) {
        self.0.borrow_mut().joints[joint as usize].dem = JointDem::Position {
            target: value,
            speed_scale,
        };
    }

    fn get_position(&self, joint: Joint) -> f64 {
        self.0.borrow().joints[joint as usize].position
    }

    fn set_soft_limits_enabled(&mut self, joint: Joint, enabled: bool) {
        self.0.borrow_mut().joints[joint as usize].soft_limits_enabled = enabled;
    }

    fn reset_position(&mut self, joint: Joint, position: f64) {
        self.0.borrow_mut().joints[joint as usize].position = position;
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
