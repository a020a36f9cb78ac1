//! Four-legged body with a tail.

use glam::Vec3;
use npc_core::ActionCode;

use crate::PoseDriver;

/// Rest height of the body centre.
pub const BODY_HEIGHT: f32 = 0.35;
/// Rest height of the head centre.
pub const HEAD_HEIGHT: f32 = 0.40;

/// Body wobble, bob, tail wag, and per-leg swing (radians about the
/// sideways axis) of a quadruped.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct QuadrupedPose {
    pub body_rotation: Vec3,
    pub body_height:   f32,
    pub head_height:   f32,
    pub tail:          f32,
    pub front_left:    f32,
    pub front_right:   f32,
    pub back_left:     f32,
    pub back_right:    f32,
}

impl Default for QuadrupedPose {
    fn default() -> Self {
        Self {
            body_rotation: Vec3::ZERO,
            body_height:   BODY_HEIGHT,
            head_height:   HEAD_HEIGHT,
            tail:          0.0,
            front_left:    0.0,
            front_right:   0.0,
            back_left:     0.0,
            back_right:    0.0,
        }
    }
}

/// Frequency and amplitude of one gait.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Gait {
    pub freq: f32,
    pub amp:  f32,
}

impl Gait {
    pub const IDLE: Gait = Gait { freq: 2.0, amp: 0.05 };
    pub const WALK: Gait = Gait { freq: 6.0, amp: 0.25 };
    pub const RUN:  Gait = Gait { freq: 8.0, amp: 0.35 };

    pub fn for_code(code: ActionCode) -> Gait {
        match code {
            ActionCode::Walk => Gait::WALK,
            ActionCode::Run  => Gait::RUN,
            _                => Gait::IDLE,
        }
    }
}

/// Pose driver for the pig-style quadruped.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct QuadrupedRig;

impl PoseDriver for QuadrupedRig {
    type Pose = QuadrupedPose;

    fn drive_pose(&self, code: ActionCode, t: f32) -> QuadrupedPose {
        let Gait { freq, amp } = Gait::for_code(code);
        let mut pose = QuadrupedPose::default();

        let wobble = (t * freq * 0.35).sin() * amp * 0.2;
        let bob = (t * freq).sin() * amp * 0.04;
        pose.body_rotation = Vec3::new(0.0, wobble, wobble * 0.6);
        pose.body_height += bob;
        pose.head_height += bob;
        pose.tail = (t * freq * 1.2).sin() * if code.is_moving() { 0.6 } else { 0.2 };

        // Diagonal pairs move together.
        let swing = (t * freq).sin() * amp;
        pose.front_left = swing;
        pose.back_right = swing;
        pose.front_right = -swing;
        pose.back_left = -swing;
        pose
    }
}
