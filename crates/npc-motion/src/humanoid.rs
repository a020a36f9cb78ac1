//! Jointed biped built from primitives.

use glam::Vec3;
use npc_core::ActionCode;

use crate::PoseDriver;

/// Rest height of the torso above the model root.
pub const TORSO_HEIGHT: f32 = 1.2;
/// Rest height of the head above the model root.
pub const HEAD_HEIGHT: f32 = 1.6;

/// Joint rotations (Euler, radians) and the breathing offsets of a humanoid.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct HumanoidPose {
    pub left_shoulder:  Vec3,
    pub left_elbow:     Vec3,
    pub right_shoulder: Vec3,
    pub right_elbow:    Vec3,
    pub left_hip:       Vec3,
    pub left_knee:      Vec3,
    pub right_hip:      Vec3,
    pub right_knee:     Vec3,
    pub torso_height:   f32,
    pub head_height:    f32,
}

impl Default for HumanoidPose {
    /// Neutral pose: every joint at rest, no breathing offset.
    fn default() -> Self {
        Self {
            left_shoulder:  Vec3::ZERO,
            left_elbow:     Vec3::ZERO,
            right_shoulder: Vec3::ZERO,
            right_elbow:    Vec3::ZERO,
            left_hip:       Vec3::ZERO,
            left_knee:      Vec3::ZERO,
            right_hip:      Vec3::ZERO,
            right_knee:     Vec3::ZERO,
            torso_height:   TORSO_HEIGHT,
            head_height:    HEAD_HEIGHT,
        }
    }
}

/// Pose driver for the bartender-style humanoid.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct HumanoidRig;

impl HumanoidRig {
    fn gait(pose: &mut HumanoidPose, t: f32, freq: f32, amp: f32) {
        let swing = (t * freq).sin() * amp;
        // Hips swing fore/aft, knees counter-bend.
        pose.left_hip.x = swing;
        pose.right_hip.x = -swing;
        pose.left_knee.x = -swing * 0.5;
        pose.right_knee.x = swing * 0.5;
        // Arms opposite to legs.
        pose.left_shoulder.x = -swing * 0.5;
        pose.right_shoulder.x = swing * 0.5;
    }
}

impl PoseDriver for HumanoidRig {
    type Pose = HumanoidPose;

    fn drive_pose(&self, code: ActionCode, t: f32) -> HumanoidPose {
        let mut pose = HumanoidPose::default();
        match code {
            ActionCode::Walk => Self::gait(&mut pose, t, 5.0, 0.45),
            ActionCode::Run  => Self::gait(&mut pose, t, 8.0, 0.7),
            ActionCode::Serve => {
                pose.right_shoulder.x = (t * 6.0).sin() * 0.5 - 0.3;
                pose.right_elbow.x = (t * 6.0).cos() * 0.4;
            }
            ActionCode::Clean => {
                // Forearm circles over the counter.
                pose.right_shoulder.x = -0.9 + (t * 4.0).sin() * 0.15;
                pose.right_shoulder.z = (t * 4.0).cos() * 0.25;
                pose.right_elbow.x = -0.6;
            }
            ActionCode::Idle | ActionCode::Emote(_) => {
                let bob = (t * 2.0).sin() * 0.02;
                pose.torso_height += bob;
                pose.head_height += bob;
            }
        }
        pose
    }
}
