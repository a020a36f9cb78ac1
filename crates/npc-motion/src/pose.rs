//! The `PoseDriver` trait and the rig selected from an agent's identity.

use npc_core::ActionCode;
use npc_replication::{AgentIdentity, RigKind};

use crate::{AvatarPose, AvatarRig, HumanoidPose, HumanoidRig, QuadrupedPose, QuadrupedRig};

/// Maps an action code and accumulated local time to a pose.
///
/// Implementations are pure: every call starts from `Pose::default()` (the
/// neutral pose) and applies only the branch for `code`, so switching codes
/// never leaves rotation behind from the previous one.
pub trait PoseDriver {
    type Pose: Clone + Default + std::fmt::Debug;

    fn drive_pose(&self, code: ActionCode, t: f32) -> Self::Pose;
}

/// Any of the built-in rigs.
#[derive(Clone, PartialEq, Debug)]
pub enum Rig {
    Humanoid(HumanoidRig),
    Quadruped(QuadrupedRig),
    Avatar(AvatarRig),
}

/// A pose from any of the built-in rigs.
#[derive(Clone, PartialEq, Debug)]
pub enum Pose {
    Humanoid(HumanoidPose),
    Quadruped(QuadrupedPose),
    Avatar(AvatarPose),
}

impl Default for Pose {
    fn default() -> Self {
        Pose::Humanoid(HumanoidPose::default())
    }
}

impl Rig {
    /// Build the rig an identity asks for.
    pub fn from_identity(identity: &AgentIdentity) -> Self {
        match identity.rig {
            RigKind::Humanoid  => Rig::Humanoid(HumanoidRig),
            RigKind::Quadruped => Rig::Quadruped(QuadrupedRig),
            RigKind::Avatar    => Rig::Avatar(AvatarRig::new(identity.emotes.clone())),
        }
    }

    pub fn kind(&self) -> RigKind {
        match self {
            Rig::Humanoid(_)  => RigKind::Humanoid,
            Rig::Quadruped(_) => RigKind::Quadruped,
            Rig::Avatar(_)    => RigKind::Avatar,
        }
    }
}

impl PoseDriver for Rig {
    type Pose = Pose;

    fn drive_pose(&self, code: ActionCode, t: f32) -> Pose {
        match self {
            Rig::Humanoid(rig)  => Pose::Humanoid(rig.drive_pose(code, t)),
            Rig::Quadruped(rig) => Pose::Quadruped(rig.drive_pose(code, t)),
            Rig::Avatar(rig)    => Pose::Avatar(rig.drive_pose(code, t)),
        }
    }
}
