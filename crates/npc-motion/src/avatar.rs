//! Avatar rig: the code selects an emote clip instead of joint angles.

use npc_core::ActionCode;
use npc_replication::EmoteTable;

use crate::PoseDriver;

/// Emote clip to play; `None` plays the avatar's own idle.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AvatarPose {
    pub emote: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AvatarRig {
    emotes: EmoteTable,
}

impl AvatarRig {
    pub fn new(emotes: EmoteTable) -> Self {
        Self { emotes }
    }

    pub fn emotes(&self) -> &EmoteTable {
        &self.emotes
    }
}

impl PoseDriver for AvatarRig {
    type Pose = AvatarPose;

    fn drive_pose(&self, code: ActionCode, _t: f32) -> AvatarPose {
        let emote = match code {
            ActionCode::Walk     => self.emotes.walk.clone(),
            ActionCode::Run      => self.emotes.run.clone(),
            ActionCode::Emote(n) => self.emotes.custom(n).map(str::to_owned),
            _                    => None,
        };
        AvatarPose { emote }
    }
}
