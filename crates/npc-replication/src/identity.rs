//! Static per-agent data sent once with the initial state.

use npc_core::ActionCode;
use serde::{Deserialize, Serialize};

/// Which procedural pose driver an observer should build for the agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigKind {
    /// Jointed biped built from primitives (shoulders, elbows, hips, knees).
    #[default]
    Humanoid,
    /// Four-legged body with a tail.
    Quadruped,
    /// External avatar asset animated through its emote table.
    Avatar,
}

impl RigKind {
    /// `true` when the rig cannot be built without an avatar asset.
    #[inline]
    pub fn requires_avatar(self) -> bool {
        matches!(self, RigKind::Avatar)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RigKind::Humanoid  => "humanoid",
            RigKind::Quadruped => "quadruped",
            RigKind::Avatar    => "avatar",
        }
    }
}

/// Emote asset references for an avatar rig.
///
/// `custom[i]` is played for `ActionCode::Emote(i)`.  Entries past
/// [`ActionCode::MAX_EMOTE`] can never be addressed on the wire.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct EmoteTable {
    #[serde(default)]
    pub walk:   Option<String>,
    #[serde(default)]
    pub run:    Option<String>,
    #[serde(default)]
    pub custom: Vec<String>,
}

impl EmoteTable {
    /// Custom emote `slot`, if configured.
    pub fn custom(&self, slot: u8) -> Option<&str> {
        self.custom.get(slot as usize).map(String::as_str)
    }

    /// Number of addressable custom emote slots.
    pub fn custom_slots(&self) -> u8 {
        let addressable = usize::from(ActionCode::MAX_EMOTE) + 1;
        u8::try_from(self.custom.len().min(addressable)).unwrap_or(u8::MAX)
    }

    /// `true` when every custom entry has an encodable slot.
    pub fn fits_wire(&self) -> bool {
        self.custom.len() <= usize::from(ActionCode::MAX_EMOTE) + 1
    }
}

/// Everything an observer needs to build the agent's visual once.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct AgentIdentity {
    /// Display name shown above the agent.
    pub name:   String,
    /// Avatar asset reference; required for [`RigKind::Avatar`].
    #[serde(default)]
    pub avatar: Option<String>,
    pub rig:    RigKind,
    #[serde(default)]
    pub emotes: EmoteTable,
}

impl AgentIdentity {
    pub fn new(name: impl Into<String>, rig: RigKind) -> Self {
        Self { name: name.into(), avatar: None, rig, emotes: EmoteTable::default() }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn with_emotes(mut self, emotes: EmoteTable) -> Self {
        self.emotes = emotes;
        self
    }

    /// `false` when the rig needs an avatar that is not configured.
    pub fn is_complete(&self) -> bool {
        !self.rig.requires_avatar() || self.avatar.as_deref().is_some_and(|a| !a.is_empty())
    }
}
