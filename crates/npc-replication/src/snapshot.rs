//! The replicated state records.

use glam::Vec3;
use npc_core::{ActionCode, NpcError};
use serde::{Deserialize, Serialize};

use crate::AgentIdentity;

/// One periodic replication record: where the agent is, which way it faces,
/// and what it is doing.
///
/// On the wire this is the ordered tuple `(x, y, z, yaw, code)` with the code
/// in its single-byte form.  There is no sequence number or timestamp; the
/// receiver treats the latest arrival as current.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(into = "WireSnapshot", try_from = "WireSnapshot")]
pub struct Snapshot {
    pub position: Vec3,
    pub yaw:      f32,
    pub code:     ActionCode,
}

impl Snapshot {
    pub fn new(position: Vec3, yaw: f32, code: ActionCode) -> Self {
        Self { position, yaw, code }
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.3}, {:.3}, {:.3}, yaw {:.3}, {})",
            self.position.x, self.position.y, self.position.z, self.yaw, self.code
        )
    }
}

type WireSnapshot = (f32, f32, f32, f32, u8);

impl From<Snapshot> for WireSnapshot {
    fn from(s: Snapshot) -> Self {
        (s.position.x, s.position.y, s.position.z, s.yaw, s.code.as_u8())
    }
}

impl TryFrom<WireSnapshot> for Snapshot {
    type Error = NpcError;

    fn try_from((x, y, z, yaw, code): WireSnapshot) -> Result<Self, Self::Error> {
        Ok(Snapshot { position: Vec3::new(x, y, z), yaw, code: ActionCode::try_from(code)? })
    }
}

/// Full initial record, published once when a scheduler becomes ready and
/// replayed to late joiners.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct InitState {
    pub snapshot: Snapshot,
    pub ready:    bool,
    pub identity: AgentIdentity,
}
