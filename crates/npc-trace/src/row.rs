//! Plain data row types written by trace backends.

use npc_behavior::ActionKind;
use npc_core::{ActionCode, AgentId};
use npc_replication::{ChannelName, Snapshot};

/// One replicated snapshot as it left the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub agent_id:  u32,
    /// `init` for the initial state, `change` for periodic snapshots.
    pub channel:   ChannelName,
    /// Simulated seconds since the agent was initialized.
    pub time_secs: f64,
    pub x:         f32,
    pub y:         f32,
    pub z:         f32,
    pub yaw:       f32,
    pub code:      ActionCode,
}

impl TraceRow {
    pub fn new(agent: AgentId, channel: ChannelName, time_secs: f64, snapshot: &Snapshot) -> Self {
        Self {
            agent_id: agent.0,
            channel,
            time_secs,
            x:        snapshot.position.x,
            y:        snapshot.position.y,
            z:        snapshot.position.z,
            yaw:      snapshot.yaw,
            code:     snapshot.code,
        }
    }
}

/// Something the scheduler decided, as opposed to something it published.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TraceEvent {
    Selected(ActionKind),
    /// Planar distance from home when the geofence fired.
    Geofence(f32),
}

impl TraceEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceEvent::Selected(_) => "selected",
            TraceEvent::Geofence(_) => "geofence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    pub agent_id:  u32,
    /// Time of the agent's most recent publish; events between publishes
    /// share it.
    pub time_secs: f64,
    pub event:     TraceEvent,
}
