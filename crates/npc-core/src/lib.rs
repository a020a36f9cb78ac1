//! `npc-core` — foundational types for replicated NPC motion.
//!
//! This crate is a dependency of every other `npc-*` crate.  It has no
//! `npc-*` dependencies and few external ones (`glam`, `rand`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `SubscriberId`                                 |
//! | [`code`]    | `ActionCode` — the replicated animation tag               |
//! | [`math`]    | yaw ↔ heading helpers, planar distance                    |
//! | [`time`]    | `Tick`, `FixedStep`                                       |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`error`]   | `NpcError`, `NpcResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `npc-replication`.                             |

pub mod code;
pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use code::ActionCode;
pub use error::{NpcError, NpcResult};
pub use glam::Vec3;
pub use ids::{AgentId, SubscriberId};
pub use rng::{AgentRng, SimRng};
pub use time::{FixedStep, Tick};
