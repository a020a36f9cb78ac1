//! `npc-replication` — what crosses the wire between the authoritative
//! scheduler and its observers.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`snapshot`]  | `Snapshot` (`(x, y, z, yaw, code)` tuple), `InitState`        |
//! | [`identity`]  | `AgentIdentity`, `RigKind`, `EmoteTable`                      |
//! | [`message`]   | `Message`, `ChannelName`, `Envelope`                          |
//! | [`codec`]     | bincode `encode` / `decode`, `CodecError`                     |
//! | [`channel`]   | `ReplicationChannel` trait, `LoopbackHub`                     |
//!
//! # Delivery model
//!
//! Channels are best effort and at-most-once.  A periodic `change` snapshot
//! may be lost; receivers treat the latest arrival as ground truth.  The
//! `init` record is retained by the hub and replayed to every subscriber that
//! joins later.

pub mod channel;
pub mod codec;
pub mod identity;
pub mod message;
pub mod snapshot;


pub use channel::{HubStats, LoopbackHub, ReplicationChannel};
pub use codec::{CodecError, CodecResult, decode, encode};
pub use identity::{AgentIdentity, EmoteTable, RigKind};
pub use message::{ChannelName, Envelope, Message};
pub use snapshot::{InitState, Snapshot};
