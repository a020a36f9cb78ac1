//! Channel messages.

use serde::{Deserialize, Serialize};

use crate::{InitState, Snapshot};

/// The two named channels an agent replicates on.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ChannelName {
    /// One full [`InitState`], retained for late joiners.
    Init,
    /// Periodic [`Snapshot`]s.
    Change,
}

impl ChannelName {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelName::Init   => "init",
            ChannelName::Change => "change",
        }
    }
}

impl std::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded payload of either channel.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum Message {
    Init(InitState),
    Change(Snapshot),
}

impl Message {
    /// The snapshot carried by either variant.
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            Message::Init(state)      => &state.snapshot,
            Message::Change(snapshot) => snapshot,
        }
    }

    /// Channel this message is sent on.
    pub fn channel_name(&self) -> ChannelName {
        match self {
            Message::Init(_)   => ChannelName::Init,
            Message::Change(_) => ChannelName::Change,
        }
    }
}

/// An encoded payload as delivered to one subscriber.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Envelope {
    pub channel: ChannelName,
    pub payload: Vec<u8>,
}
