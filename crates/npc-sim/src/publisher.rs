//! Observer that puts scheduler output on replication channels.

use std::collections::BTreeMap;

use log::warn;
use npc_core::AgentId;
use npc_replication::{InitState, Message, ReplicationChannel, Snapshot, encode};

use crate::SchedulerObserver;

/// Encodes `init` and periodic snapshots and sends them on each agent's
/// replication channel.
///
/// Agents without an attached channel are ignored.  An encoding failure is
/// logged and the message is skipped; the next snapshot supersedes it.
#[derive(Debug)]
pub struct ChannelPublisher<C: ReplicationChannel> {
    channels: BTreeMap<AgentId, C>,
    sent:     u64,
}

impl<C: ReplicationChannel> Default for ChannelPublisher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ReplicationChannel> ChannelPublisher<C> {
    pub fn new() -> Self {
        Self { channels: BTreeMap::new(), sent: 0 }
    }

    /// Route `agent`'s messages to `channel`, returning any channel it
    /// replaces.
    pub fn attach(&mut self, agent: AgentId, channel: C) -> Option<C> {
        self.channels.insert(agent, channel)
    }

    pub fn detach(&mut self, agent: AgentId) -> Option<C> {
        self.channels.remove(&agent)
    }

    pub fn channel(&self, agent: AgentId) -> Option<&C> {
        self.channels.get(&agent)
    }

    pub fn channel_mut(&mut self, agent: AgentId) -> Option<&mut C> {
        self.channels.get_mut(&agent)
    }

    /// Messages handed to a channel so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    fn publish(&mut self, agent: AgentId, message: &Message) {
        let Some(channel) = self.channels.get_mut(&agent) else {
            return;
        };
        match encode(message) {
            Ok(payload) => {
                channel.send(message.channel_name(), &payload);
                self.sent += 1;
            }
            Err(e) => warn!("{agent}: dropping {} message: {e}", message.channel_name()),
        }
    }
}

impl<C: ReplicationChannel> SchedulerObserver for ChannelPublisher<C> {
    fn on_init(&mut self, agent: AgentId, state: &InitState) {
        self.publish(agent, &Message::Init(state.clone()));
    }

    fn on_publish(&mut self, agent: AgentId, _time_secs: f64, snapshot: &Snapshot) {
        self.publish(agent, &Message::Change(*snapshot));
    }
}
