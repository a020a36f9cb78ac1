//! The transport seam and an in-process implementation of it.

use std::collections::{BTreeMap, VecDeque};

use log::trace;
use npc_core::{SimRng, SubscriberId};

use crate::{ChannelName, Envelope};

/// Host transport: fire-and-forget delivery of an encoded payload on a named
/// channel to every current observer.
pub trait ReplicationChannel {
    fn send(&mut self, channel: ChannelName, payload: &[u8]);
}

impl<C: ReplicationChannel + ?Sized> ReplicationChannel for &mut C {
    fn send(&mut self, channel: ChannelName, payload: &[u8]) {
        (**self).send(channel, payload)
    }
}

/// Delivery counters of a [`LoopbackHub`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct HubStats {
    /// Payloads handed to `send`.
    pub sent:      u64,
    /// Per-subscriber deliveries, including init replays.
    pub delivered: u64,
    /// Per-subscriber `change` deliveries discarded by the loss model.
    pub dropped:   u64,
}

/// In-process fan-out channel for one replicated agent.
///
/// Every subscriber has its own FIFO queue, drained with [`poll`][Self::poll].
/// The most recent `init` payload is retained and replayed on
/// [`subscribe`][Self::subscribe], so an observer that joins after start-up
/// can render at once.  With a non-zero drop rate each `change` delivery is
/// discarded independently with that probability; `init` is never dropped.
#[derive(Debug)]
pub struct LoopbackHub {
    queues:    BTreeMap<SubscriberId, VecDeque<Envelope>>,
    next_id:   u32,
    retained:  Option<Vec<u8>>,
    drop_rate: f64,
    rng:       SimRng,
    stats:     HubStats,
}

impl Default for LoopbackHub {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopbackHub {
    /// A lossless hub.
    pub fn new() -> Self {
        Self::with_drop_rate(0.0, 0)
    }

    /// A hub that loses `change` deliveries with probability `drop_rate`,
    /// reproducibly for a given `seed`.
    pub fn with_drop_rate(drop_rate: f64, seed: u64) -> Self {
        Self {
            queues:    BTreeMap::new(),
            next_id:   0,
            retained:  None,
            drop_rate: drop_rate.clamp(0.0, 1.0),
            rng:       SimRng::new(seed),
            stats:     HubStats::default(),
        }
    }

    /// Attach a new observer.  The retained `init` payload, if any, is
    /// queued for it immediately.
    pub fn subscribe(&mut self) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;

        let mut queue = VecDeque::new();
        if let Some(payload) = &self.retained {
            queue.push_back(Envelope { channel: ChannelName::Init, payload: payload.clone() });
            self.stats.delivered += 1;
            trace!("replaying init to {id}");
        }
        self.queues.insert(id, queue);
        id
    }

    /// Detach an observer, discarding anything still queued for it.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.queues.remove(&id).is_some()
    }

    /// Drain everything queued for `id`, oldest first.  Unknown IDs get an
    /// empty batch.
    pub fn poll(&mut self, id: SubscriberId) -> Vec<Envelope> {
        self.queues.get_mut(&id).map(|q| q.drain(..).collect()).unwrap_or_default()
    }

    pub fn subscriber_count(&self) -> usize {
        self.queues.len()
    }

    /// `true` once an `init` payload has been sent.
    pub fn has_init(&self) -> bool {
        self.retained.is_some()
    }

    pub fn stats(&self) -> HubStats {
        self.stats
    }
}

impl ReplicationChannel for LoopbackHub {
    fn send(&mut self, channel: ChannelName, payload: &[u8]) {
        self.stats.sent += 1;
        if channel == ChannelName::Init {
            self.retained = Some(payload.to_vec());
        }
        for queue in self.queues.values_mut() {
            if channel == ChannelName::Change
                && self.drop_rate > 0.0
                && self.rng.gen_bool(self.drop_rate)
            {
                self.stats.dropped += 1;
                continue;
            }
            queue.push_back(Envelope { channel, payload: payload.to_vec() });
            self.stats.delivered += 1;
        }
    }
}
