//! One observer's replica of one agent.

use log::{debug, trace, warn};
use npc_replication::{AgentIdentity, Envelope, Message, decode};

use crate::{MotionInterpolator, Pose, Rig, VisualState};

/// Counters of a [`ReplicaView`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ViewStats {
    /// Envelopes handed to `receive`.
    pub received:    u64,
    /// Snapshots applied to the interpolator.
    pub applied:     u64,
    /// Payloads that failed to decode or arrived on the wrong channel.
    pub rejected:    u64,
    /// Snapshots that arrived before the initial state.
    pub before_init: u64,
}

/// The observer-side app instance for one agent.
///
/// Builds its [`MotionInterpolator`] exactly once, from the first `init`
/// message marked ready; `change` messages before that are ignored.
/// Undecodable payloads are logged and dropped.
#[derive(Debug)]
pub struct ReplicaView {
    window:       f32,
    identity:     Option<AgentIdentity>,
    interpolator: Option<MotionInterpolator<Rig>>,
    stats:        ViewStats,
}

impl ReplicaView {
    /// `window` is the interpolation window, usually
    /// [`window_for`][crate::window_for] of the publish interval.
    pub fn new(window: f32) -> Self {
        Self { window, identity: None, interpolator: None, stats: ViewStats::default() }
    }

    pub fn receive(&mut self, envelope: &Envelope) {
        self.stats.received += 1;
        let message = match decode(&envelope.payload) {
            Ok(message) => message,
            Err(e) => {
                warn!("dropping undecodable {} payload: {e}", envelope.channel);
                self.stats.rejected += 1;
                return;
            }
        };
        if message.channel_name() != envelope.channel {
            warn!("dropping {} message received on {}", message.channel_name(), envelope.channel);
            self.stats.rejected += 1;
            return;
        }

        match message {
            Message::Init(state) => {
                if !state.ready {
                    debug!("'{}': init state not ready, waiting", state.identity.name);
                    return;
                }
                if self.interpolator.is_some() {
                    debug!("'{}': already initialized, ignoring init", state.identity.name);
                    return;
                }
                let rig = Rig::from_identity(&state.identity);
                debug!("'{}': building {} rig", state.identity.name, rig.kind().as_str());
                self.interpolator = Some(MotionInterpolator::new(&state.snapshot, rig, self.window));
                self.identity = Some(state.identity);
            }
            Message::Change(snapshot) => match &mut self.interpolator {
                Some(interpolator) => {
                    interpolator.on_snapshot(&snapshot);
                    self.stats.applied += 1;
                }
                None => {
                    trace!("change before init: {snapshot}");
                    self.stats.before_init += 1;
                }
            },
        }
    }

    pub fn receive_all<'a>(&mut self, envelopes: impl IntoIterator<Item = &'a Envelope>) {
        for envelope in envelopes {
            self.receive(envelope);
        }
    }

    /// Advance the visual by one render frame.  `None` until initialized.
    pub fn on_render_tick(&mut self, delta: f32) -> Option<&VisualState<Pose>> {
        self.interpolator.as_mut().map(|i| i.on_render_tick(delta))
    }

    pub fn is_initialized(&self) -> bool {
        self.interpolator.is_some()
    }

    pub fn identity(&self) -> Option<&AgentIdentity> {
        self.identity.as_ref()
    }

    pub fn visual(&self) -> Option<&VisualState<Pose>> {
        self.interpolator.as_ref().map(MotionInterpolator::visual)
    }

    pub fn interpolator(&self) -> Option<&MotionInterpolator<Rig>> {
        self.interpolator.as_ref()
    }

    pub fn stats(&self) -> ViewStats {
        self.stats
    }
}
