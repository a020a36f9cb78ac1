//! Scheduler observer trait for replication, tracing, and data collection.

use npc_behavior::Action;
use npc_core::AgentId;
use npc_replication::{InitState, Snapshot};

/// Callbacks invoked by [`Scheduler`][crate::Scheduler] at key points of its
/// lifecycle.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: publish counter
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl SchedulerObserver for Counter {
///     fn on_publish(&mut self, _agent: AgentId, _time_secs: f64, _snapshot: &Snapshot) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SchedulerObserver {
    /// Called once when the agent becomes ready, with the full initial state.
    fn on_init(&mut self, _agent: AgentId, _state: &InitState) {}

    /// Called for every periodic snapshot.  `time_secs` is simulated time
    /// since initialization.
    fn on_publish(&mut self, _agent: AgentId, _time_secs: f64, _snapshot: &Snapshot) {}

    /// Called whenever a new action becomes active, including forced returns.
    fn on_action_selected(&mut self, _agent: AgentId, _action: &Action) {}

    /// Called when the geofence pre-empts the current action.  `distance` is
    /// the agent's planar distance from home at that moment.
    fn on_geofence(&mut self, _agent: AgentId, _distance: f32) {}
}

/// A [`SchedulerObserver`] that does nothing.
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}

impl<O: SchedulerObserver + ?Sized> SchedulerObserver for &mut O {
    fn on_init(&mut self, agent: AgentId, state: &InitState) {
        (**self).on_init(agent, state)
    }

    fn on_publish(&mut self, agent: AgentId, time_secs: f64, snapshot: &Snapshot) {
        (**self).on_publish(agent, time_secs, snapshot)
    }

    fn on_action_selected(&mut self, agent: AgentId, action: &Action) {
        (**self).on_action_selected(agent, action)
    }

    fn on_geofence(&mut self, agent: AgentId, distance: f32) {
        (**self).on_geofence(agent, distance)
    }
}

/// Fan out to two observers, first `A` then `B`.
impl<A: SchedulerObserver, B: SchedulerObserver> SchedulerObserver for (A, B) {
    fn on_init(&mut self, agent: AgentId, state: &InitState) {
        self.0.on_init(agent, state);
        self.1.on_init(agent, state);
    }

    fn on_publish(&mut self, agent: AgentId, time_secs: f64, snapshot: &Snapshot) {
        self.0.on_publish(agent, time_secs, snapshot);
        self.1.on_publish(agent, time_secs, snapshot);
    }

    fn on_action_selected(&mut self, agent: AgentId, action: &Action) {
        self.0.on_action_selected(agent, action);
        self.1.on_action_selected(agent, action);
    }

    fn on_geofence(&mut self, agent: AgentId, distance: f32) {
        self.0.on_geofence(agent, distance);
        self.1.on_geofence(agent, distance);
    }
}

// ── StepLog ───────────────────────────────────────────────────────────────────

/// One recorded observer callback.
#[derive(Clone, PartialEq, Debug)]
pub(crate) enum StepEvent {
    Publish(f64, Snapshot),
    Selected(Action),
    Geofence(f32),
}

/// Records one agent's step callbacks so they can be replayed later on
/// another observer.  Lets a population step agents concurrently while
/// keeping observer delivery sequential.
#[derive(Debug)]
pub(crate) struct StepLog {
    agent:  AgentId,
    events: Vec<StepEvent>,
}

impl StepLog {
    pub(crate) fn new(agent: AgentId) -> Self {
        Self { agent, events: Vec::new() }
    }

    /// Deliver the recorded events in order; returns the number of publishes.
    pub(crate) fn replay<O: SchedulerObserver + ?Sized>(self, observer: &mut O) -> usize {
        let mut published = 0;
        for event in self.events {
            match event {
                StepEvent::Publish(t, snapshot) => {
                    observer.on_publish(self.agent, t, &snapshot);
                    published += 1;
                }
                StepEvent::Selected(action) => observer.on_action_selected(self.agent, &action),
                StepEvent::Geofence(d)      => observer.on_geofence(self.agent, d),
            }
        }
        published
    }
}

impl SchedulerObserver for StepLog {
    fn on_publish(&mut self, _agent: AgentId, time_secs: f64, snapshot: &Snapshot) {
        self.events.push(StepEvent::Publish(time_secs, *snapshot));
    }

    fn on_action_selected(&mut self, _agent: AgentId, action: &Action) {
        self.events.push(StepEvent::Selected(*action));
    }

    fn on_geofence(&mut self, _agent: AgentId, distance: f32) {
        self.events.push(StepEvent::Geofence(distance));
    }
}
