//! The `Scheduler` struct and its per-tick step.

use log::{debug, info, trace};
use npc_behavior::{Action, AgentView, BehaviorModel, SelectContext, advance};
use npc_core::math::planar_distance;
use npc_core::{ActionCode, AgentId, AgentRng};
use npc_replication::{InitState, Snapshot};

use crate::{AgentProfile, Controller, SchedulerObserver};

/// Authoritative driver for one NPC.
///
/// `Scheduler<B, C>` owns the agent's controller and RNG and runs its
/// current [`Action`] once per fixed simulation step:
///
/// 1. **Geofence**: outside `max_distance` of home, the current action is
///    replaced by a forced return.
/// 2. **Advance**: the action is advanced by `delta`; movement goes through
///    the controller.
/// 3. **Reselect**: a finished action is replaced at once.
/// 4. **Publish**: once more than `publish_interval` seconds have
///    accumulated, one [`Snapshot`] is published and the accumulator resets.
///
/// Nothing happens until [`init`][Self::init] has succeeded.
///
/// Create via [`SchedulerBuilder`][crate::SchedulerBuilder].
pub struct Scheduler<B: BehaviorModel, C: Controller> {
    id:            AgentId,
    profile:       AgentProfile,
    behavior:      B,
    controller:    C,
    rng:           AgentRng,
    yaw:           f32,
    code:          ActionCode,
    action:        Option<Action>,
    since_publish: f32,
    elapsed_secs:  f64,
    ready:         bool,
}

impl<B: BehaviorModel, C: Controller> Scheduler<B, C> {
    pub(crate) fn new(
        id:         AgentId,
        profile:    AgentProfile,
        behavior:   B,
        controller: C,
        rng:        AgentRng,
    ) -> Self {
        let yaw = profile.behavior.initial_yaw;
        Self {
            id,
            profile,
            behavior,
            controller,
            rng,
            yaw,
            code:          ActionCode::Idle,
            action:        None,
            since_publish: 0.0,
            elapsed_secs:  0.0,
            ready:         false,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Activate the agent: place it at home, publish the full initial state,
    /// and pick a first action.
    ///
    /// Returns `None` without side effects when the agent cannot initialize
    /// (its rig needs an avatar that is not configured) or is already ready.
    pub fn init<O: SchedulerObserver + ?Sized>(&mut self, observer: &mut O) -> Option<InitState> {
        if self.ready {
            debug!("{}: already initialized", self.id);
            return None;
        }
        let identity = &self.profile.identity;
        if !identity.is_complete() {
            info!(
                "{}: '{}' has no avatar configured, not initializing",
                self.id, identity.name
            );
            return None;
        }

        self.controller.set_position(self.profile.behavior.home);
        self.yaw = self.profile.behavior.initial_yaw;
        self.code = ActionCode::Idle;
        self.since_publish = 0.0;
        self.elapsed_secs = 0.0;
        self.ready = true;

        let state = InitState {
            snapshot: self.snapshot(),
            ready:    true,
            identity: self.profile.identity.clone(),
        };
        info!("{}: '{}' ready at {}", self.id, state.identity.name, state.snapshot);
        observer.on_init(self.id, &state);

        self.reselect(observer);
        Some(state)
    }

    /// Run one fixed simulation step of `delta` seconds.  Returns the
    /// snapshot published this step, if any.
    pub fn step<O: SchedulerObserver + ?Sized>(
        &mut self,
        delta:    f32,
        observer: &mut O,
    ) -> Option<Snapshot> {
        if !self.ready {
            return None;
        }
        self.elapsed_secs += f64::from(delta);

        let position = self.controller.position();
        let home = self.profile.behavior.home;
        let max_distance = self.profile.behavior.max_distance;

        // ── Geofence ──────────────────────────────────────────────────────
        let distance = planar_distance(position, home);
        let action = match self.action {
            Some(action @ Action::ReturnHome { .. }) => action,
            _ if distance > max_distance => {
                debug!("{}: outside bound ({distance:.2} > {max_distance}), returning home", self.id);
                observer.on_geofence(self.id, distance);
                let forced = Action::return_home(home, self.profile.behavior.return_speed, max_distance);
                observer.on_action_selected(self.id, &forced);
                forced
            }
            Some(action) => action,
            None => self.select_action(),
        };

        // ── Advance ───────────────────────────────────────────────────────
        let (next, out) = advance(action, AgentView { position, yaw: self.yaw }, delta);
        self.yaw = out.yaw;
        self.code = out.code;
        if let Some(displacement) = out.displacement {
            self.controller.move_by(displacement);
        }
        self.action = Some(next);

        // ── Reselect ──────────────────────────────────────────────────────
        if out.finished {
            self.reselect(observer);
        }

        // ── Publish ───────────────────────────────────────────────────────
        self.since_publish += delta;
        if self.since_publish > self.profile.publish_interval {
            self.since_publish = 0.0;
            let snapshot = self.snapshot();
            trace!("{}: publish {snapshot}", self.id);
            observer.on_publish(self.id, self.elapsed_secs, &snapshot);
            return Some(snapshot);
        }
        None
    }

    /// Draw a fresh action from the behavior model for the agent's current
    /// state.  Does not make it active.
    pub fn select_action(&mut self) -> Action {
        let ctx = SelectContext {
            position:     self.controller.position(),
            home:         self.profile.behavior.home,
            max_distance: self.profile.behavior.max_distance,
        };
        self.behavior.select(&mut self.rng, &ctx)
    }

    /// The current replicated state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.controller.position(), self.yaw, self.code)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// The active action; `None` before initialization.
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn code(&self) -> ActionCode {
        self.code
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Simulated seconds since initialization.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn reselect<O: SchedulerObserver + ?Sized>(&mut self, observer: &mut O) {
        let action = self.select_action();
        debug!("{}: selected {}", self.id, action.kind());
        observer.on_action_selected(self.id, &action);
        self.action = Some(action);
    }
}
