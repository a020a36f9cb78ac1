//! Fluent builder for constructing a [`Scheduler`].

use npc_behavior::{ActionSelector, BehaviorModel};
use npc_core::{AgentId, AgentRng};

use crate::{AgentProfile, Controller, GroundedController, Scheduler, SimResult};

/// Fluent builder for [`Scheduler<B, C>`].
///
/// # Optional inputs (have defaults)
///
/// | Method      | Default      |
/// |-------------|--------------|
/// | `.id(id)`   | `AgentId(0)` |
/// | `.seed(s)`  | `0`          |
///
/// # Example
///
/// ```rust,ignore
/// let mut bartender = SchedulerBuilder::new(AgentProfile::bartender())
///     .id(AgentId(0))
///     .seed(42)
///     .build()?;
/// bartender.init(&mut NoopObserver);
/// ```
pub struct SchedulerBuilder {
    profile: AgentProfile,
    id:      AgentId,
    seed:    u64,
}

impl SchedulerBuilder {
    pub fn new(profile: AgentProfile) -> Self {
        Self { profile, id: AgentId(0), seed: 0 }
    }

    pub fn id(mut self, id: AgentId) -> Self {
        self.id = id;
        self
    }

    /// Global seed; the agent's RNG is derived from it and the agent ID.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the profile and build a scheduler driven by the profile's
    /// own weighted action table on a flat-ground controller.
    pub fn build(self) -> SimResult<Scheduler<ActionSelector, GroundedController>> {
        self.profile.validate()?;
        let selector = ActionSelector::new(self.profile.behavior.actions.clone())?;
        let controller =
            GroundedController::new(self.profile.controller.clone(), self.profile.behavior.home.y);
        Ok(self.finish(selector, controller))
    }

    /// Validate the profile and build a scheduler with a custom behavior
    /// model and host controller.
    pub fn build_with<B: BehaviorModel, C: Controller>(
        self,
        behavior:   B,
        controller: C,
    ) -> SimResult<Scheduler<B, C>> {
        self.profile.validate()?;
        Ok(self.finish(behavior, controller))
    }

    fn finish<B: BehaviorModel, C: Controller>(self, behavior: B, controller: C) -> Scheduler<B, C> {
        let rng = AgentRng::new(self.seed, self.id);
        Scheduler::new(self.id, self.profile, behavior, controller, rng)
    }
}
