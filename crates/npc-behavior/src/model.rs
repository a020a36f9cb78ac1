//! The `BehaviorModel` trait — the extension point for action selection.

use npc_core::AgentRng;

use crate::{Action, ActionSelector, SelectContext};

/// Pluggable discretionary behavior.
///
/// The scheduler calls [`select`][Self::select] whenever the current action
/// finishes (and once at start-up).  The geofence override is not part of the
/// model: it is applied by the scheduler and always wins.
///
/// Implementations must be `Send + Sync` so a population can step its
/// schedulers on a thread pool; per-agent randomness comes in through `rng`.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysNorth;
///
/// impl BehaviorModel for AlwaysNorth {
///     fn select(&self, _rng: &mut AgentRng, _ctx: &SelectContext) -> Action {
///         Action::Wander { remaining: 1.0, yaw: 0.0, speed: 2.0, code: ActionCode::Walk }
///     }
/// }
/// ```
pub trait BehaviorModel: Send + Sync + 'static {
    /// Produce the next action for an agent in `ctx`.
    fn select(&self, rng: &mut AgentRng, ctx: &SelectContext) -> Action;
}

impl BehaviorModel for ActionSelector {
    fn select(&self, rng: &mut AgentRng, ctx: &SelectContext) -> Action {
        ActionSelector::select(self, rng, ctx)
    }
}

impl<B: BehaviorModel + ?Sized> BehaviorModel for Box<B> {
    fn select(&self, rng: &mut AgentRng, ctx: &SelectContext) -> Action {
        (**self).select(rng, ctx)
    }
}
