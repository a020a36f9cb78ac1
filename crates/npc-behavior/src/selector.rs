//! Weighted random action selection.

use std::f32::consts::PI;

use glam::Vec3;
use npc_core::math::{TAU, planar_distance, yaw_toward};
use npc_core::{ActionCode, AgentRng};
use rand::distributions::WeightedIndex;

use crate::{Action, ActionTemplate, BehaviorError, BehaviorResult, FacingRule, WeightedAction};

/// Half-width of the cone a geofenced roamer's heading home is perturbed by.
pub const HOMING_CONE: f32 = PI / 3.0; // ±60°

/// The agent state a selection is made against.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SelectContext {
    pub position:     Vec3,
    pub home:         Vec3,
    pub max_distance: f32,
}

impl SelectContext {
    /// `true` when the agent is outside its soft bound.
    #[inline]
    pub fn outside_bound(&self) -> bool {
        planar_distance(self.position, self.home) > self.max_distance
    }
}

/// Draws fresh [`Action`]s from a weighted table of [`ActionTemplate`]s.
///
/// Templates that can never be drawn (e.g. a gesture with no codes) get an
/// effective weight of zero.  Construction fails if no template is left.
#[derive(Clone, Debug)]
pub struct ActionSelector {
    table: Vec<WeightedAction>,
    index: WeightedIndex<f64>,
}

impl ActionSelector {
    pub fn new(table: Vec<WeightedAction>) -> BehaviorResult<Self> {
        let weights: Vec<f64> = table
            .iter()
            .map(|w| if w.template.is_drawable() { w.weight } else { 0.0 })
            .collect();
        let index = WeightedIndex::new(&weights).map_err(|e| BehaviorError::Weights(e.to_string()))?;
        Ok(Self { table, index })
    }

    /// The configured table, in declaration order.
    pub fn table(&self) -> &[WeightedAction] {
        &self.table
    }

    /// Pick a template by weight.
    pub fn pick<'a>(&'a self, rng: &mut AgentRng) -> &'a ActionTemplate {
        &self.table[rng.sample(&self.index)].template
    }

    /// Pick a template and instantiate it with fresh random parameters.
    pub fn select(&self, rng: &mut AgentRng, ctx: &SelectContext) -> Action {
        let template = self.pick(rng);
        instantiate(template, rng, ctx)
    }
}

/// Turn a template into a concrete action for an agent in `ctx`.
pub fn instantiate(template: &ActionTemplate, rng: &mut AgentRng, ctx: &SelectContext) -> Action {
    match template {
        ActionTemplate::Idle { duration, facing } => Action::Idle {
            remaining: rng.uniform(duration.min, duration.max),
            facing:    resolve_facing(*facing, ctx.position),
        },

        ActionTemplate::Wander { duration, walk_speed, run_speed, run_chance } => {
            let yaw = roam_heading(rng, ctx);
            let remaining = rng.uniform(duration.min, duration.max);
            let run = rng.gen_bool(*run_chance);
            Action::Wander {
                remaining,
                yaw,
                speed: if run { *run_speed } else { *walk_speed },
                code:  if run { ActionCode::Run } else { ActionCode::Walk },
            }
        }

        ActionTemplate::Patrol { offset, speed } => {
            let jitter = Vec3::new(
                rng.uniform(-offset.x, offset.x),
                rng.uniform(-offset.y, offset.y),
                rng.uniform(-offset.z, offset.z),
            );
            Action::Patrol { target: ctx.home + jitter, speed: *speed }
        }

        ActionTemplate::Gesture { duration, codes, facing } => {
            let code = rng.choose(codes).copied().unwrap_or_default();
            Action::Gesture {
                remaining: rng.uniform(duration.min, duration.max),
                code,
                facing:    resolve_facing(*facing, ctx.position),
            }
        }
    }
}

/// Heading for a free-roam move.
///
/// Uniform in `[0, 2π)` while inside the bound; otherwise the yaw toward home
/// perturbed uniformly within ±[`HOMING_CONE`], so the way back is not a
/// straight line.
pub fn roam_heading(rng: &mut AgentRng, ctx: &SelectContext) -> f32 {
    if ctx.outside_bound() {
        let base = yaw_toward(ctx.position, ctx.home);
        base + rng.uniform(-HOMING_CONE, HOMING_CONE)
    } else {
        rng.gen_range(0.0..TAU)
    }
}

fn resolve_facing(rule: FacingRule, position: Vec3) -> Option<f32> {
    match rule {
        FacingRule::Keep         => None,
        FacingRule::Yaw(yaw)     => Some(yaw),
        FacingRule::Point(point) => Some(yaw_toward(position, point)),
    }
}
