//! Action templates — the configurable recipes actions are drawn from.

use glam::Vec3;
use npc_core::ActionCode;
use serde::{Deserialize, Serialize};

/// An inclusive `[min, max]` range of seconds (or any scalar).
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `min ≤ max` and both finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }
}

/// How a stationary action orients the agent.
#[derive(Copy, Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum FacingRule {
    /// Keep the current yaw.
    #[default]
    Keep,
    /// Face a fixed yaw (radians).
    Yaw(f32),
    /// Face a world-space point, resolved when the action is drawn.
    Point(Vec3),
}

/// Recipe for one selectable action.
///
/// Each draw produces a fresh [`Action`][crate::Action] with its own random
/// parameters; the template itself never changes.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionTemplate {
    /// Stand still.
    Idle {
        duration: Span,
        #[serde(default)]
        facing:   FacingRule,
    },

    /// Free roam along a random heading; runs with probability `run_chance`.
    Wander {
        duration:   Span,
        walk_speed: f32,
        run_speed:  f32,
        run_chance: f64,
    },

    /// Walk to a random point within `offset` (per axis) of home.
    Patrol {
        offset: Vec3,
        speed:  f32,
    },

    /// Play one of `codes` in place.  An empty list disables the template.
    Gesture {
        duration: Span,
        codes:    Vec<ActionCode>,
        #[serde(default)]
        facing:   FacingRule,
    },
}

impl ActionTemplate {
    /// The [`ActionKind`][crate::ActionKind] this template produces.
    pub fn kind(&self) -> crate::ActionKind {
        match self {
            ActionTemplate::Idle { .. }    => crate::ActionKind::Idle,
            ActionTemplate::Wander { .. }  => crate::ActionKind::Wander,
            ActionTemplate::Patrol { .. }  => crate::ActionKind::Patrol,
            ActionTemplate::Gesture { .. } => crate::ActionKind::Gesture,
        }
    }

    /// `false` for templates that can never produce an action.
    pub fn is_drawable(&self) -> bool {
        match self {
            ActionTemplate::Gesture { codes, .. } => !codes.is_empty(),
            _ => true,
        }
    }
}

/// A template with its relative selection weight.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WeightedAction {
    pub weight:   f64,
    #[serde(flatten)]
    pub template: ActionTemplate,
}

impl WeightedAction {
    pub fn new(weight: f64, template: ActionTemplate) -> Self {
        Self { weight, template }
    }
}
