//! Actions — time-boxed behavior units and their pure per-tick advance.
//!
//! An [`Action`] carries every parameter it was drawn with, so advancing it
//! needs nothing but the agent's current pose and the step length:
//!
//! ```text
//! (action, view, delta) ──advance──▶ (action', Advance { yaw, code, displacement, finished })
//! ```
//!
//! The caller (the scheduler) applies `displacement` through its controller
//! and replaces the action when `finished` is set.

use glam::Vec3;
use npc_core::ActionCode;
use npc_core::math::{heading, planar_distance, yaw_toward};
use serde::{Deserialize, Serialize};

/// Constant downward component added to every locomotion displacement so the
/// host controller's ground collision keeps the agent planted.
pub const GROUND_BIAS: f32 = -9.81;

/// A patrol is finished once the agent is this close to its target.
pub const ARRIVE_DISTANCE: f32 = 0.05;

/// Discriminant of an [`Action`], used for logging and statistics.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Idle,
    Wander,
    Patrol,
    Gesture,
    ReturnHome,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Idle       => "idle",
            ActionKind::Wander     => "wander",
            ActionKind::Patrol     => "patrol",
            ActionKind::Gesture    => "gesture",
            ActionKind::ReturnHome => "return_home",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One active behavior with the random parameters it was created with.
///
/// `facing: None` keeps whatever yaw the agent already has.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Action {
    /// Stand still for `remaining` seconds.
    Idle {
        remaining: f32,
        facing:    Option<f32>,
    },

    /// Walk or run along a fixed heading for `remaining` seconds.
    Wander {
        remaining: f32,
        yaw:       f32,
        speed:     f32,
        code:      ActionCode,
    },

    /// Walk to `target`; finishes on arrival (no time limit).
    Patrol {
        target: Vec3,
        speed:  f32,
    },

    /// Play `code` in place for `remaining` seconds.
    Gesture {
        remaining: f32,
        code:      ActionCode,
        facing:    Option<f32>,
    },

    /// Forced steer back toward `home` until inside `max_distance`.
    ReturnHome {
        home:         Vec3,
        speed:        f32,
        max_distance: f32,
    },
}

/// What the agent looks like this tick, as seen by [`advance`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AgentView {
    pub position: Vec3,
    pub yaw:      f32,
}

/// Effects of one [`advance`] call.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Advance {
    /// Yaw the agent should face after this tick.
    pub yaw:          f32,
    /// Action code to replicate.
    pub code:         ActionCode,
    /// Displacement to hand to the controller, if the action moves.
    pub displacement: Option<Vec3>,
    /// `true` when the action is done and should be replaced.
    pub finished:     bool,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Idle { .. }       => ActionKind::Idle,
            Action::Wander { .. }     => ActionKind::Wander,
            Action::Patrol { .. }     => ActionKind::Patrol,
            Action::Gesture { .. }    => ActionKind::Gesture,
            Action::ReturnHome { .. } => ActionKind::ReturnHome,
        }
    }

    /// Seconds left on a timed action; `None` for goal-driven ones.
    pub fn remaining(&self) -> Option<f32> {
        match *self {
            Action::Idle { remaining, .. }
            | Action::Wander { remaining, .. }
            | Action::Gesture { remaining, .. } => Some(remaining),
            Action::Patrol { .. } | Action::ReturnHome { .. } => None,
        }
    }

    /// Build the forced return action used by the geofence.
    pub fn return_home(home: Vec3, speed: f32, max_distance: f32) -> Self {
        Action::ReturnHome { home, speed, max_distance }
    }
}

/// Advance `action` by `delta` seconds for an agent currently at `view`.
///
/// Pure: the returned action is the updated state, the [`Advance`] says what
/// to apply to the agent.
pub fn advance(action: Action, view: AgentView, delta: f32) -> (Action, Advance) {
    match action {
        Action::Idle { remaining, facing } => {
            let remaining = remaining - delta;
            let out = Advance {
                yaw:          facing.unwrap_or(view.yaw),
                code:         ActionCode::Idle,
                displacement: None,
                finished:     remaining <= 0.0,
            };
            (Action::Idle { remaining, facing }, out)
        }

        Action::Gesture { remaining, code, facing } => {
            let remaining = remaining - delta;
            let out = Advance {
                yaw:          facing.unwrap_or(view.yaw),
                code,
                displacement: None,
                finished:     remaining <= 0.0,
            };
            (Action::Gesture { remaining, code, facing }, out)
        }

        Action::Wander { remaining, yaw, speed, code } => {
            let remaining = remaining - delta;
            let out = Advance {
                yaw,
                code,
                displacement: Some(locomotion(heading(yaw) * speed * delta)),
                finished:     remaining <= 0.0,
            };
            (Action::Wander { remaining, yaw, speed, code }, out)
        }

        Action::Patrol { target, speed } => {
            let dist = planar_distance(view.position, target);
            if dist < ARRIVE_DISTANCE {
                let out = Advance {
                    yaw:          view.yaw,
                    code:         ActionCode::Walk,
                    displacement: None,
                    finished:     true,
                };
                return (action, out);
            }
            let yaw = yaw_toward(view.position, target);
            // Never step past the target; avoids oscillating around it at
            // coarse step rates.
            let step = (speed * delta).min(dist);
            let out = Advance {
                yaw,
                code:         ActionCode::Walk,
                displacement: Some(locomotion(heading(yaw) * step)),
                finished:     false,
            };
            (action, out)
        }

        Action::ReturnHome { home, speed, max_distance } => {
            if planar_distance(view.position, home) <= max_distance {
                let out = Advance {
                    yaw:          view.yaw,
                    code:         ActionCode::Walk,
                    displacement: None,
                    finished:     true,
                };
                return (action, out);
            }
            let yaw = yaw_toward(view.position, home);
            let out = Advance {
                yaw,
                code:         ActionCode::Walk,
                displacement: Some(locomotion(heading(yaw) * speed * delta)),
                finished:     false,
            };
            (action, out)
        }
    }
}

#[inline]
fn locomotion(planar: Vec3) -> Vec3 {
    Vec3::new(planar.x, GROUND_BIAS, planar.z)
}
