//! Per-agent-type behavior configuration and the built-in presets.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use npc_core::ActionCode;
use serde::{Deserialize, Serialize};

use crate::{ActionTemplate, BehaviorError, BehaviorResult, FacingRule, Span, WeightedAction};

/// Everything the scheduler needs to know about how one kind of NPC behaves.
///
/// Loaded from JSON by applications, or built from one of the presets.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// Spawn point and geofence centre.
    pub home: Vec3,

    /// Soft bound radius around `home` (ground plane).
    pub max_distance: f32,

    /// Speed of the forced return when the bound is exceeded.
    pub return_speed: f32,

    /// Yaw published with the initial state.
    #[serde(default)]
    pub initial_yaw: f32,

    /// Weighted action table.
    pub actions: Vec<WeightedAction>,
}

impl BehaviorConfig {
    /// Check ranges, speeds, and weights.
    pub fn validate(&self) -> BehaviorResult<()> {
        if !self.home.is_finite() {
            return Err(BehaviorError::Config("home must be finite".into()));
        }
        if !positive(self.max_distance) {
            return Err(BehaviorError::Config(format!(
                "max_distance must be positive, got {}",
                self.max_distance
            )));
        }
        if !positive(self.return_speed) {
            return Err(BehaviorError::Config(format!(
                "return_speed must be positive, got {}",
                self.return_speed
            )));
        }
        if self.actions.is_empty() {
            return Err(BehaviorError::Config("action table is empty".into()));
        }
        if !self.initial_yaw.is_finite() {
            return Err(BehaviorError::Config("initial_yaw must be finite".into()));
        }
        for (i, entry) in self.actions.iter().enumerate() {
            if !(entry.weight.is_finite() && entry.weight >= 0.0) {
                return Err(BehaviorError::Template {
                    index:  i,
                    reason: format!("weight must be finite and non-negative, got {}", entry.weight),
                });
            }
            validate_template(i, &entry.template)?;
        }
        Ok(())
    }

    /// Stationed bartender behind the tavern bar: wipes glasses, paces a
    /// little along the bar, glances toward the door to serve.
    pub fn bartender() -> Self {
        let facing_bar = FacingRule::Yaw(-FRAC_PI_2);
        Self {
            home:         Vec3::new(4.5, 0.01, 0.0),
            max_distance: 2.5,
            return_speed: 1.5,
            initial_yaw:  -FRAC_PI_2,
            actions:      vec![
                WeightedAction::new(0.35, ActionTemplate::Idle {
                    duration: Span::new(2.0, 5.0),
                    facing:   facing_bar,
                }),
                WeightedAction::new(0.25, ActionTemplate::Gesture {
                    duration: Span::new(2.0, 5.0),
                    codes:    vec![ActionCode::Clean],
                    facing:   facing_bar,
                }),
                WeightedAction::new(0.2, ActionTemplate::Patrol {
                    offset: Vec3::new(0.0, 0.0, 1.0),
                    speed:  1.0,
                }),
                WeightedAction::new(0.2, ActionTemplate::Gesture {
                    duration: Span::new(1.0, 2.0),
                    codes:    vec![ActionCode::Serve],
                    facing:   FacingRule::Point(Vec3::new(0.0, 0.0, -4.0)),
                }),
            ],
        }
    }

    /// Roaming pig: idles and trots around its spawn point.
    pub fn pig(home: Vec3) -> Self {
        Self {
            home,
            max_distance: 8.0,
            return_speed: 1.2,
            initial_yaw:  0.0,
            actions:      vec![
                WeightedAction::new(1.0, ActionTemplate::Idle {
                    duration: Span::new(1.0, 3.0),
                    facing:   FacingRule::Keep,
                }),
                WeightedAction::new(1.0, ActionTemplate::Wander {
                    duration:   Span::new(1.0, 4.0),
                    walk_speed: 1.2,
                    run_speed:  2.2,
                    run_chance: 0.5,
                }),
            ],
        }
    }

    /// Avatar NPC that wanders and plays one of `emote_slots` custom emotes.
    ///
    /// With no custom emotes the gesture entry is never drawn.
    pub fn wanderer(home: Vec3, emote_slots: u8) -> Self {
        Self {
            home,
            max_distance: 10.0,
            return_speed: 2.0,
            initial_yaw:  0.0,
            actions:      vec![
                WeightedAction::new(1.0, ActionTemplate::Gesture {
                    duration: Span::new(1.0, 5.0),
                    codes:    (0..emote_slots).map(ActionCode::Emote).collect(),
                    facing:   FacingRule::Keep,
                }),
                WeightedAction::new(1.0, ActionTemplate::Wander {
                    duration:   Span::new(1.0, 5.0),
                    walk_speed: 2.0,
                    run_speed:  4.0,
                    run_chance: 0.5,
                }),
            ],
        }
    }
}

fn validate_template(index: usize, template: &ActionTemplate) -> BehaviorResult<()> {
    let bad = |what: &str| BehaviorError::Template { index, reason: what.to_owned() };
    match template {
        ActionTemplate::Idle { duration, .. } => {
            if !duration.is_valid() {
                return Err(bad("duration range is invalid"));
            }
        }
        ActionTemplate::Gesture { duration, codes, .. } => {
            if !duration.is_valid() {
                return Err(bad("duration range is invalid"));
            }
            if codes.iter().any(|c| !c.is_encodable()) {
                return Err(bad("emote slot has no byte form"));
            }
        }
        ActionTemplate::Wander { duration, walk_speed, run_speed, run_chance } => {
            if !duration.is_valid() {
                return Err(bad("duration range is invalid"));
            }
            if !(positive(*walk_speed) && positive(*run_speed)) {
                return Err(bad("speeds must be finite and positive"));
            }
            if !(0.0..=1.0).contains(run_chance) {
                return Err(bad("run_chance must be within [0, 1]"));
            }
        }
        ActionTemplate::Patrol { offset, speed } => {
            if !offset.is_finite() || offset.min_element() < 0.0 {
                return Err(bad("patrol offset must be finite and non-negative"));
            }
            if !positive(*speed) {
                return Err(bad("speed must be finite and positive"));
            }
        }
    }
    Ok(())
}

#[inline]
fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}
