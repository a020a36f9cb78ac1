//! Agent profiles: everything needed to build one scheduler.

use glam::Vec3;
use npc_behavior::BehaviorConfig;
use npc_core::{ActionCode, SimRng};
use npc_replication::{AgentIdentity, EmoteTable, RigKind};
use serde::{Deserialize, Serialize};

use crate::{ControllerShape, SimError, SimResult};

/// Seconds between periodic snapshots (about three per second).
pub const DEFAULT_PUBLISH_INTERVAL: f32 = 0.33;

/// Number of wizard avatar variants the `wizard` preset picks from.
pub const WIZARD_VARIANTS: u32 = 60;

fn default_publish_interval() -> f32 {
    DEFAULT_PUBLISH_INTERVAL
}

/// A complete NPC description, loadable from JSON.
///
/// ```json
/// {
///   "identity": { "name": "Pig", "rig": "quadruped" },
///   "behavior": { "home": [3, 0, 6], "max_distance": 8, "return_speed": 1.2, "actions": [ ... ] },
///   "controller": { "radius": 0.25, "height": 0.6, "tag": "pig" }
/// }
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AgentProfile {
    pub identity:         AgentIdentity,
    pub behavior:         BehaviorConfig,
    #[serde(default = "default_publish_interval")]
    pub publish_interval: f32,
    #[serde(default)]
    pub controller:       ControllerShape,
}

impl AgentProfile {
    pub fn new(identity: AgentIdentity, behavior: BehaviorConfig) -> Self {
        Self {
            identity,
            behavior,
            publish_interval: DEFAULT_PUBLISH_INTERVAL,
            controller:       ControllerShape::default(),
        }
    }

    /// Check the behavior table, the publish interval, and the controller
    /// shape.  A missing avatar is not an error here; such an agent simply
    /// never initializes.
    pub fn validate(&self) -> SimResult<()> {
        self.behavior.validate()?;
        if !self.identity.emotes.fits_wire() {
            return Err(SimError::Config(format!(
                "at most {} custom emotes are addressable, got {}",
                usize::from(ActionCode::MAX_EMOTE) + 1,
                self.identity.emotes.custom.len()
            )));
        }
        if !(self.publish_interval.is_finite() && self.publish_interval > 0.0) {
            return Err(SimError::Config(format!(
                "publish_interval must be positive, got {}",
                self.publish_interval
            )));
        }
        if !(self.controller.radius > 0.0 && self.controller.height > 0.0) {
            return Err(SimError::Config(format!(
                "controller shape must be positive, got radius {} height {}",
                self.controller.radius, self.controller.height
            )));
        }
        Ok(())
    }

    /// Tavern bartender on a humanoid rig.
    pub fn bartender() -> Self {
        Self {
            controller: ControllerShape::new(0.3, 1.0).with_tag("bartender"),
            ..Self::new(AgentIdentity::new("Bartender", RigKind::Humanoid), BehaviorConfig::bartender())
        }
    }

    /// Pig on a quadruped rig, roaming around `home`.
    pub fn pig(home: Vec3) -> Self {
        Self {
            controller: ControllerShape::new(0.25, 0.6).with_tag("pig"),
            ..Self::new(AgentIdentity::new("Pig", RigKind::Quadruped), BehaviorConfig::pig(home))
        }
    }

    /// Avatar NPC with a randomly chosen wizard avatar and name.
    pub fn wizard(home: Vec3, emotes: EmoteTable, rng: &mut SimRng) -> Self {
        let n: u32 = rng.gen_range(1..=WIZARD_VARIANTS);
        let identity = AgentIdentity::new(format!("Wizard {n}"), RigKind::Avatar)
            .with_avatar(format!("asset://wizard_{n}.vrm"))
            .with_emotes(emotes);
        let behavior = BehaviorConfig::wanderer(home, identity.emotes.custom_slots());
        Self::new(identity, behavior)
    }
}
