//! Integration tests for npc-sim.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use npc_behavior::{Action, ActionKind, BehaviorConfig, BehaviorModel, SelectContext};
use npc_core::math::planar_distance;
use npc_core::{ActionCode, AgentId, AgentRng, SimRng};
use npc_replication::{AgentIdentity, EmoteTable, InitState, RigKind, Snapshot};

use crate::{
    AgentProfile, Controller, ControllerShape, GroundedController, NoopObserver, SchedulerBuilder,
    SchedulerObserver,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f32 = 1.0 / 60.0;

/// Observer that records every callback.
#[derive(Default)]
struct Recorder {
    inits:     Vec<(AgentId, InitState)>,
    publishes: Vec<(AgentId, f64, Snapshot)>,
    selected:  Vec<(AgentId, ActionKind)>,
    geofence:  Vec<(AgentId, f32)>,
}

impl SchedulerObserver for Recorder {
    fn on_init(&mut self, agent: AgentId, state: &InitState) {
        self.inits.push((agent, state.clone()));
    }
    fn on_publish(&mut self, agent: AgentId, time_secs: f64, snapshot: &Snapshot) {
        self.publishes.push((agent, time_secs, *snapshot));
    }
    fn on_action_selected(&mut self, agent: AgentId, action: &Action) {
        self.selected.push((agent, action.kind()));
    }
    fn on_geofence(&mut self, agent: AgentId, distance: f32) {
        self.geofence.push((agent, distance));
    }
}

/// Always walks toward +X, away from a home at the origin.
struct OutwardWander;

impl BehaviorModel for OutwardWander {
    fn select(&self, _rng: &mut AgentRng, _ctx: &SelectContext) -> Action {
        Action::Wander { remaining: 1.0, yaw: FRAC_PI_2, speed: 2.0, code: ActionCode::Walk }
    }
}

fn fenced_profile(max_distance: f32) -> AgentProfile {
    let mut behavior = BehaviorConfig::pig(Vec3::ZERO);
    behavior.max_distance = max_distance;
    behavior.return_speed = 1.5;
    AgentProfile::new(AgentIdentity::new("Runner", RigKind::Humanoid), behavior)
}

fn pig(id: u32, seed: u64) -> crate::Scheduler<npc_behavior::ActionSelector, GroundedController> {
    SchedulerBuilder::new(AgentProfile::pig(Vec3::new(1.0, 0.0, -2.0)))
        .id(AgentId(id))
        .seed(seed)
        .build()
        .unwrap()
}

fn avatar_without_asset() -> AgentProfile {
    AgentProfile::new(
        AgentIdentity::new("Wizard 3", RigKind::Avatar),
        BehaviorConfig::wanderer(Vec3::ZERO, 0),
    )
}

// ── SchedulerBuilder / AgentProfile ───────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use crate::SimError;

    use super::*;

    #[test]
    fn presets_build() {
        SchedulerBuilder::new(AgentProfile::bartender()).build().unwrap();
        SchedulerBuilder::new(AgentProfile::pig(Vec3::ZERO)).build().unwrap();
        let wizard = AgentProfile::wizard(Vec3::ZERO, EmoteTable::default(), &mut SimRng::new(1));
        SchedulerBuilder::new(wizard).build().unwrap();
    }

    #[test]
    fn non_positive_publish_interval_rejected() {
        let mut profile = AgentProfile::bartender();
        profile.publish_interval = 0.0;
        let result = SchedulerBuilder::new(profile).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn all_zero_weights_rejected() {
        let mut profile = AgentProfile::pig(Vec3::ZERO);
        for entry in &mut profile.behavior.actions {
            entry.weight = 0.0;
        }
        let result = SchedulerBuilder::new(profile).build();
        assert!(matches!(result, Err(SimError::Behavior(_))));
    }

    #[test]
    fn invalid_template_rejected_for_custom_model_too() {
        let mut profile = fenced_profile(2.5);
        profile.behavior.max_distance = -1.0;
        let controller = GroundedController::new(ControllerShape::default(), 0.0);
        let result = SchedulerBuilder::new(profile).build_with(OutwardWander, controller);
        assert!(matches!(result, Err(SimError::Behavior(_))));
    }

    #[test]
    fn wizard_identity_is_randomized_within_variants() {
        let mut rng = SimRng::new(9);
        for _ in 0..50 {
            let profile = AgentProfile::wizard(Vec3::ZERO, EmoteTable::default(), &mut rng);
            let n: u32 = profile.identity.name.strip_prefix("Wizard ").unwrap().parse().unwrap();
            assert!((1..=crate::WIZARD_VARIANTS).contains(&n));
            assert_eq!(profile.identity.avatar, Some(format!("asset://wizard_{n}.vrm")));
            assert_eq!(profile.identity.rig, RigKind::Avatar);
        }
    }

    #[test]
    fn wizard_gestures_follow_emote_table() {
        let emotes = EmoteTable { custom: vec!["a".into(), "b".into()], ..Default::default() };
        let profile = AgentProfile::wizard(Vec3::ZERO, emotes, &mut SimRng::new(1));
        let has_emote_gesture = profile.behavior.actions.iter().any(|a| {
            matches!(&a.template, npc_behavior::ActionTemplate::Gesture { codes, .. }
                if codes == &[ActionCode::Emote(0), ActionCode::Emote(1)])
        });
        assert!(has_emote_gesture);
    }

    #[test]
    fn oversized_emote_table_rejected() {
        let custom = (0..300).map(|i| format!("asset://emote_{i}.glb")).collect();
        let emotes = EmoteTable { custom, ..Default::default() };
        let profile = AgentProfile::wizard(Vec3::ZERO, emotes, &mut SimRng::new(1));
        profile.behavior.validate().unwrap();
        let result = SchedulerBuilder::new(profile).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn profile_loads_from_json_with_defaults() {
        let json = r#"{
            "identity": { "name": "Pig", "rig": "quadruped" },
            "behavior": {
                "home": [3.0, 0.0, 6.0],
                "max_distance": 8.0,
                "return_speed": 1.2,
                "actions": [
                    { "weight": 1.0, "kind": "idle", "duration": { "min": 1.0, "max": 3.0 } }
                ]
            }
        }"#;
        let profile: AgentProfile = serde_json::from_str(json).unwrap();
        profile.validate().unwrap();
        assert_eq!(profile.publish_interval, crate::DEFAULT_PUBLISH_INTERVAL);
        assert_eq!(profile.controller, ControllerShape::default());
        assert_eq!(profile.identity.avatar, None);
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod init_tests {
    use super::*;

    #[test]
    fn init_places_at_home_and_publishes_once() {
        let mut bartender = SchedulerBuilder::new(AgentProfile::bartender()).build().unwrap();
        let mut rec = Recorder::default();
        let state = bartender.init(&mut rec).unwrap();

        assert!(state.ready);
        assert!(bartender.is_ready());
        assert_eq!(state.snapshot.position, Vec3::new(4.5, 0.01, 0.0));
        assert_eq!(state.snapshot.yaw, -FRAC_PI_2);
        assert_eq!(state.snapshot.code, ActionCode::Idle);
        assert_eq!(state.identity.name, "Bartender");
        assert_eq!(rec.inits.len(), 1);
        assert_eq!(rec.selected.len(), 1, "first action picked at init");
        assert!(rec.publishes.is_empty());
    }

    #[test]
    fn second_init_is_ignored() {
        let mut pig = pig(0, 1);
        let mut rec = Recorder::default();
        assert!(pig.init(&mut rec).is_some());
        assert!(pig.init(&mut rec).is_none());
        assert_eq!(rec.inits.len(), 1);
    }

    #[test]
    fn step_before_init_does_nothing() {
        let mut pig = pig(0, 1);
        let mut rec = Recorder::default();
        for _ in 0..100 {
            assert!(pig.step(DT, &mut rec).is_none());
        }
        assert!(rec.publishes.is_empty() && rec.selected.is_empty());
        assert!(pig.action().is_none());
    }

    #[test]
    fn missing_avatar_is_a_silent_no_op() {
        let mut wizard = SchedulerBuilder::new(avatar_without_asset()).build().unwrap();
        let mut rec = Recorder::default();
        assert!(wizard.init(&mut rec).is_none());
        assert!(!wizard.is_ready());
        for _ in 0..60 {
            wizard.step(DT, &mut rec);
        }
        assert!(rec.inits.is_empty() && rec.publishes.is_empty());
    }
}

// ── Geofence ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geofence_tests {
    use super::*;

    #[test]
    fn outward_wander_stays_within_one_step_of_bound() {
        const MAX: f32 = 2.5;
        let controller = GroundedController::new(ControllerShape::default(), 0.0);
        let mut agent = SchedulerBuilder::new(fenced_profile(MAX))
            .build_with(OutwardWander, controller)
            .unwrap();
        let mut rec = Recorder::default();
        agent.init(&mut rec).unwrap();

        let step = 2.0 * DT;
        for tick in 0..(20 * 60) {
            agent.step(DT, &mut rec);
            let d = planar_distance(agent.controller().position(), Vec3::ZERO);
            assert!(d <= MAX + step + 1e-4, "tick {tick}: distance {d}");
        }
        assert!(!rec.geofence.is_empty(), "bound never reached");
        assert!(rec.geofence.iter().all(|&(_, d)| d > MAX));
        assert!(rec.selected.iter().any(|&(_, k)| k == ActionKind::ReturnHome));
    }

    #[test]
    fn return_home_walks_toward_home() {
        let controller = GroundedController::new(ControllerShape::default(), 0.0);
        let mut agent = SchedulerBuilder::new(fenced_profile(1.0))
            .build_with(OutwardWander, controller)
            .unwrap();
        agent.init(&mut NoopObserver).unwrap();

        let mut rec = Recorder::default();
        while rec.geofence.is_empty() {
            agent.step(DT, &mut rec);
        }
        assert_eq!(agent.action().map(Action::kind), Some(ActionKind::ReturnHome));
        assert_eq!(agent.code(), ActionCode::Walk);
        assert!((agent.yaw() + FRAC_PI_2).abs() < 1e-5, "faces home along -X");
    }

    #[test]
    fn agent_stays_on_ground() {
        let mut agent = pig(0, 3);
        agent.init(&mut NoopObserver).unwrap();
        for _ in 0..600 {
            agent.step(DT, &mut NoopObserver);
            assert_eq!(agent.controller().position().y, 0.0);
        }
    }
}

// ── Publish throttling ────────────────────────────────────────────────────────

#[cfg(test)]
mod publish_tests {
    use super::*;

    #[test]
    fn publishes_once_per_interval_crossing() {
        let mut agent = pig(0, 5);
        let mut rec = Recorder::default();
        agent.init(&mut rec).unwrap();

        let mut ticks = Vec::new();
        for tick in 1..=600 {
            if agent.step(DT, &mut rec).is_some() {
                ticks.push(tick);
            }
        }
        // 20 × (1/60) is the first multiple of the step above 0.33 s.
        assert_eq!(ticks.len(), 30);
        assert!(ticks.windows(2).all(|w| w[1] - w[0] == 20), "{ticks:?}");
        assert_eq!(rec.publishes.len(), 30);
    }

    #[test]
    fn never_more_than_one_per_step() {
        let mut agent = pig(0, 5);
        let mut rec = Recorder::default();
        agent.init(&mut rec).unwrap();
        for _ in 0..10 {
            agent.step(1.0, &mut rec);
        }
        assert_eq!(rec.publishes.len(), 10);
    }

    #[test]
    fn published_snapshot_is_current_state() {
        let mut agent = pig(0, 5);
        agent.init(&mut NoopObserver).unwrap();
        let mut last_time = 0.0;
        let mut rec = Recorder::default();
        for _ in 0..300 {
            if let Some(snapshot) = agent.step(DT, &mut rec) {
                assert_eq!(snapshot, agent.snapshot());
                let &(_, t, published) = rec.publishes.last().unwrap();
                assert_eq!(published, snapshot);
                assert!(t > last_time);
                last_time = t;
            }
        }
    }

    #[test]
    fn same_seed_replays_identically() {
        let run = |seed| {
            let mut agent = pig(4, seed);
            let mut rec = Recorder::default();
            agent.init(&mut rec).unwrap();
            for _ in 0..1200 {
                agent.step(DT, &mut rec);
            }
            rec.publishes.into_iter().map(|(_, _, s)| s).collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
        assert_ne!(run(42), run(43));
    }
}

// ── ChannelPublisher ──────────────────────────────────────────────────────────

#[cfg(test)]
mod publisher_tests {
    use npc_replication::{ChannelName, LoopbackHub, Message, decode};

    use crate::ChannelPublisher;

    use super::*;

    #[test]
    fn init_and_changes_reach_subscribers() {
        let mut agent = pig(0, 8);
        let mut publisher = ChannelPublisher::new();
        publisher.attach(agent.id(), LoopbackHub::new());
        let early = publisher.channel_mut(agent.id()).unwrap().subscribe();

        let state = agent.init(&mut publisher).unwrap();
        for _ in 0..60 {
            agent.step(DT, &mut publisher);
        }

        let hub = publisher.channel_mut(agent.id()).unwrap();
        let batch = hub.poll(early);
        assert_eq!(batch.len(), 1 + 3);
        assert_eq!(decode(&batch[0].payload).unwrap(), Message::Init(state.clone()));
        assert!(batch[1..].iter().all(|e| e.channel == ChannelName::Change));

        let late = hub.subscribe();
        let replay = hub.poll(late);
        assert_eq!(replay.len(), 1);
        assert_eq!(decode(&replay[0].payload).unwrap(), Message::Init(state));
        assert_eq!(publisher.sent(), 4);
    }

    #[test]
    fn agents_without_channel_are_ignored() {
        let mut agent = pig(1, 8);
        let mut publisher: ChannelPublisher<LoopbackHub> = ChannelPublisher::new();
        publisher.attach(AgentId(0), LoopbackHub::new());
        agent.init(&mut publisher).unwrap();
        for _ in 0..60 {
            agent.step(DT, &mut publisher);
        }
        assert_eq!(publisher.sent(), 0);
        assert!(!publisher.channel(AgentId(0)).unwrap().has_init());
    }

    #[test]
    fn combined_observers_both_see_events() {
        let mut agent = pig(0, 8);
        let mut publisher = ChannelPublisher::new();
        publisher.attach(agent.id(), LoopbackHub::new());
        let mut rec = Recorder::default();
        {
            let mut both = (&mut publisher, &mut rec);
            agent.init(&mut both).unwrap();
            for _ in 0..40 {
                agent.step(DT, &mut both);
            }
        }
        assert_eq!(rec.publishes.len(), 2);
        assert_eq!(publisher.sent(), 3);
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population_tests {
    use crate::{Population, SimError};

    use super::*;

    #[test]
    fn duplicate_ids_rejected() {
        let mut population = Population::new();
        population.insert(pig(0, 1)).unwrap();
        assert!(matches!(population.insert(pig(0, 2)), Err(SimError::DuplicateAgent(AgentId(0)))));
        assert_eq!(population.len(), 1);
    }

    #[test]
    fn callbacks_delivered_in_id_order() {
        let mut population = Population::new();
        for id in [2, 0, 1] {
            population.insert(pig(id, 7)).unwrap();
        }
        let mut rec = Recorder::default();
        let inits = population.init_all(&mut rec);
        assert_eq!(inits.iter().map(|(id, _)| id.0).collect::<Vec<_>>(), vec![0, 1, 2]);

        let mut published = 0;
        for _ in 0..20 {
            published += population.step(DT, &mut rec);
        }
        assert_eq!(published, 3);
        let order: Vec<u32> = rec.publishes.iter().map(|(id, _, _)| id.0).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn matches_individually_stepped_agents() {
        let mut population = Population::new();
        population.insert(pig(0, 11)).unwrap();
        population.insert(pig(1, 11)).unwrap();
        population.init_all(&mut NoopObserver);

        let mut solo = pig(1, 11);
        solo.init(&mut NoopObserver).unwrap();

        let mut rec = Recorder::default();
        let mut solo_rec = Recorder::default();
        for _ in 0..900 {
            population.step(DT, &mut rec);
            solo.step(DT, &mut solo_rec);
        }
        let from_population: Vec<Snapshot> = rec
            .publishes
            .iter()
            .filter(|(id, _, _)| *id == AgentId(1))
            .map(|&(_, _, s)| s)
            .collect();
        let from_solo: Vec<Snapshot> = solo_rec.publishes.iter().map(|&(_, _, s)| s).collect();
        assert_eq!(from_population, from_solo);
        assert_eq!(population.get(AgentId(1)).unwrap().snapshot(), solo.snapshot());
    }

    #[test]
    fn init_all_skips_agents_that_cannot_initialize() {
        let mut population = Population::new();
        population.insert(pig(0, 1)).unwrap();
        population
            .insert(SchedulerBuilder::new(avatar_without_asset()).id(AgentId(1)).build().unwrap())
            .unwrap();
        let inits = population.init_all(&mut NoopObserver);
        assert_eq!(inits.len(), 1);
        assert!(!population.get(AgentId(1)).unwrap().is_ready());
    }
}
