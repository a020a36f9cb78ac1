//! tavern — headless run of the three tavern NPCs.
//!
//! A bartender, a pig and a wizard are scheduled at 60 Hz.  Their snapshots
//! travel over lossy loopback hubs to two observers per agent: one watching
//! from the start, one joining halfway through.  Observers render at an
//! uneven frame rate, as a real client would.
//!
//! Pass a JSON array of `AgentProfile`s as the first argument to replace the
//! built-in presets.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use glam::Vec3;
use log::{info, warn};

use npc_behavior::ActionSelector;
use npc_core::math::planar_distance;
use npc_core::{AgentId, FixedStep, SimRng, SubscriberId};
use npc_motion::{ReplicaView, window_for};
use npc_replication::{EmoteTable, LoopbackHub};
use npc_sim::{
    AgentProfile, ChannelPublisher, Controller, GroundedController, Population, SchedulerBuilder,
};
use npc_trace::{CsvTraceWriter, TraceObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64 = 42;
const TICK_HZ:    u32 = 60;
const RUN_SECS:   f32 = 30.0;
const DROP_RATE:  f64 = 0.1;   // fraction of change messages lost per observer
const OUTPUT_DIR: &str = "output/tavern";

/// Render frame times cycle through roughly 144, 90, 60 and 40 fps.
const FRAME_SECS: [f32; 4] = [0.0069, 0.0111, 0.0167, 0.025];

// ── Profiles ──────────────────────────────────────────────────────────────────

fn preset_profiles(rng: &mut SimRng) -> Vec<AgentProfile> {
    let emotes = EmoteTable {
        walk:   Some("walk".into()),
        run:    Some("run".into()),
        custom: vec!["wave".into(), "bow".into(), "dance".into()],
    };
    vec![
        AgentProfile::bartender(),
        AgentProfile::pig(Vec3::new(4.0, 0.0, 3.0)),
        AgentProfile::wizard(Vec3::new(-3.0, 0.0, 5.0), emotes, rng),
    ]
}

fn load_profiles(path: &Path) -> Result<Vec<AgentProfile>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading profiles from {}", path.display()))?;
    let profiles: Vec<AgentProfile> = serde_json::from_str(&text)
        .with_context(|| format!("parsing profiles in {}", path.display()))?;
    Ok(profiles)
}

// ── Observers ─────────────────────────────────────────────────────────────────

/// One observer's view of one agent.
struct Watcher {
    agent:      AgentId,
    subscriber: Option<SubscriberId>,
    view:       ReplicaView,
}

impl Watcher {
    fn new(agent: AgentId, window: f32) -> Self {
        Self { agent, subscriber: None, view: ReplicaView::new(window) }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = SimRng::new(SEED);
    let profiles = match std::env::args().nth(1) {
        Some(path) => load_profiles(Path::new(&path))?,
        None => preset_profiles(&mut rng),
    };

    println!("=== tavern — replicated NPC motion ===");
    println!(
        "Agents: {}  |  Seconds: {RUN_SECS}  |  Tick: {TICK_HZ} Hz  |  Drop rate: {DROP_RATE}  |  Seed: {SEED}",
        profiles.len()
    );
    println!();

    // 1. Schedulers, one hub per agent.
    let mut population: Population<ActionSelector, GroundedController> = Population::new();
    let mut publisher: ChannelPublisher<LoopbackHub> = ChannelPublisher::new();
    let mut early = Vec::new();
    let mut late = Vec::new();

    for (i, profile) in profiles.into_iter().enumerate() {
        let id = AgentId(i as u32);
        let window = window_for(profile.publish_interval);
        let scheduler = SchedulerBuilder::new(profile).id(id).seed(SEED).build()?;
        population.insert(scheduler)?;

        let mut hub = LoopbackHub::with_drop_rate(DROP_RATE, rng.random());
        let mut watcher = Watcher::new(id, window);
        watcher.subscriber = Some(hub.subscribe());
        publisher.attach(id, hub);
        early.push(watcher);
        late.push(Watcher::new(id, window));
    }

    // 2. Output.
    let writer = CsvTraceWriter::new(Path::new(OUTPUT_DIR))?;
    let mut trace = TraceObserver::new(writer);

    // 3. Initialize.
    let ready = population.init_all(&mut (&mut publisher, &mut trace));
    for (id, state) in &ready {
        info!("{id} ready as '{}' ({})", state.identity.name, state.identity.rig.as_str());
    }
    if ready.len() < population.len() {
        warn!("{} agent(s) stayed dormant", population.len() - ready.len());
    }

    // 4. Run.
    let mut stepper = FixedStep::new(TICK_HZ);
    let total_ticks = stepper.ticks_for_secs(RUN_SECS);
    let late_join_tick = total_ticks / 2;
    let mut published = 0;
    let mut frames = 0u64;

    let t0 = Instant::now();
    while stepper.current_tick.0 < total_ticks {
        let frame = FRAME_SECS[frames as usize % FRAME_SECS.len()];
        frames += 1;

        for _ in 0..stepper.advance(frame) {
            published += population.step(stepper.step_secs, &mut (&mut publisher, &mut trace));
        }

        if stepper.current_tick.0 >= late_join_tick {
            for watcher in late.iter_mut().filter(|w| w.subscriber.is_none()) {
                if let Some(hub) = publisher.channel_mut(watcher.agent) {
                    watcher.subscriber = Some(hub.subscribe());
                }
            }
        }

        for watcher in early.iter_mut().chain(late.iter_mut()) {
            let Some(subscriber) = watcher.subscriber else { continue };
            if let Some(hub) = publisher.channel_mut(watcher.agent) {
                watcher.view.receive_all(&hub.poll(subscriber));
            }
            watcher.view.on_render_tick(frame);
        }
    }
    let elapsed = t0.elapsed();

    trace.finish();
    if let Some(e) = trace.take_error() {
        eprintln!("trace error: {e}");
    }

    // 5. Summary.
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ticks               : {}", stepper.current_tick.0);
    println!("  render frames       : {frames}");
    println!("  snapshots published : {published}");
    println!("  messages sent       : {}", publisher.sent());
    println!("  trace rows          : {}", trace.rows());
    println!();

    println!(
        "{:<6} {:<16} {:<10} {:<7} {:>9} {:>9} {:>9} {:>8}",
        "Agent", "Name", "Rig", "Code", "Applied", "Dropped", "Err", "Late err"
    );
    println!("{}", "-".repeat(82));
    for (watcher, joiner) in early.iter().zip(&late) {
        let Some(scheduler) = population.get(watcher.agent) else { continue };
        let authoritative = scheduler.controller().position();
        let error_of = |view: &ReplicaView| {
            view.visual()
                .map(|v| format!("{:.3}", planar_distance(v.position, authoritative)))
                .unwrap_or_else(|| "-".into())
        };
        let dropped = publisher
            .channel(watcher.agent)
            .map(|hub| hub.stats().dropped)
            .unwrap_or(0);
        println!(
            "{:<6} {:<16} {:<10} {:<7} {:>9} {:>9} {:>9} {:>8}",
            watcher.agent.0,
            scheduler.profile().identity.name,
            scheduler.profile().identity.rig.as_str(),
            scheduler.code().as_str(),
            watcher.view.stats().applied,
            dropped,
            error_of(&watcher.view),
            error_of(&joiner.view),
        );
    }

    Ok(())
}
