//! Observer-side driver for one replicated agent's visual.

use glam::Vec3;
use npc_core::ActionCode;
use npc_replication::Snapshot;

use crate::{BufferedLerp, PoseDriver};

/// Interpolation window as a multiple of the publish interval.  Slightly
/// over one interval, so the visual just catches up as the next snapshot
/// arrives.
pub const WINDOW_FACTOR: f32 = 1.2;

/// Interpolation window for a given publish interval.
#[inline]
pub fn window_for(publish_interval: f32) -> f32 {
    publish_interval * WINDOW_FACTOR
}

/// What to render this frame.
#[derive(Clone, PartialEq, Debug)]
pub struct VisualState<P> {
    pub position: Vec3,
    pub yaw:      f32,
    pub code:     ActionCode,
    pub pose:     P,
}

/// Turns a sparse stream of [`Snapshot`]s into per-frame visual state.
///
/// Position is smoothed by a [`BufferedLerp`]; yaw and action code snap to
/// the latest snapshot; the pose is recomputed from scratch every render
/// tick from the code and accumulated local time.
#[derive(Clone, Debug)]
pub struct MotionInterpolator<D: PoseDriver> {
    lerp:       BufferedLerp,
    driver:     D,
    local_time: f32,
    visual:     VisualState<D::Pose>,
}

impl<D: PoseDriver> MotionInterpolator<D> {
    /// Start at rest on the initial snapshot.
    pub fn new(initial: &Snapshot, driver: D, window: f32) -> Self {
        let pose = driver.drive_pose(initial.code, 0.0);
        Self {
            lerp: BufferedLerp::new(initial.position, window),
            driver,
            local_time: 0.0,
            visual: VisualState {
                position: initial.position,
                yaw:      initial.yaw,
                code:     initial.code,
                pose,
            },
        }
    }

    pub fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.lerp.push(snapshot.position);
        self.visual.yaw = snapshot.yaw;
        self.visual.code = snapshot.code;
    }

    /// Advance by one render frame of `delta` seconds.
    pub fn on_render_tick(&mut self, delta: f32) -> &VisualState<D::Pose> {
        self.visual.position = self.lerp.update(delta);
        self.local_time += delta;
        self.visual.pose = self.driver.drive_pose(self.visual.code, self.local_time);
        &self.visual
    }

    pub fn visual(&self) -> &VisualState<D::Pose> {
        &self.visual
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn lerp(&self) -> &BufferedLerp {
        &self.lerp
    }

    /// Seconds of render time since creation.
    pub fn local_time(&self) -> f32 {
        self.local_time
    }
}
