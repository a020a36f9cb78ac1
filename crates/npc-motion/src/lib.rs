//! `npc-motion` — the observing side of replicated NPC motion.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`lerp`]         | `BufferedLerp`, `SampleBuffer`                            |
//! | [`pose`]         | `PoseDriver` trait, `Rig` / `Pose` over the built-in rigs |
//! | [`humanoid`]     | `HumanoidRig` — shoulders, elbows, hips, knees, bob       |
//! | [`quadruped`]    | `QuadrupedRig` — gait wobble, bob, tail, diagonal legs    |
//! | [`avatar`]       | `AvatarRig` — code → emote clip                           |
//! | [`interpolator`] | `MotionInterpolator`, `VisualState`, `window_for`         |
//! | [`view`]         | `ReplicaView` — decodes channel traffic for one agent     |
//!
//! # Render loop
//!
//! ```text
//! on_snapshot(s)       → lerp.push(s.position); yaw = s.yaw; code = s.code
//! on_render_tick(dt)   → position = lerp.update(dt); t += dt; pose = drive_pose(code, t)
//! ```

pub mod avatar;
pub mod humanoid;
pub mod interpolator;
pub mod lerp;
pub mod pose;
pub mod quadruped;
pub mod view;


pub use avatar::{AvatarPose, AvatarRig};
pub use humanoid::{HumanoidPose, HumanoidRig};
pub use interpolator::{MotionInterpolator, VisualState, WINDOW_FACTOR, window_for};
pub use lerp::{BufferedLerp, SAMPLE_CAPACITY, Sample, SampleBuffer};
pub use pose::{Pose, PoseDriver, Rig};
pub use quadruped::{Gait, QuadrupedPose, QuadrupedRig};
pub use view::{ReplicaView, ViewStats};
