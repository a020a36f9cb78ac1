//! Planar heading helpers on top of `glam::Vec3`.
//!
//! NPCs live on a ground plane: `y` is up and headings are yaw angles about
//! the `y` axis.  Yaw `0` faces `+Z`; positive yaw turns toward `+X`, so
//!
//!   heading(yaw) = (sin yaw, 0, cos yaw)
//!
//! and `yaw_toward` is its inverse (`atan2(dx, dz)`).

use glam::Vec3;

/// Full turn in radians.
pub const TAU: f32 = std::f32::consts::TAU;

/// Unit direction on the ground plane for `yaw`.
#[inline]
pub fn heading(yaw: f32) -> Vec3 {
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(sin, 0.0, cos)
}

/// Yaw that faces from `from` toward `to`, ignoring height.
///
/// Returns `0.0` when the two points coincide on the ground plane.
#[inline]
pub fn yaw_toward(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx == 0.0 && dz == 0.0 {
        return 0.0;
    }
    dx.atan2(dz)
}

/// Distance between `a` and `b` on the ground plane (XZ).
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt()
}
