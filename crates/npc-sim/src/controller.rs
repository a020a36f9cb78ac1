//! The host physics controller seam.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A movable body owned by one scheduler.
///
/// The host engine resolves collisions inside [`move_by`][Self::move_by];
/// the scheduler only ever reads the position back.
pub trait Controller: Send {
    fn position(&self) -> Vec3;

    /// Teleport without collision (used once at initialization).
    fn set_position(&mut self, position: Vec3);

    /// Move by `displacement`, letting the host resolve collisions.
    fn move_by(&mut self, displacement: Vec3);
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn set_position(&mut self, position: Vec3) {
        (**self).set_position(position)
    }

    fn move_by(&mut self, displacement: Vec3) {
        (**self).move_by(displacement)
    }
}

/// Capsule dimensions requested from the host when creating a controller.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ControllerShape {
    pub radius: f32,
    pub height: f32,
    /// Collision tag, if the host supports them.
    #[serde(default)]
    pub tag:    Option<String>,
}

impl Default for ControllerShape {
    fn default() -> Self {
        Self { radius: 0.4, height: 1.0, tag: None }
    }
}

impl ControllerShape {
    pub fn new(radius: f32, height: f32) -> Self {
        Self { radius, height, tag: None }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Flat-ground controller: horizontal motion is applied as-is and the body
/// never sinks below `ground`.
#[derive(Clone, Debug)]
pub struct GroundedController {
    position: Vec3,
    ground:   f32,
    shape:    ControllerShape,
}

impl GroundedController {
    pub fn new(shape: ControllerShape, ground: f32) -> Self {
        Self { position: Vec3::new(0.0, ground, 0.0), ground, shape }
    }

    pub fn ground(&self) -> f32 {
        self.ground
    }

    pub fn shape(&self) -> &ControllerShape {
        &self.shape
    }
}

impl Controller for GroundedController {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = Vec3::new(position.x, position.y.max(self.ground), position.z);
    }

    fn move_by(&mut self, displacement: Vec3) {
        let p = self.position + displacement;
        self.position = Vec3::new(p.x, p.y.max(self.ground), p.z);
    }
}
