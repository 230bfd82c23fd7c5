use glam::Vec3;

use crate::api::types::{BodyId, CometId};
use crate::extensions::easing::{ease_vec3, smooth_damp, Easing};

/// A short-lived projectile flying from a random point to a snapshot of a body's position.
#[derive(Debug, Clone)]
pub struct Comet {
    pub id: CometId,
    pub start: Vec3,
    /// Where the target body was at launch. Not updated afterwards.
    pub target: Vec3,
    pub target_body: BodyId,
    /// Progress per second.
    pub speed: f32,
    progress: f32,
    alive: bool,
    /// Rendered position, lagging the raw path.
    position: Vec3,
    velocity: Vec3,
}

impl Comet {
    pub fn new(id: CometId, start: Vec3, target: Vec3, target_body: BodyId, speed: f32) -> Self {
        Self {
            id,
            start,
            target,
            target_body,
            speed,
            progress: 0.0,
            alive: true,
            position: start,
            velocity: Vec3::ZERO,
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Un-smoothed point on the path for the current progress.
    pub fn path_point(&self, easing: Easing) -> Vec3 {
        ease_vec3(self.start, self.target, self.progress, easing)
    }

    /// Advance along the path. Returns true if the comet finished during this call.
    pub fn advance(&mut self, dt: f32, easing: Easing, smooth_time: f32) -> bool {
        if !self.alive {
            return false;
        }
        self.progress = (self.progress + self.speed * dt).clamp(0.0, 1.0);
        let raw = self.path_point(easing);
        self.position = smooth_damp(self.position, raw, &mut self.velocity, smooth_time, dt);

        if self.progress >= 1.0 {
            self.alive = false;
            return true;
        }
        false
    }
}
