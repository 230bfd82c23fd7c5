use glam::Vec3;

use crate::api::types::BodyId;
use crate::config::{CameraConfig, ZoomBounds};
use crate::core::registry::BodyRegistry;

/// What the camera is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraState {
    /// Slowly circling the whole system.
    #[default]
    Overview,
    /// Following one body.
    Focused(BodyId),
}

/// Camera pose handed to the presentation layer each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub bounds: ZoomBounds,
    pub auto_rotate: bool,
}

/// Two-state camera: an auto-rotating overview, or a smoothed follow of one body.
pub struct CameraController {
    config: CameraConfig,
    state: CameraState,
    pose: CameraPose,
    /// Overview rotation about +Y, radians.
    azimuth: f32,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        let pose = Self::default_pose(&config);
        Self {
            config,
            state: CameraState::Overview,
            pose,
            azimuth: 0.0,
        }
    }

    /// Overview pose: on +Z at the overview distance, looking at the origin.
    pub fn default_pose(config: &CameraConfig) -> CameraPose {
        CameraPose {
            position: Vec3::new(0.0, 0.0, config.overview_distance),
            look_at: Vec3::ZERO,
            bounds: config.overview_bounds,
            auto_rotate: true,
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn focused(&self) -> Option<BodyId> {
        match self.state {
            CameraState::Focused(id) => Some(id),
            CameraState::Overview => None,
        }
    }

    /// Focus on `body`. Replaces any current focus without passing through the
    /// overview. An unknown id is treated as a deselect; returns false then.
    pub fn select(&mut self, body: BodyId, registry: &BodyRegistry) -> bool {
        if !registry.contains(body) {
            log::debug!("select of unknown body {:?}, returning to overview", body);
            self.deselect();
            return false;
        }
        self.state = CameraState::Focused(body);
        self.pose.bounds = self.config.focused_bounds;
        self.pose.auto_rotate = false;
        true
    }

    /// Back to the overview. The pose resets at once rather than easing back.
    /// Already in the overview, this leaves the rotation where it is.
    pub fn deselect(&mut self) {
        if self.state == CameraState::Overview {
            return;
        }
        self.state = CameraState::Overview;
        self.azimuth = 0.0;
        self.pose = Self::default_pose(&self.config);
    }

    /// Advance one tick. Returns false if the focused body vanished and the
    /// camera fell back to the overview.
    pub fn update(&mut self, dt: f32, registry: &BodyRegistry) -> bool {
        match self.state {
            CameraState::Overview => {
                self.azimuth = (self.azimuth + self.config.auto_rotate_rate * dt)
                    .rem_euclid(std::f32::consts::TAU);
                let d = self.config.overview_distance;
                self.pose.position = Vec3::new(d * self.azimuth.sin(), 0.0, d * self.azimuth.cos());
                self.pose.look_at = Vec3::ZERO;
                true
            }
            CameraState::Focused(id) => {
                let Some(body) = registry.get(id) else {
                    log::debug!("focused body {:?} is gone, returning to overview", id);
                    self.deselect();
                    return false;
                };
                let goal = body.position + self.config.standoff;
                self.pose.position += (goal - self.pose.position) * self.config.smoothing_factor;
                self.pose.look_at = body.position;
                true
            }
        }
    }
}
