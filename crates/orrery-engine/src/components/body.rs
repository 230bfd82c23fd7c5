use std::f64::consts::TAU;

use glam::Vec3;

use crate::api::types::BodyId;
use crate::config::{BodyConfig, BodyRole, PhaseProfile};
use crate::systems::color::Rgb;

/// Direction of travel along the orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Counter-clockwise seen from +Y (sign +1).
    #[default]
    Prograde,
    /// Clockwise seen from +Y (sign -1).
    Retrograde,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Prograde => 1.0,
            Direction::Retrograde => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Prograde => Direction::Retrograde,
            Direction::Retrograde => Direction::Prograde,
        }
    }
}

/// Orbital parameters. Position is a pure function of these and time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    pub radius_x: f32,
    pub radius_z: f32,
    pub angular_speed: f32,
    pub direction: Direction,
    /// Angle offset in radians.
    pub phase: f64,
    pub vertical_amplitude: f32,
    pub vertical_frequency: f32,
    pub profile: PhaseProfile,
}

impl OrbitParams {
    pub fn from_config(config: &BodyConfig) -> Self {
        Self {
            radius_x: config.radius_x,
            radius_z: config.radius_z,
            angular_speed: config.angular_speed,
            direction: if config.retrograde {
                Direction::Retrograde
            } else {
                Direction::Prograde
            },
            phase: config.phase as f64,
            vertical_amplitude: config.vertical_amplitude,
            vertical_frequency: config.vertical_frequency,
            profile: config.phase_profile,
        }
    }

    /// A circular, flat orbit. Mostly useful in tests.
    pub fn circular(radius: f32, angular_speed: f32) -> Self {
        Self {
            radius_x: radius,
            radius_z: radius,
            angular_speed,
            direction: Direction::Prograde,
            phase: 0.0,
            vertical_amplitude: 0.0,
            vertical_frequency: 0.0,
            profile: PhaseProfile::Sine,
        }
    }

    /// Both semi-axes are zero: the body sits on the anchor.
    pub fn is_stationary(&self) -> bool {
        self.radius_x == 0.0 && self.radius_z == 0.0
    }

    /// In-plane angle at time `t`.
    pub fn angle_at(&self, t: f64) -> f64 {
        self.angular_speed as f64 * self.direction.sign() * t + self.phase
    }
}

/// A simulated body: fat record, mutated in place by the systems that own each field.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    /// Unique display name.
    pub name: String,
    pub role: BodyRole,
    orbit: OrbitParams,
    /// Radius of the bounding sphere.
    pub size: f32,
    pub has_ring: bool,
    /// Derived every tick from the clock. Not authoritative.
    pub position: Vec3,
    /// Seconds of flash left; zero when not flashing.
    flash_remaining: f32,
    pub hovered: bool,
    pub visible: bool,
    /// Neutral until a sampled color arrives.
    pub color: Rgb,
}

impl Body {
    pub fn new(id: BodyId, config: &BodyConfig) -> Self {
        let orbit = match config.role {
            BodyRole::Central => OrbitParams::circular(0.0, 0.0),
            BodyRole::Orbiting => OrbitParams::from_config(config),
        };
        Self {
            id,
            name: config.name.clone(),
            role: config.role,
            orbit,
            size: config.size,
            has_ring: config.has_ring,
            position: Vec3::ZERO,
            flash_remaining: 0.0,
            hovered: false,
            visible: true,
            color: Rgb::NEUTRAL,
        }
    }

    pub fn orbit(&self) -> &OrbitParams {
        &self.orbit
    }

    pub fn direction(&self) -> Direction {
        self.orbit.direction
    }

    pub fn is_central(&self) -> bool {
        self.role == BodyRole::Central
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_remaining > 0.0
    }

    pub fn flash_remaining(&self) -> f32 {
        self.flash_remaining
    }

    /// Size as drawn, including the hover highlight.
    pub fn rendered_size(&self, hover_scale: f32) -> f32 {
        if self.hovered {
            self.size * hover_scale
        } else {
            self.size
        }
    }

    /// Flip the direction of travel at time `t`.
    ///
    /// The phase is re-anchored so the angle at `t` is unchanged: the body turns
    /// around where it is instead of jumping to its mirror image.
    pub(crate) fn reverse_direction(&mut self, t: f64) {
        let speed = self.orbit.angular_speed as f64 * self.orbit.direction.sign();
        self.orbit.phase = (self.orbit.phase + 2.0 * speed * t).rem_euclid(TAU);
        self.orbit.direction = self.orbit.direction.reversed();
    }

    /// Raise (or restart) the flash.
    pub(crate) fn raise_flash(&mut self, duration: f32) {
        self.flash_remaining = duration;
    }

    /// Count the flash down. Returns true when it cleared during this call.
    pub(crate) fn decay_flash(&mut self, dt: f32) -> bool {
        if self.flash_remaining <= 0.0 {
            return false;
        }
        self.flash_remaining = (self.flash_remaining - dt).max(0.0);
        self.flash_remaining == 0.0
    }
}
