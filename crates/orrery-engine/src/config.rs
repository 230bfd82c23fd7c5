//! Construction-time configuration.
//!
//! Everything here is supplied once when the orrery is built and validated
//! up front; nothing is re-checked per frame. The structs deserialize from
//! JSON so the presentation layer can ship its own parameter tables.

use std::collections::HashSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::extensions::easing::Easing;

/// Whether a body sits at the anchor or orbits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRole {
    Central,
    #[default]
    Orbiting,
}

impl BodyRole {
    pub fn is_central(self) -> bool {
        self == BodyRole::Central
    }
}

/// Trig function driving the out-of-plane wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseProfile {
    #[default]
    Sine,
    Cosine,
}

/// Per-body parameter table entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    #[serde(default)]
    pub role: BodyRole,
    /// Semi-axis along X.
    #[serde(default)]
    pub radius_x: f32,
    /// Semi-axis along Z.
    #[serde(default)]
    pub radius_z: f32,
    /// Radians per second.
    #[serde(default)]
    pub angular_speed: f32,
    /// Start the body orbiting clockwise.
    #[serde(default)]
    pub retrograde: bool,
    /// Angle offset in radians at t = 0.
    #[serde(default)]
    pub phase: f32,
    #[serde(default)]
    pub vertical_amplitude: f32,
    #[serde(default)]
    pub vertical_frequency: f32,
    #[serde(default)]
    pub phase_profile: PhaseProfile,
    /// Radius of the bounding sphere.
    pub size: f32,
    #[serde(default)]
    pub has_ring: bool,
}

impl BodyConfig {
    /// A stationary body at the anchor point.
    pub fn central(name: impl Into<String>, size: f32) -> Self {
        Self {
            name: name.into(),
            role: BodyRole::Central,
            radius_x: 0.0,
            radius_z: 0.0,
            angular_speed: 0.0,
            retrograde: false,
            phase: 0.0,
            vertical_amplitude: 0.0,
            vertical_frequency: 0.0,
            phase_profile: PhaseProfile::Sine,
            size,
            has_ring: false,
        }
    }

    /// A body on a flat circular orbit.
    pub fn orbiting(name: impl Into<String>, radius: f32, angular_speed: f32, size: f32) -> Self {
        Self {
            role: BodyRole::Orbiting,
            radius_x: radius,
            radius_z: radius,
            angular_speed,
            ..Self::central(name, size)
        }
    }

    // -- Builder pattern --

    pub fn with_ellipse(mut self, radius_x: f32, radius_z: f32) -> Self {
        self.radius_x = radius_x;
        self.radius_z = radius_z;
        self
    }

    pub fn with_wave(mut self, amplitude: f32, frequency: f32, profile: PhaseProfile) -> Self {
        self.vertical_amplitude = amplitude;
        self.vertical_frequency = frequency;
        self.phase_profile = profile;
        self
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_ring(mut self) -> Self {
        self.has_ring = true;
        self
    }

    pub fn retrograde(mut self) -> Self {
        self.retrograde = true;
        self
    }

    /// Horizontal annulus swept by this body, widened by its size.
    pub fn envelope(&self) -> (f32, f32) {
        let inner = self.radius_x.min(self.radius_z);
        let outer = self.radius_x.max(self.radius_z);
        (inner - self.size, outer + self.size)
    }
}

/// Comet spawning and motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CometConfig {
    /// Seconds between launches.
    pub spawn_interval: f32,
    /// Seconds between dead-comet sweeps.
    pub reap_interval: f32,
    /// Progress per second, sampled uniformly per comet.
    pub speed_range: (f32, f32),
    /// Half-size of the cube start positions are drawn from.
    pub spawn_extent: f32,
    /// Lag of the rendered position behind the raw path.
    pub smooth_time: f32,
    pub easing: Easing,
}

impl Default for CometConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 15.0,
            reap_interval: 0.5,
            speed_range: (0.15, 0.35),
            spawn_extent: 110.0,
            smooth_time: 0.25,
            easing: Easing::Linear,
        }
    }
}

/// Allowed camera distance from its look target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
    pub min_distance: f32,
    pub max_distance: f32,
}

impl ZoomBounds {
    pub const fn new(min_distance: f32, max_distance: f32) -> Self {
        Self { min_distance, max_distance }
    }

    fn validate(&self, what: &'static str) -> ConfigResult<()> {
        if !(self.min_distance >= 0.0) || !(self.max_distance >= self.min_distance) {
            return Err(ConfigError::InvalidBounds {
                what,
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Offset from the focused body to the camera.
    pub standoff: Vec3,
    /// Fraction of the remaining distance covered per tick while focused.
    pub smoothing_factor: f32,
    /// Distance from the origin in the overview pose.
    pub overview_distance: f32,
    pub overview_bounds: ZoomBounds,
    pub focused_bounds: ZoomBounds,
    /// Radians per second around the vertical axis.
    pub auto_rotate_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            standoff: Vec3::new(0.0, 0.0, 8.0),
            smoothing_factor: 0.05,
            overview_distance: 120.0,
            overview_bounds: ZoomBounds::new(10.0, 120.0),
            focused_bounds: ZoomBounds::new(3.0, 30.0),
            // 0.3 "orbit-controls units": one revolution every 200 s.
            auto_rotate_rate: 0.3 * std::f32::consts::TAU / 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Seconds a flash stays raised.
    pub flash_duration: f32,
    /// Seconds a pair is ignored after resolving. 0 disables the cooldown.
    pub cooldown: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            flash_duration: 0.6,
            cooldown: 0.0,
        }
    }
}

/// Complete orrery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrreryConfig {
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub comets: CometConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub collisions: CollisionConfig,
    /// Hide every other body while one is being inspected.
    #[serde(default = "default_isolate")]
    pub isolate_focused: bool,
    /// Rendered scale multiplier for the hovered body.
    #[serde(default = "default_hover_scale")]
    pub hover_scale: f32,
    /// Seed for comet randomness.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_isolate() -> bool {
    true
}

fn default_hover_scale() -> f32 {
    1.1
}

fn default_seed() -> u64 {
    42
}

impl OrreryConfig {
    pub fn new(bodies: Vec<BodyConfig>) -> Self {
        Self {
            bodies,
            comets: CometConfig::default(),
            camera: CameraConfig::default(),
            collisions: CollisionConfig::default(),
            isolate_focused: default_isolate(),
            hover_scale: default_hover_scale(),
            seed: default_seed(),
        }
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject configurations the simulation cannot run sensibly.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.bodies.is_empty() {
            return Err(ConfigError::NoBodies);
        }

        let mut names = HashSet::new();
        let mut central: Option<&str> = None;
        for body in &self.bodies {
            if !names.insert(body.name.as_str()) {
                return Err(ConfigError::DuplicateName(body.name.clone()));
            }
            if !(body.size > 0.0) {
                return Err(ConfigError::NonPositiveSize {
                    name: body.name.clone(),
                    size: body.size,
                });
            }
            if body.radius_x < 0.0 || body.radius_z < 0.0 {
                return Err(ConfigError::NegativeRadius { name: body.name.clone() });
            }
            if body.role == BodyRole::Central {
                if let Some(first) = central {
                    return Err(ConfigError::MultipleCentral(first.to_string(), body.name.clone()));
                }
                central = Some(&body.name);
            }
        }

        let (min, max) = self.comets.speed_range;
        if !(min > 0.0) || !(max >= min) {
            return Err(ConfigError::InvalidSpeedRange { min, max });
        }
        positive_interval("comet spawn", self.comets.spawn_interval)?;
        positive_interval("comet reap", self.comets.reap_interval)?;
        if !(self.comets.smooth_time > 0.0) {
            return Err(ConfigError::InvalidDuration {
                what: "comet smooth time",
                value: self.comets.smooth_time,
            });
        }
        if !(self.comets.spawn_extent >= 0.0) {
            return Err(ConfigError::InvalidDuration {
                what: "comet spawn extent",
                value: self.comets.spawn_extent,
            });
        }

        let smoothing = self.camera.smoothing_factor;
        if !(smoothing > 0.0 && smoothing <= 1.0) {
            return Err(ConfigError::InvalidSmoothing(smoothing));
        }
        self.camera.overview_bounds.validate("overview")?;
        self.camera.focused_bounds.validate("focused")?;

        if !(self.collisions.flash_duration > 0.0) {
            return Err(ConfigError::InvalidDuration {
                what: "flash duration",
                value: self.collisions.flash_duration,
            });
        }
        if !(self.collisions.cooldown >= 0.0) {
            return Err(ConfigError::InvalidDuration {
                what: "collision cooldown",
                value: self.collisions.cooldown,
            });
        }
        Ok(())
    }

    /// Pairs of orbiting bodies whose envelopes overlap, i.e. which can touch
    /// without any direction reversal having happened.
    pub fn overlapping_envelopes(&self) -> Vec<(String, String)> {
        let orbiting: Vec<&BodyConfig> = self
            .bodies
            .iter()
            .filter(|b| b.role == BodyRole::Orbiting)
            .collect();

        let mut overlaps = Vec::new();
        for (i, a) in orbiting.iter().enumerate() {
            let (a_lo, a_hi) = a.envelope();
            for b in &orbiting[i + 1..] {
                let (b_lo, b_hi) = b.envelope();
                if a_lo < b_hi && b_lo < a_hi {
                    overlaps.push((a.name.clone(), b.name.clone()));
                }
            }
        }
        overlaps
    }
}

impl Default for OrreryConfig {
    fn default() -> Self {
        crate::layouts::desktop()
    }
}

fn positive_interval(what: &'static str, value: f32) -> ConfigResult<()> {
    if !(value > 0.0) {
        return Err(ConfigError::NonPositiveInterval { what, value });
    }
    Ok(())
}
