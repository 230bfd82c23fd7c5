//! Orbit model.
//!
//! Positions are closed-form functions of elapsed time, so the simulation can be
//! restarted from any timestamp and replays bit-for-bit. Time and angles are f64;
//! the result is converted to f32 only at the end.

use glam::Vec3;

use crate::components::body::OrbitParams;
use crate::config::PhaseProfile;
use crate::core::registry::BodyRegistry;

/// Position of a body with `params` at elapsed time `t`, relative to `anchor`.
pub fn orbit_position(params: &OrbitParams, t: f64, anchor: Vec3) -> Vec3 {
    if params.is_stationary() {
        return anchor;
    }

    let angle = params.angle_at(t);
    let x = params.radius_x as f64 * angle.cos();
    let z = params.radius_z as f64 * angle.sin();

    let y = if params.vertical_amplitude == 0.0 {
        0.0
    } else {
        let wave = params.vertical_frequency as f64 * t;
        let trig = match params.profile {
            PhaseProfile::Sine => wave.sin(),
            PhaseProfile::Cosine => wave.cos(),
        };
        params.vertical_amplitude as f64 * trig
    };

    anchor + Vec3::new(x as f32, y as f32, z as f32)
}

/// Refresh every body's position for time `t`. Central bodies sit on the anchor.
pub fn update_positions(registry: &mut BodyRegistry, t: f64, anchor: Vec3) {
    for body in registry.iter_mut() {
        body.position = if body.is_central() {
            anchor
        } else {
            orbit_position(body.orbit(), t, anchor)
        };
    }
}

/// Sample the in-plane ellipse as a closed polyline (for drawing orbit rings).
pub fn orbit_path(params: &OrbitParams, samples: usize, anchor: Vec3) -> Vec<Vec3> {
    if params.is_stationary() || samples == 0 {
        return Vec::new();
    }
    let mut points = Vec::with_capacity(samples);
    for i in 0..samples {
        let angle = (i as f32 / samples as f32) * std::f32::consts::TAU;
        points.push(anchor + Vec3::new(params.radius_x * angle.cos(), 0.0, params.radius_z * angle.sin()));
    }
    points
}
