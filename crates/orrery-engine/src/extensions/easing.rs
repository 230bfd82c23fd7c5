// extensions/easing.rs
//
// Pure easing and smoothing functions used by comets and the camera.
// No dependencies on bodies or the registry; pure math.

use std::f32::consts::PI;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow end.
    CubicOut,
    SineInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1]. Every variant maps 0 to 0 and 1 to 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two points.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Interpolate between two points along an easing curve.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    lerp_vec3(a, b, easing.apply(t))
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` is the caller-owned spring state. `smooth_time` is roughly the time
/// to cover most of the remaining distance; it never overshoots a fixed target.
pub fn smooth_damp(current: Vec3, target: Vec3, velocity: &mut Vec3, smooth_time: f32, dt: f32) -> Vec3 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Padé approximation of exp(-x).
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut next = target + (change + temp) * decay;

    // Clamp so a stationary target is approached, never crossed.
    if (target - current).dot(next - target) > 0.0 {
        next = target;
        *velocity = Vec3::ZERO;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn every_curve_hits_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::QuadInOut,
            Easing::CubicOut,
            Easing::SineInOut,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn quad_out_faster_start() {
        let mid = Easing::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn lerp_vec3_midpoint() {
        let mid = lerp_vec3(Vec3::ZERO, Vec3::new(2.0, 4.0, -6.0), 0.5);
        assert!((mid - Vec3::new(1.0, 2.0, -3.0)).length() < 1e-6);
    }

    #[test]
    fn smooth_damp_lags_then_converges() {
        let target = Vec3::new(10.0, 0.0, 0.0);
        let mut pos = Vec3::ZERO;
        let mut vel = Vec3::ZERO;

        pos = smooth_damp(pos, target, &mut vel, 0.3, 1.0 / 60.0);
        assert!(pos.x > 0.0 && pos.x < 10.0, "first step should lag: {}", pos.x);

        let mut last = pos.x;
        for _ in 0..600 {
            pos = smooth_damp(pos, target, &mut vel, 0.3, 1.0 / 60.0);
            assert!(pos.x >= last - 1e-5, "should approach monotonically");
            assert!(pos.x <= 10.0 + 1e-5, "should never overshoot");
            last = pos.x;
        }
        assert!((pos - target).length() < 1e-2);
    }
}
