//! Built-in parameter tables.
//!
//! One orbit model serves every screen size; the compact layout is the desktop
//! system uniformly scaled down, not a second implementation.
//!
//! Each planet gets its own eccentricity, speed multiplier and optional vertical
//! wave for variety. Semi-axes are chosen so neighbouring envelopes keep a gap
//! wider than the two bodies' sizes: collisions only come from reversals.

use crate::config::{BodyConfig, OrreryConfig, PhaseProfile, ZoomBounds};

/// Scale factor from the desktop layout to the compact one.
pub const COMPACT_SCALE: f32 = 0.6;

/// Name of the central body in both layouts.
pub const SUN: &str = "Sun";

/// The eight-planet system for large screens.
pub fn desktop() -> OrreryConfig {
    use PhaseProfile::{Cosine, Sine};

    OrreryConfig::new(vec![
        BodyConfig::central(SUN, 5.0),
        BodyConfig::orbiting("Osmosis", 15.0, 0.25, 2.0).with_ellipse(15.0, 13.0),
        BodyConfig::orbiting("Celestia", 25.0, 0.22 * 0.9, 2.2).with_ellipse(25.0, 21.0),
        BodyConfig::orbiting("Mantra", 35.0, 0.28 * 1.3, 2.0)
            .with_ellipse(35.0, 31.0)
            .with_wave(0.2 * 35.0, 0.28 * 0.6, Sine),
        BodyConfig::orbiting("Sei", 45.0, 0.3, 2.0).with_wave(0.2 * 45.0, 0.3, Cosine),
        BodyConfig::orbiting("Injective", 55.0, 0.24 * 1.1, 2.0).with_ellipse(52.0, 58.0),
        BodyConfig::orbiting("THORChain", 65.0, 0.26 * 0.8, 2.0)
            .with_ellipse(68.0, 64.0)
            .with_wave(0.15 * 65.0, 0.26 * 0.5, Sine)
            .with_ring(),
        BodyConfig::orbiting("Secret", 75.0, 0.3 * 0.9, 2.0).with_ellipse(77.0, 73.0),
        BodyConfig::orbiting("Akash", 85.0, 0.25 * 1.2, 2.4)
            .with_ellipse(85.0, 83.0)
            .with_wave(0.15 * 85.0, 0.25 * 0.6, Cosine),
    ])
}

/// The same system scaled for small screens.
pub fn compact() -> OrreryConfig {
    scaled(desktop(), COMPACT_SCALE)
}

/// Uniformly scale every length in a layout. Speeds and timings are untouched.
pub fn scaled(mut config: OrreryConfig, factor: f32) -> OrreryConfig {
    for body in &mut config.bodies {
        body.radius_x *= factor;
        body.radius_z *= factor;
        body.vertical_amplitude *= factor;
        body.size *= factor;
    }

    let camera = &mut config.camera;
    camera.standoff *= factor;
    camera.overview_distance *= factor;
    camera.overview_bounds = scale_bounds(camera.overview_bounds, factor);
    camera.focused_bounds = scale_bounds(camera.focused_bounds, factor);

    config.comets.spawn_extent *= factor;
    config
}

fn scale_bounds(bounds: ZoomBounds, factor: f32) -> ZoomBounds {
    ZoomBounds::new(bounds.min_distance * factor, bounds.max_distance * factor)
}

/// Look up a built-in layout by name.
pub fn by_name(name: &str) -> Option<OrreryConfig> {
    match name {
        "desktop" => Some(desktop()),
        "compact" | "mobile" => Some(compact()),
        _ => None,
    }
}
