// extensions/mod.rs
//
// Interpolation helpers shared by the comet and camera systems.

pub mod easing;

pub use easing::{Easing, lerp_vec3, ease_vec3, smooth_damp};
