//! Display colors sampled from a body's logo image.
//!
//! Loading and decoding the image happens in the presentation layer and may take
//! any number of frames. The result arrives as an input event and is applied with
//! a single assignment; until then the body renders in the neutral color.

use bytemuck::{Pod, Zeroable};

/// Linear RGB in [0, 1].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const NEUTRAL: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// One RGBA8 pixel as laid out in canvas `ImageData`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct Rgba8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// Average color of an RGBA8 pixel buffer, weighting each pixel by its alpha.
///
/// Fully transparent pixels (logo backgrounds) do not contribute. Returns `None`
/// when nothing is visible. Trailing bytes that do not form a whole pixel are ignored.
pub fn average_rgba(pixels: &[u8]) -> Option<Rgb> {
    let whole = pixels.len() - pixels.len() % 4;
    let pixels: &[Rgba8] = bytemuck::cast_slice(&pixels[..whole]);

    let (mut r, mut g, mut b, mut weight) = (0u64, 0u64, 0u64, 0u64);
    for p in pixels {
        let a = p.a as u64;
        r += p.r as u64 * a;
        g += p.g as u64 * a;
        b += p.b as u64 * a;
        weight += a;
    }
    if weight == 0 {
        return None;
    }
    let channel = |sum: u64| (sum as f64 / weight as f64 / 255.0) as f32;
    Some(Rgb::new(channel(r), channel(g), channel(b)))
}
