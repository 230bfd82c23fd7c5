use bytemuck::{Pod, Zeroable};

use crate::components::body::Body;
use crate::components::comet::Comet;
use crate::systems::camera::{CameraPose, CameraState};

/// Per-body render data for the presentation layer.
/// Must match the TypeScript protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Rendered radius (hover scale applied).
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Bitset of `BodyInstance::FLAG_*`.
    pub flags: f32,
    pub id: f32,
    /// Seconds of flash left.
    pub flash: f32,
    /// +1 prograde, -1 retrograde.
    pub direction: f32,
    pub _pad: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const FLAG_VISIBLE: u32 = 1;
    pub const FLAG_HOVERED: u32 = 2;
    pub const FLAG_FLASHING: u32 = 4;
    pub const FLAG_RING: u32 = 8;
    pub const FLAG_CENTRAL: u32 = 16;
    pub const FLAG_FOCUSED: u32 = 32;

    pub fn from_body(body: &Body, hover_scale: f32, focused: bool) -> Self {
        let mut flags = 0;
        if body.visible {
            flags |= Self::FLAG_VISIBLE;
        }
        if body.hovered {
            flags |= Self::FLAG_HOVERED;
        }
        if body.is_flashing() {
            flags |= Self::FLAG_FLASHING;
        }
        if body.has_ring {
            flags |= Self::FLAG_RING;
        }
        if body.is_central() {
            flags |= Self::FLAG_CENTRAL;
        }
        if focused {
            flags |= Self::FLAG_FOCUSED;
        }
        Self {
            x: body.position.x,
            y: body.position.y,
            z: body.position.z,
            size: body.rendered_size(hover_scale),
            r: body.color.r,
            g: body.color.g,
            b: body.color.b,
            flags: flags as f32,
            id: body.id.0 as f32,
            flash: body.flash_remaining(),
            direction: body.direction().sign() as f32,
            _pad: 0.0,
        }
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        (self.flags as u32) & flag != 0
    }
}

/// Per-comet render data. 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CometInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub progress: f32,
    pub id: f32,
    pub target_body: f32,
    pub _pad: [f32; 2],
}

impl CometInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_comet(comet: &Comet) -> Self {
        let p = comet.position();
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            progress: comet.progress(),
            id: comet.id.0 as f32,
            target_body: comet.target_body.0 as f32,
            _pad: [0.0; 2],
        }
    }
}

/// Camera pose and bounds. 12 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CameraFrame {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    /// 1.0 while auto-rotating.
    pub auto_rotate: f32,
    /// Focused body id, or -1 in the overview.
    pub focused: f32,
    pub _pad: [f32; 2],
}

impl CameraFrame {
    pub const FLOATS: usize = 12;

    pub fn new(pose: &CameraPose, state: CameraState) -> Self {
        Self {
            position: pose.position.to_array(),
            look_at: pose.look_at.to_array(),
            min_distance: pose.bounds.min_distance,
            max_distance: pose.bounds.max_distance,
            auto_rotate: if pose.auto_rotate { 1.0 } else { 0.0 },
            focused: match state {
                CameraState::Focused(id) => id.0 as f32,
                CameraState::Overview => -1.0,
            },
            _pad: [0.0; 2],
        }
    }
}

/// Everything the presentation layer draws for one tick.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub bodies: Vec<BodyInstance>,
    pub comets: Vec<CometInstance>,
    pub camera: CameraFrame,
}

impl Frame {
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.comets.clear();
        self.camera = CameraFrame::default();
    }
}
