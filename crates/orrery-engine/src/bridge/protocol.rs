//! Frame buffer layout shared with the presentation layer.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 8 floats]
//! [Camera: 12 floats]
//! [Bodies: max_bodies × 12 floats]
//! [Comets: max_comets × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header on every frame so the reader can
//! compute offsets without a separate handshake.

use crate::api::types::OrreryEvent;
use crate::renderer::instance::{BodyInstance, CameraFrame, CometInstance, Frame};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_COMETS: usize = 4;
pub const HEADER_COMET_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

pub const DEFAULT_MAX_COMETS: usize = 32;
pub const DEFAULT_MAX_EVENTS: usize = 64;

/// Section sizes and offsets, all in floats.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_comets: usize,
    pub max_events: usize,

    pub camera_offset: usize,
    pub body_offset: usize,
    pub comet_offset: usize,
    pub event_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_bodies: usize, max_comets: usize, max_events: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let body_offset = camera_offset + CameraFrame::FLOATS;
        let comet_offset = body_offset + max_bodies * BodyInstance::FLOATS;
        let event_offset = comet_offset + max_comets * CometInstance::FLOATS;
        let buffer_total_floats = event_offset + max_events * OrreryEvent::FLOATS;

        Self {
            max_bodies,
            max_comets,
            max_events,
            camera_offset,
            body_offset,
            comet_offset,
            event_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Layout sized for `body_count` bodies with default comet/event capacity.
    pub fn for_bodies(body_count: usize) -> Self {
        Self::new(body_count, DEFAULT_MAX_COMETS, DEFAULT_MAX_EVENTS)
    }
}

/// Owned flat f32 buffer written once per tick.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
    frame_counter: u32,
}

impl FrameBuffer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        Self {
            layout,
            data,
            frame_counter: 0,
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Pack `frame` and `events`. Anything over capacity is dropped with a warning.
    pub fn write(&mut self, frame: &Frame, events: &[OrreryEvent]) {
        let l = &self.layout;
        let body_count = frame.bodies.len().min(l.max_bodies);
        let comet_count = frame.comets.len().min(l.max_comets);
        let event_count = events.len().min(l.max_events);
        if body_count < frame.bodies.len()
            || comet_count < frame.comets.len()
            || event_count < events.len()
        {
            log::warn!(
                "frame over capacity: {} bodies, {} comets, {} events",
                frame.bodies.len(),
                frame.comets.len(),
                events.len()
            );
        }

        let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&frame.camera));
        self.data[l.camera_offset..l.camera_offset + CameraFrame::FLOATS].copy_from_slice(camera);

        let bodies: &[f32] = bytemuck::cast_slice(&frame.bodies[..body_count]);
        self.data[l.body_offset..l.body_offset + bodies.len()].copy_from_slice(bodies);

        let comets: &[f32] = bytemuck::cast_slice(&frame.comets[..comet_count]);
        self.data[l.comet_offset..l.comet_offset + comets.len()].copy_from_slice(comets);

        let events: &[f32] = bytemuck::cast_slice(&events[..event_count]);
        self.data[l.event_offset..l.event_offset + events.len()].copy_from_slice(events);

        self.frame_counter = self.frame_counter.wrapping_add(1);
        let header = [
            PROTOCOL_VERSION,
            self.frame_counter as f32,
            l.max_bodies as f32,
            body_count as f32,
            l.max_comets as f32,
            comet_count as f32,
            l.max_events as f32,
            event_count as f32,
        ];
        self.data[..HEADER_FLOATS].copy_from_slice(&header);
    }

    pub fn body_count(&self) -> usize {
        self.data[HEADER_BODY_COUNT] as usize
    }

    pub fn comet_count(&self) -> usize {
        self.data[HEADER_COMET_COUNT] as usize
    }

    pub fn event_count(&self) -> usize {
        self.data[HEADER_EVENT_COUNT] as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::BodyId;

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(9, 4, 16);
        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.body_offset, HEADER_FLOATS + 12);
        assert_eq!(layout.comet_offset, layout.body_offset + 9 * 12);
        assert_eq!(layout.event_offset, layout.comet_offset + 4 * 8);
        assert_eq!(layout.buffer_total_floats, layout.event_offset + 16 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn write_packs_sections_and_header() {
        let mut buf = FrameBuffer::new(ProtocolLayout::new(2, 2, 2));
        let frame = Frame {
            bodies: vec![BodyInstance { x: 1.0, size: 5.0, ..Default::default() }],
            comets: vec![CometInstance { progress: 0.5, ..Default::default() }],
            camera: CameraFrame { focused: -1.0, ..Default::default() },
        };
        buf.write(&frame, &[OrreryEvent::inspect(BodyId(3))]);

        let l = buf.layout().clone();
        let d = buf.data();
        assert_eq!(d[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(d[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(buf.body_count(), 1);
        assert_eq!(buf.comet_count(), 1);
        assert_eq!(buf.event_count(), 1);
        assert_eq!(d[l.camera_offset + 9], -1.0);
        assert_eq!(d[l.body_offset], 1.0);
        assert_eq!(d[l.body_offset + 3], 5.0);
        assert_eq!(d[l.comet_offset + 3], 0.5);
        assert_eq!(d[l.event_offset], OrreryEvent::INSPECT);
        assert_eq!(d[l.event_offset + 1], 3.0);
    }

    #[test]
    fn overflow_is_truncated() {
        let mut buf = FrameBuffer::new(ProtocolLayout::new(1, 0, 1));
        let frame = Frame {
            bodies: vec![BodyInstance::default(); 3],
            comets: vec![CometInstance::default(); 2],
            camera: CameraFrame::default(),
        };
        buf.write(&frame, &[OrreryEvent::close(), OrreryEvent::close()]);
        assert_eq!(buf.body_count(), 1);
        assert_eq!(buf.comet_count(), 0);
        assert_eq!(buf.event_count(), 1);
        assert_eq!(buf.data().len(), buf.layout().buffer_total_floats);
    }
}
