use orrery_engine::{
    average_rgba, BodyId, ConfigResult, FixedTimestep, FrameBuffer, InputEvent, InputQueue,
    Orrery, OrreryConfig, OrreryEvent, ProtocolLayout,
};
use orrery_engine::glam::Vec3;

/// Simulation steps per second.
const FIXED_DT: f32 = 1.0 / 60.0;

/// Wires the orrery to the browser frame loop.
///
/// `lib.rs` keeps one runner in a `thread_local!` and exports free functions via
/// `#[wasm_bindgen]`, which cannot export methods on a Rust-owned struct that
/// JS never sees.
pub struct OrreryRunner {
    orrery: Orrery,
    input: InputQueue,
    timestep: FixedTimestep,
    buffer: FrameBuffer,
    /// Events gathered across all steps of the last frame.
    frame_events: Vec<OrreryEvent>,
}

impl OrreryRunner {
    pub fn new(config: OrreryConfig) -> ConfigResult<Self> {
        let orrery = Orrery::new(config)?;
        let layout = ProtocolLayout::for_bodies(orrery.registry().len());
        let mut runner = Self {
            orrery,
            input: InputQueue::new(),
            timestep: FixedTimestep::new(FIXED_DT),
            buffer: FrameBuffer::new(layout),
            frame_events: Vec::with_capacity(16),
        };
        runner.buffer.write(runner.orrery.frame(), &[]);
        Ok(runner)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run however many fixed steps `dt` covers, then pack the frame buffer.
    ///
    /// Inputs are applied on the first step only so a selection is not
    /// processed twice in one frame. With zero steps they wait for the next frame.
    pub fn tick(&mut self, dt: f32) {
        self.frame_events.clear();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.orrery.tick(self.timestep.dt(), &self.input);
            if step == 0 {
                self.input.drain();
            }
            self.frame_events.extend(self.orrery.drain_events());
        }

        self.buffer.write(self.orrery.frame(), &self.frame_events);
    }

    pub fn select(&mut self, id: u32) {
        self.push_input(InputEvent::Select { body: BodyId(id) });
    }

    pub fn select_name(&mut self, name: &str) {
        self.push_input(InputEvent::SelectName { name: name.to_string() });
    }

    pub fn deselect(&mut self) {
        self.push_input(InputEvent::Deselect);
    }

    /// Negative ids clear hover.
    pub fn hover(&mut self, id: i32) {
        let body = u32::try_from(id).ok().map(BodyId);
        self.push_input(InputEvent::Hover { body });
    }

    pub fn pick(&mut self, origin: [f32; 3], direction: [f32; 3]) {
        self.push_input(InputEvent::Pick {
            origin: Vec3::from_array(origin),
            direction: Vec3::from_array(direction),
        });
    }

    /// Average an RGBA8 logo image and queue the result for `id`.
    pub fn color_sampled(&mut self, id: u32, pixels: &[u8]) {
        match average_rgba(pixels) {
            Some(color) => self.push_input(InputEvent::ColorSampled { body: BodyId(id), color }),
            None => log::warn!("logo for body {} has no visible pixels", id),
        }
    }

    pub fn shutdown(&mut self) {
        self.orrery.shutdown();
        self.input.drain();
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    pub fn body_name(&self, id: u32) -> Option<String> {
        self.orrery.body_name(BodyId(id)).map(str::to_string)
    }

    pub fn body_id(&self, name: &str) -> Option<u32> {
        self.orrery.registry().find_by_name(name).map(|b| b.id.0)
    }

    /// Orbit ring of body `id` as flat `[x, y, z, ...]`. Empty for the central
    /// body or an unknown id.
    pub fn orbit_path(&self, id: u32, samples: u32) -> Vec<f32> {
        self.orrery
            .orbit_path(BodyId(id), samples as usize)
            .unwrap_or_default()
            .iter()
            .flat_map(|p| p.to_array())
            .collect()
    }

    // ---- Pointer accessors for buffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.data().as_ptr()
    }

    pub fn buffer_len(&self) -> u32 {
        self.buffer.data().len() as u32
    }

    fn section_ptr(&self, offset: usize) -> *const f32 {
        self.buffer.data()[offset..].as_ptr()
    }

    pub fn camera_ptr(&self) -> *const f32 {
        self.section_ptr(self.buffer.layout().camera_offset)
    }

    pub fn bodies_ptr(&self) -> *const f32 {
        self.section_ptr(self.buffer.layout().body_offset)
    }

    pub fn body_count(&self) -> u32 {
        self.buffer.body_count() as u32
    }

    pub fn comets_ptr(&self) -> *const f32 {
        self.section_ptr(self.buffer.layout().comet_offset)
    }

    pub fn comet_count(&self) -> u32 {
        self.buffer.comet_count() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.section_ptr(self.buffer.layout().event_offset)
    }

    pub fn event_count(&self) -> u32 {
        self.buffer.event_count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::layouts;

    fn runner() -> OrreryRunner {
        OrreryRunner::new(layouts::desktop()).unwrap()
    }

    #[test]
    fn initial_buffer_holds_every_body() {
        let r = runner();
        assert_eq!(r.body_count(), 9);
        assert_eq!(r.comet_count(), 0);
        assert_eq!(r.body_name(0).as_deref(), Some("Sun"));
        assert_eq!(r.body_id("Akash"), Some(8));
    }

    #[test]
    fn selection_is_applied_once_per_frame() {
        let mut r = runner();
        r.select(2);
        // Three fixed steps in one frame.
        r.tick(3.0 / 60.0 + 0.001);
        assert_eq!(r.event_count(), 1);
        let events = &r.buffer.data()[r.buffer.layout().event_offset..];
        assert_eq!(events[0], OrreryEvent::INSPECT);
        assert_eq!(events[1], 2.0);
    }

    #[test]
    fn short_frame_keeps_inputs_queued() {
        let mut r = runner();
        r.select(1);
        r.tick(0.001);
        assert_eq!(r.event_count(), 0);
        r.tick(1.0 / 60.0);
        assert_eq!(r.event_count(), 1);
    }

    #[test]
    fn color_sample_reaches_frame() {
        let mut r = runner();
        r.color_sampled(4, &[255, 0, 0, 255]);
        r.tick(1.0 / 60.0);
        assert_eq!(r.orrery().registry().get(BodyId(4)).unwrap().color.r, 1.0);
    }

    #[test]
    fn orbit_path_is_flattened() {
        let r = runner();
        let ring = r.orbit_path(1, 64);
        assert_eq!(ring.len(), 64 * 3);
        assert_eq!(ring[1], 0.0);
        assert!(r.orbit_path(0, 64).is_empty());
        assert!(r.orbit_path(42, 64).is_empty());
    }

    #[test]
    fn shutdown_freezes_clock() {
        let mut r = runner();
        r.tick(1.0 / 60.0);
        r.shutdown();
        let t = r.orrery().elapsed();
        r.tick(1.0);
        assert_eq!(r.orrery().elapsed(), t);
    }
}
