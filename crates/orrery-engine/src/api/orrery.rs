use glam::Vec3;

use crate::api::types::{BodyId, OrreryEvent};
use crate::config::OrreryConfig;
use crate::core::registry::BodyRegistry;
use crate::core::time::SimClock;
use crate::error::ConfigResult;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::instance::{BodyInstance, CameraFrame, CometInstance, Frame};
use crate::systems::camera::CameraController;
use crate::systems::collision::CollisionDetector;
use crate::systems::color::Rgb;
use crate::systems::comets::CometScheduler;
use crate::systems::flash::tick_flashes;
use crate::systems::orbit::{orbit_path, update_positions};
use crate::systems::picking;

/// Every body orbits this point.
const ANCHOR: Vec3 = Vec3::ZERO;

/// The whole simulation: registry, clock, and the components run each tick.
///
/// Tick order: inputs, clock, orbit positions, flash timers, collisions,
/// comets, camera, frame snapshot. Flashes decay before new contacts raise
/// them, so every flash shows in at least one frame.
pub struct Orrery {
    config: OrreryConfig,
    registry: BodyRegistry,
    clock: SimClock,
    collisions: CollisionDetector,
    comets: CometScheduler,
    camera: CameraController,
    events: Vec<OrreryEvent>,
    frame: Frame,
    running: bool,
}

impl Orrery {
    /// Validate `config` and build the simulation at t = 0.
    ///
    /// The central body (if any) is spawned first, so it always has id 0.
    pub fn new(config: OrreryConfig) -> ConfigResult<Self> {
        config.validate()?;
        for (a, b) in config.overlapping_envelopes() {
            log::warn!("orbits of {} and {} overlap; they may collide", a, b);
        }

        let mut registry = BodyRegistry::new();
        for body in config.bodies.iter().filter(|b| b.role.is_central()) {
            registry.spawn_from(body);
        }
        for body in config.bodies.iter().filter(|b| !b.role.is_central()) {
            registry.spawn_from(body);
        }
        update_positions(&mut registry, 0.0, ANCHOR);

        let mut orrery = Self {
            collisions: CollisionDetector::new(&config.collisions),
            comets: CometScheduler::new(config.comets.clone(), config.seed),
            camera: CameraController::new(config.camera.clone()),
            clock: SimClock::new(),
            events: Vec::with_capacity(16),
            frame: Frame::default(),
            running: true,
            registry,
            config,
        };
        orrery.rebuild_frame();
        log::info!(
            "orrery started: {} bodies ({} orbiting)",
            orrery.registry.len(),
            orrery.registry.orbiting_count()
        );
        Ok(orrery)
    }

    /// Advance the simulation by `dt` seconds, applying queued inputs first.
    /// Does nothing after `shutdown`.
    pub fn tick(&mut self, dt: f32, input: &InputQueue) {
        if !self.running {
            return;
        }

        for event in input.iter() {
            self.apply_input(event);
        }

        self.clock.advance(dt);
        let t = self.clock.elapsed();
        update_positions(&mut self.registry, t, ANCHOR);

        tick_flashes(&mut self.registry, dt);
        for hit in self.collisions.step(&mut self.registry, t, dt) {
            self.events.push(OrreryEvent::collision(hit.a, hit.b));
        }

        let comets = self.comets.tick(dt, &self.registry);
        for (comet, body) in comets.spawned {
            self.events.push(OrreryEvent::comet_spawned(comet, body));
        }
        if comets.reaped > 0 {
            self.events.push(OrreryEvent::comets_reaped(comets.reaped));
        }

        if !self.camera.update(dt, &self.registry) {
            self.events.push(OrreryEvent::close());
            self.refresh_visibility();
        }

        self.rebuild_frame();
    }

    fn apply_input(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Select { body } => {
                self.select(*body);
            }
            InputEvent::SelectName { name } => {
                self.select_name(name);
            }
            InputEvent::Deselect => self.deselect(),
            InputEvent::Hover { body } => self.hover(*body),
            InputEvent::Pick { origin, direction } => {
                self.pick(*origin, *direction);
            }
            InputEvent::ColorSampled { body, color } => self.set_color(*body, *color),
        }
    }

    /// Focus the camera on `body` and emit `INSPECT`. An unknown id deselects.
    pub fn select(&mut self, body: BodyId) -> bool {
        let was_focused = self.camera.focused().is_some();
        let found = self.camera.select(body, &self.registry);
        if found {
            log::debug!("inspecting {:?}", body);
            self.events.push(OrreryEvent::inspect(body));
        } else if was_focused {
            self.events.push(OrreryEvent::close());
        }
        self.refresh_visibility();
        found
    }

    /// Select by display name.
    pub fn select_name(&mut self, name: &str) -> bool {
        match self.registry.find_by_name(name).map(|b| b.id) {
            Some(id) => self.select(id),
            None => {
                log::debug!("no body named {:?}", name);
                self.deselect();
                false
            }
        }
    }

    /// Return to the overview and emit `CLOSE` if something was focused.
    pub fn deselect(&mut self) {
        if self.camera.focused().is_some() {
            log::debug!("closing inspection");
            self.events.push(OrreryEvent::close());
        }
        self.camera.deselect();
        self.refresh_visibility();
    }

    /// Set the hovered body. Unknown ids are ignored.
    pub fn hover(&mut self, body: Option<BodyId>) {
        if let Some(id) = body {
            if !self.registry.contains(id) {
                log::debug!("hover over unknown body {:?} ignored", id);
                return;
            }
        }
        picking::apply_hover(&mut self.registry, body);
    }

    /// Select the nearest visible body under a world-space ray, if any.
    pub fn pick(&mut self, origin: Vec3, direction: Vec3) -> Option<BodyId> {
        let hit = picking::pick(&self.registry, origin, direction, self.config.hover_scale)?;
        self.select(hit);
        Some(hit)
    }

    /// Apply a sampled display color. Unknown ids are ignored.
    pub fn set_color(&mut self, body: BodyId, color: Rgb) {
        match self.registry.get_mut(body) {
            Some(b) => b.color = color,
            None => log::debug!("color for unknown body {:?} ignored", body),
        }
    }

    /// Cancel the comet timers and stop ticking.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.comets.cancel_timers();
        self.running = false;
        log::info!("orrery shut down at t={:.2}", self.clock.elapsed());
    }

    fn refresh_visibility(&mut self) {
        let focused = if self.config.isolate_focused {
            self.camera.focused()
        } else {
            None
        };
        picking::apply_isolation(&mut self.registry, focused);
    }

    fn rebuild_frame(&mut self) {
        let focused = self.camera.focused();
        let hover_scale = self.config.hover_scale;
        self.frame.clear();
        self.frame.bodies.extend(
            self.registry
                .iter()
                .map(|b| BodyInstance::from_body(b, hover_scale, Some(b.id) == focused)),
        );
        self.frame
            .comets
            .extend(self.comets.comets().iter().map(CometInstance::from_comet));
        self.frame.camera = CameraFrame::new(self.camera.pose(), self.camera.state());
    }

    // -- Accessors --

    /// Snapshot written at the end of the last tick.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Events recorded since the last drain.
    pub fn events(&self) -> &[OrreryEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<OrreryEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn comets(&self) -> &CometScheduler {
        &self.comets
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Closed polyline of `id`'s orbit ellipse, empty for a body that does not
    /// orbit. None for an unknown id.
    pub fn orbit_path(&self, id: BodyId, samples: usize) -> Option<Vec<Vec3>> {
        self.registry.get(id).map(|b| orbit_path(b.orbit(), samples, ANCHOR))
    }

    pub fn body_name(&self, id: BodyId) -> Option<&str> {
        self.registry.get(id).map(|b| b.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BodyConfig;
    use crate::error::ConfigError;
    use crate::layouts;
    use crate::systems::camera::CameraState;

    const DT: f32 = 1.0 / 60.0;

    fn run(orrery: &mut Orrery, ticks: usize) {
        let input = InputQueue::new();
        for _ in 0..ticks {
            orrery.tick(DT, &input);
        }
    }

    fn count(events: &[OrreryEvent], kind: f32) -> usize {
        events.iter().filter(|e| e.kind == kind).count()
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(matches!(
            Orrery::new(OrreryConfig::new(Vec::new())),
            Err(ConfigError::NoBodies)
        ));
    }

    #[test]
    fn central_body_gets_id_zero() {
        let config = OrreryConfig::new(vec![
            BodyConfig::orbiting("Rock", 20.0, 0.3, 1.0),
            BodyConfig::central("Sun", 5.0),
        ]);
        let orrery = Orrery::new(config).unwrap();
        assert_eq!(orrery.body_name(BodyId(0)), Some("Sun"));
        assert_eq!(orrery.body_name(BodyId(1)), Some("Rock"));
    }

    #[test]
    fn desktop_layout_runs_without_collisions() {
        let config = layouts::desktop();
        assert!(config.overlapping_envelopes().is_empty());
        assert_eq!(config.bodies.iter().filter(|b| !b.role.is_central()).count(), 8);

        let mut orrery = Orrery::new(config).unwrap();
        run(&mut orrery, 10_000);
        assert_eq!(count(orrery.events(), OrreryEvent::COLLISION), 0);
        assert!(orrery.registry().iter().all(|b| !b.is_flashing()));
    }

    #[test]
    fn crowded_orbits_bounce() {
        let config = OrreryConfig::new(vec![
            BodyConfig::central("Sun", 5.0),
            BodyConfig::orbiting("Small", 20.0, 0.5, 1.0),
            BodyConfig::orbiting("Big", 20.0, 0.5, 2.0).retrograde(),
        ]);
        let mut orrery = Orrery::new(config).unwrap();
        run(&mut orrery, 600);
        let events = orrery.drain_events();
        assert!(count(&events, OrreryEvent::COLLISION) > 0);
        assert!(orrery.events().is_empty());
    }

    #[test]
    fn short_flash_still_reaches_a_frame() {
        let mut config = OrreryConfig::new(vec![
            BodyConfig::central("Sun", 5.0),
            BodyConfig::orbiting("Small", 20.0, 0.5, 1.0),
            BodyConfig::orbiting("Big", 20.0, 0.5, 2.0).retrograde(),
        ]);
        config.collisions.flash_duration = 0.001;
        let mut orrery = Orrery::new(config).unwrap();

        let input = InputQueue::new();
        let mut ticks = 0;
        while count(orrery.events(), OrreryEvent::COLLISION) == 0 {
            orrery.tick(DT, &input);
            ticks += 1;
            assert!(ticks < 600, "no contact within 10 s");
        }
        assert!(orrery.frame().bodies[1].has_flag(BodyInstance::FLAG_FLASHING));

        orrery.drain_events();
        orrery.tick(DT, &input);
        if count(orrery.events(), OrreryEvent::COLLISION) == 0 {
            assert!(!orrery.frame().bodies[1].has_flag(BodyInstance::FLAG_FLASHING));
        }
    }

    #[test]
    fn zero_radius_body_never_moves() {
        let config = OrreryConfig::new(vec![
            BodyConfig::central("Sun", 5.0),
            BodyConfig::orbiting("Parked", 0.0, 3.0, 1.0),
        ]);
        let mut orrery = Orrery::new(config).unwrap();
        for _ in 0..500 {
            orrery.tick(DT, &InputQueue::new());
            assert_eq!(orrery.registry().get(BodyId(1)).unwrap().position, ANCHOR);
        }
    }

    #[test]
    fn select_and_deselect_through_input() {
        let mut orrery = Orrery::new(layouts::desktop()).unwrap();
        let mut input = InputQueue::new();
        input.push(InputEvent::Select { body: BodyId(3) });
        orrery.tick(DT, &input);

        assert_eq!(orrery.camera().state(), CameraState::Focused(BodyId(3)));
        assert_eq!(count(orrery.events(), OrreryEvent::INSPECT), 1);
        let visible: Vec<_> = orrery.registry().iter().filter(|b| b.visible).map(|b| b.id).collect();
        assert_eq!(visible, vec![BodyId(3)]);
        let inst = &orrery.frame().bodies[3];
        assert!(inst.has_flag(BodyInstance::FLAG_FOCUSED));
        assert_eq!(orrery.frame().camera.focused, 3.0);

        let mut input = InputQueue::new();
        input.push(InputEvent::Deselect);
        orrery.tick(DT, &input);
        assert_eq!(orrery.camera().state(), CameraState::Overview);
        assert_eq!(count(orrery.events(), OrreryEvent::CLOSE), 1);
        assert!(orrery.registry().iter().all(|b| b.visible));
    }

    #[test]
    fn select_by_name_and_unknown_name() {
        let mut orrery = Orrery::new(layouts::desktop()).unwrap();
        assert!(orrery.select_name(layouts::SUN));
        assert_eq!(orrery.camera().focused(), Some(BodyId(0)));
        assert!(!orrery.select_name("Pluto"));
        assert_eq!(orrery.camera().state(), CameraState::Overview);
    }

    #[test]
    fn isolation_can_be_disabled() {
        let mut config = layouts::desktop();
        config.isolate_focused = false;
        let mut orrery = Orrery::new(config).unwrap();
        orrery.select(BodyId(2));
        assert!(orrery.registry().iter().all(|b| b.visible));
    }

    #[test]
    fn sampled_color_applies_on_next_tick() {
        let mut orrery = Orrery::new(layouts::desktop()).unwrap();
        let teal = Rgb::new(0.1, 0.8, 0.7);
        assert_eq!(orrery.registry().get(BodyId(2)).unwrap().color, Rgb::NEUTRAL);

        let mut input = InputQueue::new();
        input.push(InputEvent::ColorSampled { body: BodyId(2), color: teal });
        input.push(InputEvent::ColorSampled { body: BodyId(99), color: teal });
        orrery.tick(DT, &input);

        assert_eq!(orrery.registry().get(BodyId(2)).unwrap().color, teal);
        assert_eq!(orrery.frame().bodies[2].g, 0.8);
    }

    #[test]
    fn hover_scales_rendered_size() {
        let mut orrery = Orrery::new(layouts::desktop()).unwrap();
        let size = orrery.registry().get(BodyId(1)).unwrap().size;
        let mut input = InputQueue::new();
        input.push(InputEvent::Hover { body: Some(BodyId(1)) });
        orrery.tick(DT, &input);
        assert!((orrery.frame().bodies[1].size - size * 1.1).abs() < 1e-5);
    }

    #[test]
    fn pick_straight_down_selects_the_sun() {
        let mut orrery = Orrery::new(layouts::desktop()).unwrap();
        // Every planet's orbit keeps it well clear of the vertical axis.
        let origin = Vec3::new(0.0, 500.0, 0.0);
        assert_eq!(orrery.pick(origin, -Vec3::Y), Some(BodyId(0)));
        assert_eq!(orrery.camera().focused(), Some(BodyId(0)));
    }

    #[test]
    fn comets_spawn_and_report() {
        let mut orrery = Orrery::new(layouts::desktop()).unwrap();
        run(&mut orrery, 16 * 60);
        let events = orrery.drain_events();
        assert_eq!(count(&events, OrreryEvent::COMET_SPAWNED), 1);
        assert_eq!(orrery.comets().len(), 1);
        assert_eq!(orrery.frame().comets.len(), 1);
    }

    #[test]
    fn finished_comet_is_reaped_and_reported() {
        let mut orrery = Orrery::new(layouts::desktop()).unwrap();
        // Launch at 15 s, slowest flight 1 / 0.15 s, then one reap interval.
        run(&mut orrery, 23 * 60);
        let events = orrery.drain_events();
        assert_eq!(count(&events, OrreryEvent::COMET_SPAWNED), 1);
        let reaped: f32 = events
            .iter()
            .filter(|e| e.kind == OrreryEvent::COMETS_REAPED)
            .map(|e| e.a)
            .sum();
        assert_eq!(count(&events, OrreryEvent::COMETS_REAPED), 1);
        assert_eq!(reaped, 1.0);
        assert!(orrery.comets().is_empty());
        assert!(orrery.frame().comets.is_empty());
    }

    #[test]
    fn unknown_name_in_overview_keeps_rotation() {
        let mut orrery = Orrery::new(layouts::desktop()).unwrap();
        run(&mut orrery, 120);
        let before = orrery.frame().camera;
        assert!(!orrery.select_name("Pluto"));
        orrery.select(BodyId(99));
        assert_eq!(orrery.camera().state(), CameraState::Overview);
        assert_eq!(orrery.camera().pose().position.to_array(), before.position);
        assert_eq!(count(orrery.events(), OrreryEvent::CLOSE), 0);
    }

    #[test]
    fn orbit_path_traces_the_ring() {
        let orrery = Orrery::new(layouts::desktop()).unwrap();
        let body = orrery.registry().get(BodyId(1)).unwrap();
        let (rx, rz) = (body.orbit().radius_x, body.orbit().radius_z);

        let ring = orrery.orbit_path(BodyId(1), 64).unwrap();
        assert_eq!(ring.len(), 64);
        assert!((ring[0] - Vec3::new(rx, 0.0, 0.0)).length() < 1e-4);
        assert!((ring[16] - Vec3::new(0.0, 0.0, rz)).length() < 1e-3);

        assert_eq!(orrery.orbit_path(BodyId(0), 64), Some(Vec::new()));
        assert_eq!(orrery.orbit_path(BodyId(99), 64), None);
    }

    #[test]
    fn shutdown_stops_everything() {
        let mut orrery = Orrery::new(layouts::desktop()).unwrap();
        run(&mut orrery, 60);
        orrery.shutdown();
        let t = orrery.elapsed();
        run(&mut orrery, 20 * 60);
        assert!(!orrery.is_running());
        assert_eq!(orrery.elapsed(), t);
        assert!(orrery.comets().is_empty());
        assert!(orrery.comets().timers_cancelled());
    }
}
