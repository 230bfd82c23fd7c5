use glam::Vec3;

use crate::api::types::{BodyId, CometId};
use crate::components::comet::Comet;
use crate::config::CometConfig;
use crate::core::registry::BodyRegistry;
use crate::core::time::IntervalTimer;
use crate::systems::rng::Rng;

/// What the scheduler did during one tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CometTick {
    /// (comet, targeted body) for every launch.
    pub spawned: Vec<(CometId, BodyId)>,
    pub reaped: usize,
}

/// Owns the live comets and the two timers that create and purge them.
pub struct CometScheduler {
    comets: Vec<Comet>,
    rng: Rng,
    next_id: u32,
    config: CometConfig,
    spawn_timer: IntervalTimer,
    reap_timer: IntervalTimer,
}

impl CometScheduler {
    pub fn new(config: CometConfig, seed: u64) -> Self {
        Self {
            comets: Vec::with_capacity(8),
            rng: Rng::new(seed),
            next_id: 0,
            spawn_timer: IntervalTimer::new(config.spawn_interval),
            reap_timer: IntervalTimer::new(config.reap_interval),
            config,
        }
    }

    /// Launch one comet at a uniformly chosen orbiting body.
    ///
    /// The target is that body's position right now; later motion of the body is
    /// not tracked. Does nothing when there is no orbiting body to aim at.
    pub fn spawn(&mut self, registry: &BodyRegistry) -> Option<(CometId, BodyId)> {
        let targets = registry.orbiting_ids();
        let target_body = *self.rng.pick(&targets)?;
        let target = registry.get(target_body)?.position;

        let e = self.config.spawn_extent;
        let start = Vec3::new(
            self.rng.range(-e, e),
            self.rng.range(-e, e),
            self.rng.range(-e, e),
        );
        let (lo, hi) = self.config.speed_range;
        let speed = if hi > lo { self.rng.range(lo, hi) } else { lo };

        let id = CometId(self.next_id);
        self.next_id += 1;
        self.comets.push(Comet::new(id, start, target, target_body, speed));
        log::debug!("comet {:?} launched at {:?} (speed {:.2})", id, target_body, speed);
        Some((id, target_body))
    }

    /// Move every live comet along its path.
    pub fn advance(&mut self, dt: f32) {
        let (easing, smooth_time) = (self.config.easing, self.config.smooth_time);
        for comet in &mut self.comets {
            comet.advance(dt, easing, smooth_time);
        }
    }

    /// Drop dead comets. Returns how many were removed.
    pub fn reap(&mut self) -> usize {
        let before = self.comets.len();
        self.comets.retain(Comet::is_alive);
        let reaped = before - self.comets.len();
        if reaped > 0 {
            log::debug!("reaped {} comets", reaped);
        }
        reaped
    }

    /// Timers, then motion, then the sweep.
    pub fn tick(&mut self, dt: f32, registry: &BodyRegistry) -> CometTick {
        let mut out = CometTick::default();
        for _ in 0..self.spawn_timer.advance(dt) {
            if let Some(spawned) = self.spawn(registry) {
                out.spawned.push(spawned);
            }
        }
        self.advance(dt);
        if self.reap_timer.advance(dt) > 0 {
            out.reaped = self.reap();
        }
        out
    }

    /// Stop both timers. Comets already in flight still move when advanced.
    pub fn cancel_timers(&mut self) {
        self.spawn_timer.cancel();
        self.reap_timer.cancel();
    }

    pub fn timers_cancelled(&self) -> bool {
        self.spawn_timer.is_cancelled() && self.reap_timer.is_cancelled()
    }

    pub fn comets(&self) -> &[Comet] {
        &self.comets
    }

    pub fn get(&self, id: CometId) -> Option<&Comet> {
        self.comets.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.comets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comets.is_empty()
    }
}
