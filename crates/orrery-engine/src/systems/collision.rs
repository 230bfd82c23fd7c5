//! Pairwise contact detection and the "bounce" response.
//!
//! The response is deliberately non-physical: on contact the smaller body
//! reverses its direction of travel and flashes (both do on a size tie).
//! Velocities are never looked at. O(n²) over orbiting bodies per tick.

use std::collections::HashMap;

use crate::api::types::BodyId;
use crate::config::CollisionConfig;
use crate::core::registry::BodyRegistry;

/// Two orbiting bodies in contact during one tick. `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: BodyId,
    pub b: BodyId,
}

/// Which side of a contact gets reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    ReverseFirst,
    ReverseSecond,
    ReverseBoth,
}

impl Resolution {
    pub fn for_sizes(size_a: f32, size_b: f32) -> Self {
        if size_a < size_b {
            Resolution::ReverseFirst
        } else if size_b < size_a {
            Resolution::ReverseSecond
        } else {
            Resolution::ReverseBoth
        }
    }
}

pub struct CollisionDetector {
    flash_duration: f32,
    cooldown: f32,
    /// Pairs still cooling down, with seconds left.
    cooling: HashMap<(BodyId, BodyId), f32>,
}

impl CollisionDetector {
    pub fn new(config: &CollisionConfig) -> Self {
        Self {
            flash_duration: config.flash_duration,
            cooldown: config.cooldown.max(0.0),
            cooling: HashMap::new(),
        }
    }

    pub fn flash_duration(&self) -> f32 {
        self.flash_duration
    }

    /// Every unordered pair of orbiting bodies currently in contact.
    /// Pairs in cooldown are skipped.
    pub fn detect(&self, registry: &BodyRegistry) -> Vec<CollisionEvent> {
        let orbiting: Vec<_> = registry.iter().filter(|b| !b.is_central()).collect();
        let mut events = Vec::new();
        for (i, a) in orbiting.iter().enumerate() {
            for b in &orbiting[i + 1..] {
                if self.cooling.contains_key(&(a.id, b.id)) {
                    continue;
                }
                let contact = a.size + b.size;
                if a.position.distance_squared(b.position) < contact * contact {
                    events.push(CollisionEvent { a: a.id, b: b.id });
                }
            }
        }
        events
    }

    /// Run one tick: age cooldowns, detect contacts, resolve each pair once.
    /// `t` is the current simulation time, used to keep reversed paths continuous.
    pub fn step(&mut self, registry: &mut BodyRegistry, t: f64, dt: f32) -> Vec<CollisionEvent> {
        self.cooling.retain(|_, left| {
            *left -= dt;
            *left > 0.0
        });

        let events = self.detect(registry);
        for event in &events {
            resolve(registry, *event, t, self.flash_duration);
            log::debug!("collision between {:?} and {:?} at t={:.2}", event.a, event.b, t);
            if self.cooldown > 0.0 {
                self.cooling.insert((event.a, event.b), self.cooldown);
            }
        }
        events
    }
}

/// Apply the bounce response to one contact.
pub fn resolve(registry: &mut BodyRegistry, event: CollisionEvent, t: f64, flash_duration: f32) {
    let Some((a, b)) = registry.pair_mut(event.a, event.b) else {
        return;
    };
    match Resolution::for_sizes(a.size, b.size) {
        Resolution::ReverseFirst => {
            a.reverse_direction(t);
            a.raise_flash(flash_duration);
        }
        Resolution::ReverseSecond => {
            b.reverse_direction(t);
            b.raise_flash(flash_duration);
        }
        Resolution::ReverseBoth => {
            a.reverse_direction(t);
            a.raise_flash(flash_duration);
            b.reverse_direction(t);
            b.raise_flash(flash_duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::body::Direction;
    use crate::config::BodyConfig;
    use glam::Vec3;

    fn registry_with(sizes: [f32; 2], gap: f32) -> BodyRegistry {
        let mut reg = BodyRegistry::from_configs(&[
            BodyConfig::central("Sun", 5.0),
            BodyConfig::orbiting("A", 20.0, 0.3, sizes[0]),
            BodyConfig::orbiting("B", 22.0, 0.3, sizes[1]),
        ]);
        reg.get_mut(BodyId(1)).unwrap().position = Vec3::new(20.0, 0.0, 0.0);
        reg.get_mut(BodyId(2)).unwrap().position = Vec3::new(20.0 + gap, 0.0, 0.0);
        reg
    }

    fn detector() -> CollisionDetector {
        CollisionDetector::new(&CollisionConfig::default())
    }

    #[test]
    fn smaller_body_reverses_and_flashes() {
        let mut reg = registry_with([1.0, 2.0], 2.5);
        let events = detector().step(&mut reg, 1.0, 1.0 / 60.0);
        assert_eq!(events, vec![CollisionEvent { a: BodyId(1), b: BodyId(2) }]);

        let small = reg.get(BodyId(1)).unwrap();
        assert_eq!(small.direction(), Direction::Retrograde);
        assert!(small.is_flashing());

        let big = reg.get(BodyId(2)).unwrap();
        assert_eq!(big.direction(), Direction::Prograde);
        assert!(!big.is_flashing());
    }

    #[test]
    fn smaller_second_body_reverses() {
        let mut reg = registry_with([2.0, 1.0], 2.5);
        detector().step(&mut reg, 1.0, 1.0 / 60.0);
        assert_eq!(reg.get(BodyId(1)).unwrap().direction(), Direction::Prograde);
        assert_eq!(reg.get(BodyId(2)).unwrap().direction(), Direction::Retrograde);
    }

    #[test]
    fn equal_sizes_both_reverse_and_flash() {
        let mut reg = registry_with([1.5, 1.5], 2.0);
        detector().step(&mut reg, 1.0, 1.0 / 60.0);
        for id in [BodyId(1), BodyId(2)] {
            let body = reg.get(id).unwrap();
            assert_eq!(body.direction(), Direction::Retrograde);
            assert!(body.is_flashing());
        }
    }

    #[test]
    fn separated_bodies_do_not_collide() {
        let mut reg = registry_with([1.0, 2.0], 3.5);
        assert!(detector().step(&mut reg, 1.0, 1.0 / 60.0).is_empty());
    }

    #[test]
    fn central_body_is_never_checked() {
        let mut reg = registry_with([1.0, 2.0], 50.0);
        // Park A inside the sun.
        reg.get_mut(BodyId(1)).unwrap().position = Vec3::ZERO;
        assert!(detector().detect(&reg).is_empty());
    }

    #[test]
    fn repeated_contact_flips_again_without_cooldown() {
        let mut reg = registry_with([1.0, 2.0], 2.0);
        let mut det = detector();
        det.step(&mut reg, 1.0, 1.0 / 60.0);
        det.step(&mut reg, 1.0 + 1.0 / 60.0, 1.0 / 60.0);
        assert_eq!(reg.get(BodyId(1)).unwrap().direction(), Direction::Prograde);
    }

    #[test]
    fn cooldown_suppresses_immediate_recontact() {
        let mut reg = registry_with([1.0, 2.0], 2.0);
        let mut det = CollisionDetector::new(&CollisionConfig {
            cooldown: 0.5,
            ..CollisionConfig::default()
        });
        assert_eq!(det.step(&mut reg, 1.0, 0.1).len(), 1);
        assert!(det.step(&mut reg, 1.1, 0.1).is_empty());
        assert_eq!(reg.get(BodyId(1)).unwrap().direction(), Direction::Retrograde);

        // 0.4 s left; a half-second tick clears it and the pair bounces again.
        assert_eq!(det.step(&mut reg, 1.6, 0.5).len(), 1);
        assert_eq!(reg.get(BodyId(1)).unwrap().direction(), Direction::Prograde);
    }

    #[test]
    fn resolution_policy_table() {
        assert_eq!(Resolution::for_sizes(1.0, 2.0), Resolution::ReverseFirst);
        assert_eq!(Resolution::for_sizes(2.0, 1.0), Resolution::ReverseSecond);
        assert_eq!(Resolution::for_sizes(1.5, 1.5), Resolution::ReverseBoth);
    }
}
