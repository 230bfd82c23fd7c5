use crate::api::types::BodyId;
use crate::components::body::Body;
use crate::config::BodyConfig;

/// Authoritative body storage using a flat Vec.
/// Designed for small counts (single digits to low tens); ids are indices.
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(16),
        }
    }

    /// Build a registry from a parameter table, assigning ids in table order.
    pub fn from_configs(configs: &[BodyConfig]) -> Self {
        let mut registry = Self::new();
        for config in configs {
            registry.spawn_from(config);
        }
        registry
    }

    /// Add a body described by `config`. Returns its id.
    pub fn spawn_from(&mut self, config: &BodyConfig) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(Body::new(id, config));
        id
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.0 as usize)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        (id.0 as usize) < self.bodies.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    /// Ids of every orbiting (non-central) body, in registry order.
    pub fn orbiting_ids(&self) -> Vec<BodyId> {
        self.bodies
            .iter()
            .filter(|b| !b.is_central())
            .map(|b| b.id)
            .collect()
    }

    pub fn orbiting_count(&self) -> usize {
        self.bodies.iter().filter(|b| !b.is_central()).count()
    }

    /// Mutable access to two distinct bodies at once.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Body, &mut Body)> {
        let (i, j) = (a.0 as usize, b.0 as usize);
        if i == j || i >= self.bodies.len() || j >= self.bodies.len() {
            return None;
        }
        if i < j {
            let (left, right) = self.bodies.split_at_mut(j);
            Some((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.bodies.split_at_mut(i);
            Some((&mut right[0], &mut left[j]))
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn registry() -> BodyRegistry {
        BodyRegistry::from_configs(&[
            BodyConfig::central("Sun", 5.0),
            BodyConfig::orbiting("A", 10.0, 0.3, 1.0),
            BodyConfig::orbiting("B", 20.0, 0.2, 2.0),
        ])
    }

    #[test]
    fn ids_follow_table_order() {
        let reg = registry();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.find_by_name("B").unwrap().id, BodyId(2));
        assert!(reg.contains(BodyId(2)));
        assert!(!reg.contains(BodyId(3)));
    }

    #[test]
    fn orbiting_ids_skip_central() {
        let reg = registry();
        assert_eq!(reg.orbiting_ids(), vec![BodyId(1), BodyId(2)]);
        assert_eq!(reg.orbiting_count(), 2);
    }

    #[test]
    fn pair_mut_in_either_order() {
        let mut reg = registry();
        {
            let (a, b) = reg.pair_mut(BodyId(2), BodyId(1)).unwrap();
            assert_eq!(a.name, "B");
            assert_eq!(b.name, "A");
            a.position = Vec3::X;
        }
        assert_eq!(reg.get(BodyId(2)).unwrap().position, Vec3::X);
        assert!(reg.pair_mut(BodyId(1), BodyId(1)).is_none());
        assert!(reg.pair_mut(BodyId(1), BodyId(9)).is_none());
    }
}
