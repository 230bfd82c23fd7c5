use crate::api::types::BodyId;
use crate::core::registry::BodyRegistry;

/// Count every active flash down by `dt`.
///
/// This is the only place a flash is cleared. A flash raised again before it
/// expires restarts from the full duration. Returns the bodies that stopped
/// flashing during this tick.
pub fn tick_flashes(registry: &mut BodyRegistry, dt: f32) -> Vec<BodyId> {
    let mut cleared = Vec::new();
    for body in registry.iter_mut() {
        if body.decay_flash(dt) {
            cleared.push(body.id);
        }
    }
    cleared
}
