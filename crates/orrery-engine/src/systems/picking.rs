use glam::Vec3;

use crate::api::types::BodyId;
use crate::core::registry::BodyRegistry;

/// Distance along a normalized ray to the first hit on a sphere, if any.
/// A ray starting inside the sphere hits its far side.
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let near = -b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + root;
    (far >= 0.0).then_some(far)
}

/// Nearest visible body hit by the ray. Hovered bodies use their enlarged size.
pub fn pick(registry: &BodyRegistry, origin: Vec3, direction: Vec3, hover_scale: f32) -> Option<BodyId> {
    let dir = direction.try_normalize()?;
    registry
        .iter()
        .filter(|b| b.visible)
        .filter_map(|b| {
            ray_sphere(origin, dir, b.position, b.rendered_size(hover_scale)).map(|t| (b.id, t))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Mark `target` as the only hovered body (or clear hover with `None`).
/// Unknown ids clear hover.
pub fn apply_hover(registry: &mut BodyRegistry, target: Option<BodyId>) {
    for body in registry.iter_mut() {
        body.hovered = Some(body.id) == target;
    }
}

/// Show only `focused`, or everything when `None`.
pub fn apply_isolation(registry: &mut BodyRegistry, focused: Option<BodyId>) {
    for body in registry.iter_mut() {
        body.visible = focused.map_or(true, |id| id == body.id);
    }
}
