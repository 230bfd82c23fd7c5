use bytemuck::{Pod, Zeroable};

/// Dense identifier for a body in the registry (its spawn index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Unique identifier for a comet. Never reused within one simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CometId(pub u32);

/// An event communicated from the simulation to the presentation layer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OrreryEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl OrreryEvent {
    pub const FLOATS: usize = 4;

    /// A body was selected for inspection. `a` = body id.
    pub const INSPECT: f32 = 1.0;
    /// The inspection was closed.
    pub const CLOSE: f32 = 2.0;
    /// Two bodies touched. `a`, `b` = body ids.
    pub const COLLISION: f32 = 3.0;
    /// A comet was launched. `a` = comet id, `b` = target body id.
    pub const COMET_SPAWNED: f32 = 4.0;
    /// Dead comets were purged. `a` = how many.
    pub const COMETS_REAPED: f32 = 5.0;

    pub fn inspect(body: BodyId) -> Self {
        Self { kind: Self::INSPECT, a: body.0 as f32, b: 0.0, c: 0.0 }
    }

    pub fn close() -> Self {
        Self { kind: Self::CLOSE, ..Self::default() }
    }

    pub fn collision(a: BodyId, b: BodyId) -> Self {
        Self { kind: Self::COLLISION, a: a.0 as f32, b: b.0 as f32, c: 0.0 }
    }

    pub fn comet_spawned(comet: CometId, target: BodyId) -> Self {
        Self { kind: Self::COMET_SPAWNED, a: comet.0 as f32, b: target.0 as f32, c: 0.0 }
    }

    pub fn comets_reaped(count: usize) -> Self {
        Self { kind: Self::COMETS_REAPED, a: count as f32, b: 0.0, c: 0.0 }
    }
}
