use glam::Vec3;

use crate::api::types::BodyId;
use crate::systems::color::Rgb;

/// Inputs from the presentation layer, applied at the start of the next tick.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Focus the camera on a body.
    Select { body: BodyId },
    /// Focus by display name.
    SelectName { name: String },
    /// Back to the overview.
    Deselect,
    /// Pointer is over `body`, or over nothing.
    Hover { body: Option<BodyId> },
    /// Pointer ray in world space; the nearest visible body becomes selected.
    Pick { origin: Vec3, direction: Vec3 },
    /// Average logo color finished loading for `body`.
    ColorSampled { body: BodyId, color: Rgb },
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
