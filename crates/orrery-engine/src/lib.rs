pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;
pub mod config;
pub mod error;
pub mod layouts;

pub use glam;

// Re-export key types at crate root for convenience
pub use api::orrery::Orrery;
pub use api::types::{BodyId, CometId, OrreryEvent};
pub use components::body::{Body, Direction, OrbitParams};
pub use components::comet::Comet;
pub use config::{
    BodyConfig, BodyRole, CameraConfig, CollisionConfig, CometConfig, OrreryConfig,
    PhaseProfile, ZoomBounds,
};
pub use error::{ConfigError, ConfigResult};
pub use core::registry::BodyRegistry;
pub use core::time::{FixedTimestep, IntervalTimer, SimClock};
pub use renderer::instance::{BodyInstance, CameraFrame, CometInstance, Frame};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{FrameBuffer, ProtocolLayout};
pub use systems::camera::{CameraController, CameraPose, CameraState};
pub use systems::collision::{CollisionDetector, CollisionEvent, Resolution};
pub use systems::color::{average_rgba, Rgb};
pub use systems::comets::{CometScheduler, CometTick};
pub use systems::orbit::{orbit_path, orbit_position};

pub use extensions::{Easing, lerp_vec3, ease_vec3, smooth_damp};
