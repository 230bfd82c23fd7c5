pub mod instance;

pub use instance::{BodyInstance, CameraFrame, CometInstance, Frame};
