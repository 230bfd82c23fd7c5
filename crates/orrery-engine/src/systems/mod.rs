pub mod camera;
pub mod collision;
pub mod color;
pub mod comets;
pub mod flash;
pub mod orbit;
pub mod picking;
pub mod rng;
