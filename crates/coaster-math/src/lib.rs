pub mod bounds;
pub mod frame;
pub mod vector;

pub use glam::{DMat4, DVec3, DVec4};
pub use bounds::Bounds3;
pub use frame::Frame;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
