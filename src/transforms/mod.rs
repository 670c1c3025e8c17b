//! Transform algebra: homogeneous rigid transforms and poses built on them

pub mod transform;
pub mod pose;

pub use transform::{compose_transforms, Transform};
pub use pose::Pose;
