//! # corridor_gen
//!
//! Procedural generation of corridors: chains of poses grown from a start
//! pose towards a target by sampling constrained rotations and translations.
//!
//! ## Modules
//!
//! - `common`: Shared error type, traits and distance weighting
//! - `transforms`: Homogeneous transforms and poses
//! - `geometry`: Lines, boxes and triangles with intersection queries
//! - `randomization`: Constant, uniform, normal and beta parameter generators
//! - `procedural_generation`: Pose generation and the node graph search

pub mod common;
pub mod geometry;
pub mod procedural_generation;
pub mod randomization;
pub mod transforms;

pub use common::*;

pub mod prelude {
    pub use crate::common::*;
    pub use crate::geometry::{BoundingBox, ClosestPoints, Line, Triangle};
    pub use crate::procedural_generation::{
        AngularMetric, ConstraintKind, Constraints, NodeGraph, NodeId, PoseGenerator, PoseGeneratorConfig,
        SearchConfig,
    };
    pub use crate::randomization::{
        BetaGenerator, ConstantGenerator, NormalGenerator, UniformGenerator,
    };
    pub use crate::transforms::{compose_transforms, Pose, Transform};
}
