//! Procedural corridor generation
//!
//! A [`PoseGenerator`] samples candidate child poses from a set of
//! [`Constraints`]; a [`NodeGraph`] grows a tree of those poses depth-first,
//! best child first, until one lands on the target.
//!
//! # Example
//!
//! ```
//! use corridor_gen::procedural_generation::{
//!     ConstraintKind, Constraints, NodeGraph, PoseGenerator, PoseGeneratorConfig,
//! };
//! use corridor_gen::randomization::ConstantGenerator;
//! use corridor_gen::transforms::Pose;
//!
//! let constraints = Constraints::new()
//!     .with(ConstraintKind::Yaw, ConstantGenerator::new(0.0))
//!     .with(ConstraintKind::Tx, ConstantGenerator::new(1.0))
//!     .with(ConstraintKind::Ty, ConstantGenerator::new(0.0))
//!     .with(ConstraintKind::Tz, ConstantGenerator::new(0.0));
//! let generator = PoseGenerator::with_seed(constraints, PoseGeneratorConfig::default(), 1).unwrap();
//! let mut graph = NodeGraph::new(generator);
//!
//! let target = Pose::from_position_orientation(&[3.0, 0.0, 0.0], &[0.0, 0.0, 0.0]).unwrap();
//! let path = graph.generate(Pose::origin(3).unwrap(), &target).unwrap().unwrap();
//! assert_eq!(path.len(), 4);
//! ```

pub mod constraints;
pub mod node_graph;
pub mod pose_generator;
pub mod weight_buckets;

pub use constraints::{ConstraintKind, Constraints};
pub use node_graph::{Node, NodeGraph, NodeId, SearchConfig, SubTree, TreeWalk};
pub use pose_generator::{AngularMetric, PoseGenerator, PoseGeneratorConfig, MAX_CHILDREN};
pub use weight_buckets::WeightBuckets;
