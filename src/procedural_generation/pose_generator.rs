//! Stochastic child-pose generation
//!
//! For each expansion the generator samples a child count and, per child, a
//! rotation/translation offset. The offset is applied in the parent's frame.
//! Children that land within the goal tolerances are replaced by the target
//! pose itself and flagged as being on the target path.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::common::{CorridorError, CorridorResult, DistanceWeights};
use crate::procedural_generation::constraints::{ConstraintKind, Constraints};
use crate::procedural_generation::node_graph::{Node, NodeId};
use crate::procedural_generation::weight_buckets::WeightBuckets;
use crate::transforms::Pose;

/// Upper bound on the children generated by one expansion
pub const MAX_CHILDREN: usize = 1024;

/// How the angular term compares two orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngularMetric {
    /// Raw dot product of the orientation vectors
    #[default]
    Dot,
    /// `1 - dot`: 0 when aligned, 2 when opposite
    Cosine,
}

impl AngularMetric {
    pub fn measure(self, a: &Pose, b: &Pose) -> f64 {
        match self {
            AngularMetric::Dot => a.orientation_dot(b),
            AngularMetric::Cosine => a.angular_distance(b),
        }
    }
}

/// Configuration for [`PoseGenerator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseGeneratorConfig {
    /// Factors applied to angular/linear distance when ranking children
    pub weights: DistanceWeights,
    /// A child within both distances of the target snaps onto it
    pub goal_tolerances: DistanceWeights,
    /// Angular term used for both the goal test and the ranking
    pub angular_metric: AngularMetric,
}

impl Default for PoseGeneratorConfig {
    fn default() -> Self {
        Self {
            weights: DistanceWeights::new(1.0, 1.0),
            goal_tolerances: DistanceWeights::new(1.0, 0.0),
            angular_metric: AngularMetric::default(),
        }
    }
}

#[derive(Debug)]
pub struct PoseGenerator {
    constraints: Constraints,
    config: PoseGeneratorConfig,
    rng: StdRng,
}

impl PoseGenerator {
    /// Create a generator seeded from system entropy
    pub fn new(constraints: Constraints, config: PoseGeneratorConfig) -> CorridorResult<Self> {
        Self::with_rng(constraints, config, StdRng::from_entropy())
    }

    /// Create a generator with a reproducible random stream
    pub fn with_seed(
        constraints: Constraints,
        config: PoseGeneratorConfig,
        seed: u64,
    ) -> CorridorResult<Self> {
        Self::with_rng(constraints, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(constraints: Constraints, config: PoseGeneratorConfig, rng: StdRng) -> CorridorResult<Self> {
        constraints.validate()?;
        Ok(Self {
            constraints,
            config,
            rng,
        })
    }

    pub fn config(&self) -> &PoseGeneratorConfig {
        &self.config
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Restart the random stream and every generator's sampling state
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.constraints.reset();
    }

    /// Generate the children of `node` (stored at `node_id`) ranked by
    /// selection weight plus heuristic distance to `target`.
    pub fn generate(
        &mut self,
        node: &Node,
        node_id: NodeId,
        target: &Pose,
    ) -> CorridorResult<WeightBuckets<Node>> {
        CorridorError::check_dimension(3, node.pose().dimension())?;
        CorridorError::check_dimension(3, target.dimension())?;

        let mut children = WeightBuckets::new();

        if let Some(max_depth) = self.constraints.sample(ConstraintKind::MaxDepth, &mut self.rng) {
            if node.depth() as f64 >= max_depth {
                log::debug!("node {} at depth {} pruned (max depth {})", node_id, node.depth(), max_depth);
                return Ok(children);
            }
        }

        let count = self.child_count()?;
        let metric = self.config.angular_metric;

        for _ in 0..count {
            let roll = self.sample_or(ConstraintKind::Roll, 0.0);
            let pitch = self.sample_or(ConstraintKind::Pitch, 0.0);
            let yaw = self.constraints.sample_required(ConstraintKind::Yaw, &mut self.rng)?;
            let tx = self.constraints.sample_required(ConstraintKind::Tx, &mut self.rng)?;
            let ty = self.constraints.sample_required(ConstraintKind::Ty, &mut self.rng)?;
            let tz = self.constraints.sample_required(ConstraintKind::Tz, &mut self.rng)?;

            let offset = Pose::from_position_orientation(&[tx, ty, tz], &[roll, pitch, yaw])?;
            let mut pose = offset.transformed(node.pose().transform())?;

            let ang = metric.measure(&pose, target);
            let lin = pose.linear_distance(target);
            let on_target_path = self.config.goal_tolerances.admits(ang, lin);
            let heuristic = if on_target_path {
                pose = target.clone();
                0.0
            } else {
                self.config.weights.combine(ang, lin)
            };

            let selection = self.config.weights.combine(
                metric.measure(node.pose(), &pose),
                node.pose().linear_distance(&pose),
            );

            log::trace!(
                "child of {}: {} selection {:.4} heuristic {:.4}{}",
                node_id,
                pose,
                selection,
                heuristic,
                if on_target_path { " (on target)" } else { "" }
            );

            let child = Node::child(pose, node_id, node.depth() + 1, selection, on_target_path);
            children.insert(selection + heuristic, child);
        }

        Ok(children)
    }

    /// Rounded `children` sample, capped at [`MAX_CHILDREN`]
    fn child_count(&mut self) -> CorridorResult<usize> {
        let sampled = self.sample_or(ConstraintKind::Children, 1.0);
        if !sampled.is_finite() {
            return Err(CorridorError::configuration(format!(
                "children sample {} is not a finite count",
                sampled
            )));
        }
        let count = sampled.round().max(0.0);
        if count > MAX_CHILDREN as f64 {
            log::warn!("children sample {} capped at {}", sampled, MAX_CHILDREN);
            return Ok(MAX_CHILDREN);
        }
        Ok(count as usize)
    }

    fn sample_or(&mut self, kind: ConstraintKind, default: f64) -> f64 {
        self.constraints.sample(kind, &mut self.rng).unwrap_or(default)
    }
}
