//! Tree search over generated poses
//!
//! Nodes live in an arena owned by [`NodeGraph`] and refer to each other by
//! [`NodeId`]. Expansion is depth-first: a node's children are visited in
//! ascending weight order (insertion order within equal weights), each child
//! is fully explored before its next sibling, and the first child found on the
//! target path ends the search.

use std::fmt;

use itertools::Itertools;
use nalgebra::Vector3;

use crate::common::{to_point3, CorridorError, CorridorResult, RenderPoints};
use crate::procedural_generation::pose_generator::PoseGenerator;
use crate::procedural_generation::weight_buckets::WeightBuckets;
use crate::transforms::Pose;

/// Handle to a node stored in a [`NodeGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        NodeId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pose: Pose,
    parent: Option<NodeId>,
    children: WeightBuckets<NodeId>,
    depth: usize,
    /// Selection weight relative to the parent
    weight: f64,
    explored: bool,
    on_target_path: bool,
}

impl Node {
    pub fn root(pose: Pose) -> Self {
        Self {
            pose,
            parent: None,
            children: WeightBuckets::new(),
            depth: 0,
            weight: 0.0,
            explored: false,
            on_target_path: false,
        }
    }

    pub(crate) fn child(pose: Pose, parent: NodeId, depth: usize, weight: f64, on_target_path: bool) -> Self {
        Self {
            pose,
            parent: Some(parent),
            children: WeightBuckets::new(),
            depth,
            weight,
            explored: false,
            on_target_path,
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &WeightBuckets<NodeId> {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    pub fn is_on_target_path(&self) -> bool {
        self.on_target_path
    }
}

/// Limits on a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Nodes at this depth are never expanded, whatever `max_depth` samples
    pub depth_ceiling: usize,
    /// Stop (without a path) once the graph holds this many nodes
    pub max_nodes: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_ceiling: 1000,
            max_nodes: None,
        }
    }
}

#[derive(Debug)]
pub struct NodeGraph {
    generator: PoseGenerator,
    config: SearchConfig,
    nodes: Vec<Node>,
}

impl NodeGraph {
    pub fn new(generator: PoseGenerator) -> Self {
        Self::with_config(generator, SearchConfig::default())
    }

    pub fn with_config(generator: PoseGenerator, config: SearchConfig) -> Self {
        Self {
            generator,
            config,
            nodes: Vec::new(),
        }
    }

    /// Search from `start` towards `target`.
    ///
    /// Any previous tree is discarded. On success the returned path runs from
    /// the node that reached the target back to the root (inclusive); reverse
    /// it for start-to-target order. `None` means the tree was exhausted
    /// (or the node budget ran out) without reaching the target.
    pub fn generate(&mut self, start: Pose, target: &Pose) -> CorridorResult<Option<Vec<NodeId>>> {
        self.nodes.clear();
        let root = self.push(Node::root(start));

        match self.expand(root, target)? {
            Some(mut path) => {
                path.push(root);
                log::info!(
                    "reached target after {} nodes, path of {} poses",
                    self.nodes.len(),
                    path.len()
                );
                Ok(Some(path))
            }
            None => {
                log::info!("search exhausted after {} nodes without reaching target", self.nodes.len());
                Ok(None)
            }
        }
    }

    /// Expand `id` and search its subtree.
    ///
    /// Returns the path from the first on-target descendant back to, but not
    /// including, `id`. Every node on that path (and `id`) is marked as on the
    /// target path. Expanding an already explored node is an error.
    pub fn expand(&mut self, id: NodeId, target: &Pose) -> CorridorResult<Option<Vec<NodeId>>> {
        let node = self
            .nodes
            .get(id.0)
            .ok_or_else(|| CorridorError::Planning(format!("unknown node {}", id)))?;
        if node.explored {
            return Err(CorridorError::Planning(format!("node {} already expanded", id)));
        }

        self.populate(id, target)?;

        // Each frame holds a node and the position of its next child to visit
        let mut stack: Vec<(NodeId, usize)> = vec![(id, 0)];
        loop {
            let (current, index) = match stack.last_mut() {
                Some(frame) => {
                    let visiting = *frame;
                    frame.1 += 1;
                    visiting
                }
                None => return Ok(None),
            };

            let child = match self.nodes[current.0].children.get(index) {
                Some(&child) => child,
                None => {
                    stack.pop();
                    continue;
                }
            };

            if self.nodes[child.0].on_target_path {
                for &(ancestor, _) in &stack {
                    self.nodes[ancestor.0].on_target_path = true;
                }
                let mut path = vec![child];
                path.extend(stack[1..].iter().rev().map(|&(ancestor, _)| ancestor));
                return Ok(Some(path));
            }

            if let Some(max_nodes) = self.config.max_nodes {
                if self.nodes.len() >= max_nodes {
                    log::warn!("node budget of {} exhausted", max_nodes);
                    return Ok(None);
                }
            }

            self.populate(child, target)?;
            stack.push((child, 0));
        }
    }

    /// Mark `id` explored and attach its generated children
    fn populate(&mut self, id: NodeId, target: &Pose) -> CorridorResult<()> {
        self.nodes[id.0].explored = true;

        let depth = self.nodes[id.0].depth;
        if depth >= self.config.depth_ceiling {
            log::debug!("node {} hit the depth ceiling {}", id, self.config.depth_ceiling);
            return Ok(());
        }

        let generated = self.generator.generate(&self.nodes[id.0], id, target)?;
        let mut children = WeightBuckets::new();
        for (weight, bucket) in generated.into_buckets() {
            for node in bucket {
                children.insert(weight, self.push(node));
            }
        }
        log::debug!("expanded {} at depth {} into {} children", id, depth, children.len());
        self.nodes[id.0].children = children;
        Ok(())
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Root of the current tree, if a search has run
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn generator_mut(&mut self) -> &mut PoseGenerator {
        &mut self.generator
    }

    /// Poses along `path`, in the order given
    pub fn path_poses(&self, path: &[NodeId]) -> CorridorResult<Vec<&Pose>> {
        path.iter()
            .map(|&id| {
                self.node(id)
                    .map(Node::pose)
                    .ok_or_else(|| CorridorError::Planning(format!("unknown node {}", id)))
            })
            .collect()
    }

    /// Total straight-line length of `path`
    pub fn path_length(&self, path: &[NodeId]) -> CorridorResult<f64> {
        Ok(self
            .path_poses(path)?
            .into_iter()
            .tuple_windows()
            .map(|(a, b)| a.linear_distance(b))
            .sum())
    }

    /// Rendering view of the subtree rooted at `id`
    pub fn subtree(&self, id: NodeId) -> SubTree<'_> {
        SubTree { graph: self, id }
    }
}

impl RenderPoints for NodeGraph {
    type Points<'a> = TreeWalk<'a>;

    /// Walk of the whole tree, empty before the first search
    fn rendering_points(&self) -> TreeWalk<'_> {
        TreeWalk::new(self, self.root())
    }
}

/// A node and its descendants
#[derive(Debug, Clone, Copy)]
pub struct SubTree<'a> {
    graph: &'a NodeGraph,
    id: NodeId,
}

impl RenderPoints for SubTree<'_> {
    type Points<'a> = TreeWalk<'a> where Self: 'a;

    fn rendering_points(&self) -> TreeWalk<'_> {
        let start = self.graph.node(self.id).map(|_| self.id);
        TreeWalk::new(self.graph, start)
    }
}

/// Depth-first walk that returns to each parent after every child, so
/// consecutive points always share a tree edge.
///
/// A node yields its own position, then for each child the child's walk
/// followed by its own position again.
#[derive(Debug, Clone)]
pub struct TreeWalk<'a> {
    graph: &'a NodeGraph,
    stack: Vec<(NodeId, usize)>,
    pending: Option<NodeId>,
}

impl<'a> TreeWalk<'a> {
    fn new(graph: &'a NodeGraph, start: Option<NodeId>) -> Self {
        Self {
            graph,
            stack: Vec::new(),
            pending: start,
        }
    }

    fn node_position(&self, id: NodeId) -> Vector3<f64> {
        to_point3(self.graph.nodes[id.0].pose.position())
    }
}

impl Iterator for TreeWalk<'_> {
    type Item = Vector3<f64>;

    fn next(&mut self) -> Option<Vector3<f64>> {
        if let Some(id) = self.pending.take() {
            self.stack.push((id, 0));
            return Some(self.node_position(id));
        }

        let frame = self.stack.last_mut()?;
        let (id, index) = *frame;
        frame.1 += 1;

        match self.graph.nodes[id.0].children.get(index) {
            Some(&child) => {
                self.stack.push((child, 0));
                Some(self.node_position(child))
            }
            None => {
                self.stack.pop();
                let &(parent, _) = self.stack.last()?;
                Some(self.node_position(parent))
            }
        }
    }
}
