//! Spatial octree for sub-linear neighbour queries over boid positions.
//!
//! The tree is rebuilt from scratch every tick: [`Octree::clear`] collapses it
//! back to an empty root leaf and the flock re-inserts every boid. Entries are
//! identified by their index in the flock, so the tree never borrows boids.

use crate::physics::aabb3d::Aabb3d;
use crate::physics::math::{Scalar, Vector};

pub const DEFAULT_LEAF_CAPACITY: usize = 8;
pub const DEFAULT_MIN_NODE_SIZE: Scalar = 5.0;
pub const DEFAULT_QUERY_MARGIN: Scalar = 1.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeEntry {
    pub index: usize,
    pub position: Vector,
}

/// A neighbour found by [`Octree::find_neighbors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub position: Vector,
    pub distance: Scalar,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OctreeStats {
    pub node_count: usize,
    pub leaf_count: usize,
    pub entry_count: usize,
    pub max_depth: usize,
}

#[derive(Debug)]
pub enum OctreeNode {
    Leaf {
        bounds: Aabb3d,
        entries: Vec<OctreeEntry>,
    },
    Internal {
        bounds: Aabb3d,
        children: Box<[OctreeNode; 8]>,
    },
}

impl OctreeNode {
    pub fn leaf(bounds: Aabb3d) -> Self {
        OctreeNode::Leaf {
            bounds,
            entries: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Aabb3d {
        match self {
            OctreeNode::Leaf { bounds, .. } => *bounds,
            OctreeNode::Internal { bounds, .. } => *bounds,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, OctreeNode::Leaf { .. })
    }

    /// Entries held directly by this node. Always empty for internal nodes.
    pub fn entries(&self) -> &[OctreeEntry] {
        match self {
            OctreeNode::Leaf { entries, .. } => entries,
            OctreeNode::Internal { .. } => &[],
        }
    }

    pub fn children(&self) -> Option<&[OctreeNode; 8]> {
        match self {
            OctreeNode::Leaf { .. } => None,
            OctreeNode::Internal { children, .. } => Some(children),
        }
    }

    /// Inserts `entry` into the deepest node containing it. Returns `false`
    /// without touching the tree when the position lies outside this node.
    pub fn insert(&mut self, entry: OctreeEntry, capacity: usize, min_size: Scalar) -> bool {
        if !self.bounds().contains(entry.position) {
            return false;
        }

        let should_subdivide = match self {
            OctreeNode::Internal { bounds, children } => {
                let octant = bounds.octant_index(entry.position);
                return children[octant].insert(entry, capacity, min_size);
            }
            OctreeNode::Leaf { bounds, entries } => {
                entries.push(entry);
                entries.len() > capacity && bounds.diagonal() > min_size
            }
        };

        if should_subdivide {
            self.subdivide(capacity, min_size);
        }

        true
    }

    /// Splits a leaf into eight half-size octants and moves its entries down.
    pub fn subdivide(&mut self, capacity: usize, min_size: Scalar) {
        let OctreeNode::Leaf { bounds, entries } = self else {
            return;
        };

        let bounds = *bounds;
        let entries = std::mem::take(entries);
        let mut children = Box::new(bounds.octants().map(OctreeNode::leaf));

        for entry in entries {
            let octant = bounds.octant_index(entry.position);
            children[octant].insert(entry, capacity, min_size);
        }

        *self = OctreeNode::Internal { bounds, children };
    }

    /// Visits every entry within `radius` of `center`, pruning subtrees whose
    /// bounds miss the sphere.
    pub fn visit_range<F>(&self, center: Vector, radius: Scalar, visitor: &mut F)
    where
        F: FnMut(&OctreeEntry, Scalar),
    {
        if !self.bounds().intersects_sphere(center, radius) {
            return;
        }

        match self {
            OctreeNode::Leaf { entries, .. } => {
                let radius_squared = radius * radius;
                for entry in entries {
                    let distance_squared = entry.position.distance_squared(center);
                    if distance_squared <= radius_squared {
                        visitor(entry, distance_squared);
                    }
                }
            }
            OctreeNode::Internal { children, .. } => {
                for child in children.iter() {
                    child.visit_range(center, radius, visitor);
                }
            }
        }
    }

    pub fn query_range(&self, center: Vector, radius: Scalar, results: &mut Vec<OctreeEntry>) {
        self.visit_range(center, radius, &mut |entry, _| results.push(*entry));
    }

    /// Drops every entry and collapses the subtree to a single empty leaf.
    pub fn clear(&mut self) {
        *self = OctreeNode::leaf(self.bounds());
    }

    fn accumulate_stats(&self, depth: usize, stats: &mut OctreeStats) {
        stats.node_count += 1;
        stats.max_depth = stats.max_depth.max(depth);

        match self {
            OctreeNode::Leaf { entries, .. } => {
                stats.leaf_count += 1;
                stats.entry_count += entries.len();
            }
            OctreeNode::Internal { children, .. } => {
                for child in children.iter() {
                    child.accumulate_stats(depth + 1, stats);
                }
            }
        }
    }

    fn collect_bounds(&self, bounds: &mut Vec<Aabb3d>, depth: usize, max_depth: Option<usize>) {
        if let Some(max_depth) = max_depth {
            if depth > max_depth {
                return;
            }
        }

        bounds.push(self.bounds());

        if let OctreeNode::Internal { children, .. } = self {
            for child in children.iter() {
                child.collect_bounds(bounds, depth + 1, max_depth);
            }
        }
    }
}

#[derive(Debug)]
pub struct Octree {
    root: OctreeNode,
    pub leaf_capacity: usize,
    pub min_node_size: Scalar,
    pub query_margin: Scalar,
    len: usize,
}

impl Octree {
    pub fn new(bounds: Aabb3d) -> Self {
        Self {
            root: OctreeNode::leaf(bounds),
            leaf_capacity: DEFAULT_LEAF_CAPACITY,
            min_node_size: DEFAULT_MIN_NODE_SIZE,
            query_margin: DEFAULT_QUERY_MARGIN,
            len: 0,
        }
    }

    pub fn with_leaf_capacity(mut self, leaf_capacity: usize) -> Self {
        self.leaf_capacity = leaf_capacity.max(1);
        self
    }

    pub fn with_min_node_size(mut self, min_node_size: Scalar) -> Self {
        self.min_node_size = min_node_size;
        self
    }

    pub fn with_query_margin(mut self, query_margin: Scalar) -> Self {
        self.query_margin = query_margin.max(1.0);
        self
    }

    pub fn root(&self) -> &OctreeNode {
        &self.root
    }

    pub fn bounds(&self) -> Aabb3d {
        self.root.bounds()
    }

    /// Replaces the root region. Existing entries are discarded.
    pub fn set_bounds(&mut self, bounds: Aabb3d) {
        self.root = OctreeNode::leaf(bounds);
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, entry: OctreeEntry) -> bool {
        let inserted = self
            .root
            .insert(entry, self.leaf_capacity, self.min_node_size);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
    }

    /// Clears the tree and inserts `entries`. Returns how many were rejected
    /// for lying outside the root bounds.
    pub fn rebuild(&mut self, entries: impl IntoIterator<Item = OctreeEntry>) -> usize {
        self.clear();
        entries
            .into_iter()
            .filter(|entry| !self.insert(*entry))
            .count()
    }

    pub fn query_range(&self, center: Vector, radius: Scalar, results: &mut Vec<OctreeEntry>) {
        self.root.query_range(center, radius, results);
    }

    /// Entries near `position` excluding `index` itself, sorted nearest first.
    ///
    /// The search sphere is widened by `query_margin` so entries sitting right
    /// on the requested radius are not lost; callers filter by their own ranges.
    pub fn find_neighbors_into(
        &self,
        index: usize,
        position: Vector,
        radius: Scalar,
        neighbors: &mut Vec<Neighbor>,
    ) {
        neighbors.clear();
        self.root.visit_range(
            position,
            radius * self.query_margin,
            &mut |entry, distance_squared| {
                if entry.index != index {
                    neighbors.push(Neighbor {
                        index: entry.index,
                        position: entry.position,
                        distance: distance_squared.sqrt(),
                    });
                }
            },
        );
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }

    pub fn find_neighbors(&self, index: usize, position: Vector, radius: Scalar) -> Vec<Neighbor> {
        let mut neighbors = Vec::new();
        self.find_neighbors_into(index, position, radius, &mut neighbors);
        neighbors
    }

    pub fn stats(&self) -> OctreeStats {
        let mut stats = OctreeStats::default();
        self.root.accumulate_stats(0, &mut stats);
        stats
    }

    pub fn node_bounds(&self, max_depth: Option<usize>) -> Vec<Aabb3d> {
        let mut bounds = Vec::new();
        self.root.collect_bounds(&mut bounds, 0, max_depth);
        bounds
    }
}
