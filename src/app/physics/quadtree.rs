use eframe::egui::{vec2, Vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 10;

#[derive(Clone, Copy)]
pub(super) struct QuadBounds {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl QuadBounds {
    fn from_points(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let center = (min + max) * 0.5;
        let span = (max.x - min.x).max(max.y - min.y).max(1.0);

        Some(Self {
            center,
            half_extent: (span * 0.5) + 1.0,
        })
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.half_extent
            && (point.y - self.center.y).abs() <= self.half_extent
    }

    pub(super) fn side_length(self) -> f32 {
        self.half_extent * 2.0
    }

    pub(super) fn distance_sq_to(self, other: Self) -> f32 {
        let dx = (self.center.x - other.center.x).abs() - (self.half_extent + other.half_extent);
        let dy = (self.center.y - other.center.y).abs() - (self.half_extent + other.half_extent);
        let dx = dx.max(0.0);
        let dy = dy.max(0.0);
        (dx * dx) + (dy * dy)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = match quadrant {
            0 => vec2(-quarter, -quarter),
            1 => vec2(quarter, -quarter),
            2 => vec2(-quarter, quarter),
            _ => vec2(quarter, quarter),
        };

        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let lower = point.y >= self.center.y;
        match (right, lower) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }
}

/// Barnes-Hut quadtree over node positions. Interior nodes carry the
/// centroid and point count of their subtree so distant clusters can be
/// approximated as a single charge.
pub(super) struct QuadNode {
    pub(super) bounds: QuadBounds,
    pub(super) centroid: Vec2,
    pub(super) weight: f32,
    pub(super) indices: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let bounds = QuadBounds::from_points(positions)?;
        let indices = (0..positions.len()).collect::<Vec<_>>();
        Some(Self::build_node(bounds, indices, positions, 0))
    }

    fn build_node(bounds: QuadBounds, indices: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let mut centroid = Vec2::ZERO;
        for &index in &indices {
            centroid += positions[index];
        }

        let weight = indices.len() as f32;
        if weight > 0.0 {
            centroid /= weight;
        }

        let mut node = Self {
            bounds,
            centroid,
            weight,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || node.indices.len() <= LEAF_CAPACITY {
            return node;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.indices {
            buckets[bounds.quadrant_for(positions[index])].push(index);
        }

        // All points collapsed into one quadrant: splitting further cannot
        // separate them.
        let occupied = buckets.iter().filter(|bucket| !bucket.is_empty()).count();
        if occupied <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            node.children[quadrant] = Some(Box::new(Self::build_node(
                bounds.child(quadrant),
                bucket,
                positions,
                depth + 1,
            )));
        }
        node.indices.clear();
        node
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_builds_nothing() {
        assert!(QuadNode::build(&[]).is_none());
    }

    #[test]
    fn root_weight_counts_every_point() {
        let positions = (0..40)
            .map(|i| vec2((i % 7) as f32 * 13.0, (i / 7) as f32 * 9.0))
            .collect::<Vec<_>>();
        let tree = QuadNode::build(&positions).unwrap();

        assert_eq!(tree.weight, positions.len() as f32);
        for point in &positions {
            assert!(tree.bounds.contains(*point));
        }
    }

    #[test]
    fn coincident_points_terminate_without_splitting() {
        let positions = vec![vec2(5.0, 5.0); 100];
        let tree = QuadNode::build(&positions).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.indices.len(), 100);
    }

    #[test]
    fn disjoint_bounds_have_positive_distance() {
        let a = QuadBounds {
            center: vec2(0.0, 0.0),
            half_extent: 1.0,
        };
        let b = QuadBounds {
            center: vec2(10.0, 0.0),
            half_extent: 1.0,
        };
        assert!(a.distance_sq_to(b) > 0.0);
        assert_eq!(a.distance_sq_to(a), 0.0);
    }
}
