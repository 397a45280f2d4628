use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 4;
const MAX_DEPTH: usize = 12;

#[derive(Clone, Copy, Debug)]
pub(super) struct QuadBounds {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl QuadBounds {
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), point| (min.min(*point), max.max(*point)));

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let span = (max - min).max_elem().max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half_extent: span * 0.5 + 1.0,
        })
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.half_extent
            && (point.y - self.center.y).abs() <= self.half_extent
    }

    pub(super) fn side_length(self) -> f32 {
        self.half_extent * 2.0
    }

    /// Squared gap between two boxes; zero when they touch or overlap.
    pub(super) fn gap_sq(self, other: Self) -> f32 {
        let reach = self.half_extent + other.half_extent;
        let dx = ((self.center.x - other.center.x).abs() - reach).max(0.0);
        let dy = ((self.center.y - other.center.y).abs() - reach).max(0.0);
        dx * dx + dy * dy
    }

    fn quadrant(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = vec2(
            if quadrant & 1 == 0 { -quarter } else { quarter },
            if quadrant & 2 == 0 { -quarter } else { quarter },
        );
        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_of(self, point: Vec2) -> usize {
        usize::from(point.x >= self.center.x) | (usize::from(point.y >= self.center.y) << 1)
    }
}

/// Region quadtree over node positions; `mass` counts the bodies below a cell and
/// `center_of_mass` is their mean position.
pub(super) struct QuadNode {
    pub(super) bounds: QuadBounds,
    pub(super) center_of_mass: Vec2,
    pub(super) mass: f32,
    pub(super) bodies: Vec<usize>,
    pub(super) children: [Option<Box<QuadNode>>; 4],
}

impl QuadNode {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let bounds = QuadBounds::enclosing(positions)?;
        let bodies = (0..positions.len()).collect::<Vec<_>>();
        Some(Self::subdivide(bounds, bodies, positions, 0))
    }

    fn subdivide(bounds: QuadBounds, bodies: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let mass = bodies.len() as f32;
        let center_of_mass = if bodies.is_empty() {
            bounds.center
        } else {
            bodies
                .iter()
                .fold(Vec2::ZERO, |sum, &body| sum + positions[body])
                / mass
        };

        let mut node = Self {
            bounds,
            center_of_mass,
            mass,
            bodies,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || node.bodies.len() <= LEAF_CAPACITY {
            return node;
        }

        let mut buckets: [Vec<usize>; 4] = std::array::from_fn(|_| Vec::new());
        for &body in &node.bodies {
            buckets[bounds.quadrant_of(positions[body])].push(body);
        }

        // Coincident bodies land in one bucket; splitting further would never separate them.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                node.children[quadrant] = Some(Box::new(Self::subdivide(
                    bounds.quadrant(quadrant),
                    bucket,
                    positions,
                    depth + 1,
                )));
            }
        }
        node.bodies.clear();
        node
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub(super) fn children(&self) -> impl Iterator<Item = &QuadNode> {
        self.children.iter().filter_map(|child| child.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_bodies(node: &QuadNode) -> usize {
        node.bodies.len() + node.children().map(count_bodies).sum::<usize>()
    }

    #[test]
    fn every_body_lands_in_exactly_one_leaf() {
        let positions = (0..40)
            .map(|index| vec2((index % 7) as f32 * 13.0, (index / 7) as f32 * -9.0))
            .collect::<Vec<_>>();
        let tree = QuadNode::build(&positions).expect("tree builds");
        assert_eq!(count_bodies(&tree), positions.len());
        assert_eq!(tree.mass, positions.len() as f32);
        assert!(!tree.is_leaf());
    }

    #[test]
    fn coincident_points_stay_in_one_leaf() {
        let positions = vec![vec2(3.0, 3.0); 9];
        let tree = QuadNode::build(&positions).expect("tree builds");
        assert!(tree.is_leaf());
        assert_eq!(tree.bodies.len(), 9);
    }

    #[test]
    fn empty_or_non_finite_input_has_no_tree() {
        assert!(QuadNode::build(&[]).is_none());
        assert!(QuadNode::build(&[vec2(f32::NAN, 0.0)]).is_none());
    }

    #[test]
    fn gap_between_separated_boxes() {
        let left = QuadBounds {
            center: vec2(0.0, 0.0),
            half_extent: 1.0,
        };
        let right = QuadBounds {
            center: vec2(5.0, 0.0),
            half_extent: 1.0,
        };
        assert_eq!(left.gap_sq(right), 9.0);
        assert_eq!(left.gap_sq(left), 0.0);
        assert!(left.contains(vec2(1.0, -1.0)));
        assert!(!left.contains(vec2(1.5, 0.0)));
    }
}
