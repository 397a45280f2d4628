use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadNode;

/// Charges closer than this (squared) are softened to avoid singular pushes.
const DISTANCE_MIN_SQ: f32 = 1.0;

#[derive(Clone, Copy)]
pub(super) struct ChargeParams {
    /// Per-body strength already scaled by the current alpha; negative repels.
    pub(super) strength: f32,
    pub(super) theta_sq: f32,
}

#[derive(Clone, Copy)]
pub(super) struct CollisionParams {
    pub(super) strength: f32,
    pub(super) max_reach_sq: f32,
}

/// Deterministic unit vector used when two bodies sit on the same point.
pub(super) fn tie_breaker(first: usize, second: usize) -> Vec2 {
    let angle = ((first as f32) * 0.618_034 + (second as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

fn charge_from(delta: Vec2, strength: f32) -> Vec2 {
    let mut distance_sq = delta.length_sq();
    if distance_sq < DISTANCE_MIN_SQ {
        distance_sq = (DISTANCE_MIN_SQ * distance_sq).sqrt();
    }
    delta * (strength / distance_sq)
}

/// Barnes-Hut many-body velocity change for one body.
pub(super) fn accumulate_charge(
    cell: &QuadNode,
    index: usize,
    positions: &[Vec2],
    params: ChargeParams,
    velocity_delta: &mut Vec2,
) {
    if cell.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if cell.is_leaf() {
        for &other in &cell.bodies {
            if other == index {
                continue;
            }
            let mut delta = positions[other] - point;
            if delta.length_sq() <= f32::EPSILON {
                delta = tie_breaker(index, other) * 1e-3;
            }
            *velocity_delta += charge_from(delta, params.strength);
        }
        return;
    }

    let delta = cell.center_of_mass - point;
    let side = cell.bounds.side_length();
    let far_enough = !cell.bounds.contains(point) && side * side < params.theta_sq * delta.length_sq();
    if far_enough {
        *velocity_delta += charge_from(delta, params.strength * cell.mass);
        return;
    }

    for child in cell.children() {
        accumulate_charge(child, index, positions, params, velocity_delta);
    }
}

fn collide(
    first: usize,
    second: usize,
    predicted: &[Vec2],
    radii: &[f32],
    strength: f32,
    velocity_deltas: &mut [Vec2],
) {
    let reach = radii[first] + radii[second];
    let delta = predicted[first] - predicted[second];
    let distance_sq = delta.length_sq();
    if distance_sq >= reach * reach {
        return;
    }

    let distance = distance_sq.sqrt();
    let push = if distance > 1e-4 {
        delta * ((reach - distance) / distance * strength)
    } else {
        tie_breaker(first, second) * (reach * strength)
    };

    let first_sq = radii[first] * radii[first];
    let second_sq = radii[second] * radii[second];
    let share = second_sq / (first_sq + second_sq);
    velocity_deltas[first] += push * share;
    velocity_deltas[second] -= push * (1.0 - share);
}

/// Visits every pair of cells that can contain overlapping circles and pushes
/// overlapping bodies apart, the smaller body taking the larger share.
pub(super) fn accumulate_collisions(
    cell_a: &QuadNode,
    cell_b: &QuadNode,
    same_cell: bool,
    predicted: &[Vec2],
    radii: &[f32],
    params: CollisionParams,
    velocity_deltas: &mut [Vec2],
) {
    if cell_a.bounds.gap_sq(cell_b.bounds) > params.max_reach_sq {
        return;
    }

    if cell_a.is_leaf() && cell_b.is_leaf() {
        if same_cell {
            for (offset, &first) in cell_a.bodies.iter().enumerate() {
                for &second in &cell_a.bodies[offset + 1..] {
                    collide(first, second, predicted, radii, params.strength, velocity_deltas);
                }
            }
        } else {
            for &first in &cell_a.bodies {
                for &second in &cell_b.bodies {
                    collide(first, second, predicted, radii, params.strength, velocity_deltas);
                }
            }
        }
        return;
    }

    if same_cell {
        let children = cell_a.children().collect::<Vec<_>>();
        for (offset, child) in children.iter().enumerate() {
            accumulate_collisions(child, child, true, predicted, radii, params, velocity_deltas);
            for other in &children[offset + 1..] {
                accumulate_collisions(
                    child,
                    other,
                    false,
                    predicted,
                    radii,
                    params,
                    velocity_deltas,
                );
            }
        }
        return;
    }

    let split_a = !cell_a.is_leaf()
        && (cell_b.is_leaf() || cell_a.bounds.half_extent >= cell_b.bounds.half_extent);

    if split_a {
        for child in cell_a.children() {
            accumulate_collisions(child, cell_b, false, predicted, radii, params, velocity_deltas);
        }
    } else {
        for child in cell_b.children() {
            accumulate_collisions(cell_a, child, false, predicted, radii, params, velocity_deltas);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_charge_pushes_bodies_apart() {
        let positions = vec![vec2(0.0, 0.0), vec2(10.0, 0.0)];
        let tree = QuadNode::build(&positions).expect("tree builds");
        let params = ChargeParams {
            strength: -100.0,
            theta_sq: 0.81,
        };

        let mut left = Vec2::ZERO;
        let mut right = Vec2::ZERO;
        accumulate_charge(&tree, 0, &positions, params, &mut left);
        accumulate_charge(&tree, 1, &positions, params, &mut right);

        assert!(left.x < 0.0);
        assert!(right.x > 0.0);
        assert!((left.x + right.x).abs() < 1e-4);
        assert!((left.x + 10.0).abs() < 1e-4, "expected -100 * 10 / 100, got {left:?}");
    }

    #[test]
    fn far_clusters_are_approximated_consistently() {
        let mut positions = vec![vec2(0.0, 0.0)];
        for index in 0..12 {
            positions.push(vec2(500.0 + (index % 4) as f32, (index / 4) as f32));
        }
        let tree = QuadNode::build(&positions).expect("tree builds");
        let params = ChargeParams {
            strength: -1.0,
            theta_sq: 0.81,
        };

        let mut approximated = Vec2::ZERO;
        accumulate_charge(&tree, 0, &positions, params, &mut approximated);

        let exact = positions[1..]
            .iter()
            .fold(Vec2::ZERO, |sum, other| sum + charge_from(*other - positions[0], -1.0));
        assert!((approximated - exact).length() < exact.length() * 0.05);
    }

    #[test]
    fn overlapping_circles_get_opposite_impulses() {
        let predicted = vec![vec2(0.0, 0.0), vec2(6.0, 0.0), vec2(200.0, 0.0)];
        let radii = vec![5.0, 5.0, 5.0];
        let tree = QuadNode::build(&predicted).expect("tree builds");
        let mut deltas = vec![Vec2::ZERO; 3];
        accumulate_collisions(
            &tree,
            &tree,
            true,
            &predicted,
            &radii,
            CollisionParams {
                strength: 1.0,
                max_reach_sq: 100.0,
            },
            &mut deltas,
        );

        assert!(deltas[0].x < 0.0);
        assert!(deltas[1].x > 0.0);
        assert!((deltas[1].x - deltas[0].x - 4.0).abs() < 1e-4);
        assert_eq!(deltas[2], Vec2::ZERO);
    }

    #[test]
    fn coincident_circles_are_separated() {
        let predicted = vec![vec2(1.0, 1.0), vec2(1.0, 1.0)];
        let radii = vec![4.0, 4.0];
        let mut deltas = vec![Vec2::ZERO; 2];
        collide(0, 1, &predicted, &radii, 1.0, &mut deltas);
        assert!(deltas[0].length() > 0.0);
        assert!((deltas[0] + deltas[1]).length() < 1e-4);
    }
}
