use eframe::egui::{vec2, Vec2};

use super::quadtree::QuadNode;

/// Deterministic unit direction for coincident points, so overlapping nodes
/// always separate the same way.
fn separation_direction(seed_a: usize, seed_b: usize) -> Vec2 {
    let angle = ((seed_a as f32) * 0.618_034 + (seed_b as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

#[derive(Clone, Copy)]
pub(super) struct ChargeParams {
    pub(super) strength: f32,
    pub(super) softening: f32,
    pub(super) theta: f32,
    pub(super) alpha: f32,
}

fn repulsion_between(point_a: Vec2, point_b: Vec2, weight: f32, params: ChargeParams) -> Vec2 {
    let delta = point_a - point_b;
    let distance_sq = delta.length_sq();
    let distance = distance_sq.sqrt();
    let direction = if distance > 0.0001 {
        delta / distance
    } else {
        vec2(1.0, 0.0)
    };
    direction * ((params.strength * weight * params.alpha) / (distance_sq + params.softening))
}

/// Barnes-Hut charge accumulation: subtrees far enough away (side/distance
/// below theta) act as a single aggregated charge at their centroid.
pub(super) fn accumulate_charge_for_node(
    node: &QuadNode,
    index: usize,
    positions: &[Vec2],
    params: ChargeParams,
    force: &mut Vec2,
) {
    if node.weight <= 0.0 {
        return;
    }

    let point = positions[index];

    if node.is_leaf() {
        for &other in &node.indices {
            if other == index {
                continue;
            }
            *force += repulsion_between(point, positions[other], 1.0, params);
        }
        return;
    }

    let delta = point - node.centroid;
    let distance = delta.length_sq().max(0.0001).sqrt();
    let can_approximate =
        !node.bounds.contains(point) && (node.bounds.side_length() / distance) < params.theta;

    if can_approximate {
        *force += repulsion_between(point, node.centroid, node.weight, params);
        return;
    }

    for child in node.children.iter().flatten() {
        accumulate_charge_for_node(child, index, positions, params, force);
    }
}

#[derive(Clone, Copy)]
pub(super) struct LinkParams {
    pub(super) target_distance: f32,
    pub(super) alpha: f32,
}

/// Hooke-like spring toward the target separation. Strength and split bias
/// follow the endpoint degrees, so hubs stay put while leaves swing.
pub(super) fn accumulate_link_forces(
    edges: &[(usize, usize)],
    degrees: &[usize],
    positions: &[Vec2],
    params: LinkParams,
    forces: &mut [Vec2],
) {
    for &(source, target) in edges {
        if source == target {
            continue;
        }

        let delta = positions[target] - positions[source];
        let distance = delta.length_sq().sqrt();
        let direction = if distance > 0.0001 {
            delta / distance
        } else {
            separation_direction(source, target)
        };

        let degree_source = degrees[source].max(1) as f32;
        let degree_target = degrees[target].max(1) as f32;
        let strength = 1.0 / degree_source.min(degree_target);
        let magnitude = (distance - params.target_distance) * strength * params.alpha;

        let bias = degree_source / (degree_source + degree_target);
        forces[target] -= direction * (magnitude * bias);
        forces[source] += direction * (magnitude * (1.0 - bias));
    }
}

/// Gentle pull of the whole layout's centroid toward the world origin (the
/// viewport's content center).
pub(super) fn accumulate_centering(positions: &[Vec2], strength: f32, forces: &mut [Vec2]) {
    if positions.is_empty() {
        return;
    }

    let mut centroid = Vec2::ZERO;
    for position in positions {
        centroid += *position;
    }
    centroid /= positions.len() as f32;

    let correction = centroid * strength;
    for force in forces.iter_mut() {
        *force -= correction;
    }
}

#[derive(Clone, Copy)]
pub(super) struct CollisionParams {
    pub(super) strength: f32,
    pub(super) max_distance_sq: f32,
}

/// Dual-tree pass pushing apart any pair closer than the sum of their
/// collision radii (node size plus margin). Subtree pairs further apart
/// than the largest possible overlap are pruned wholesale.
pub(super) fn accumulate_collision_pairs(
    node_a: &QuadNode,
    node_b: &QuadNode,
    same_node: bool,
    positions: &[Vec2],
    collision_radii: &[f32],
    params: CollisionParams,
    forces: &mut [Vec2],
) {
    if node_a.bounds.distance_sq_to(node_b.bounds) > params.max_distance_sq {
        return;
    }

    if node_a.is_leaf() && node_b.is_leaf() {
        if same_node {
            for i in 0..node_a.indices.len() {
                for j in (i + 1)..node_a.indices.len() {
                    push_apart(
                        node_a.indices[i],
                        node_a.indices[j],
                        positions,
                        collision_radii,
                        params.strength,
                        forces,
                    );
                }
            }
        } else {
            for &from in &node_a.indices {
                for &to in &node_b.indices {
                    push_apart(from, to, positions, collision_radii, params.strength, forces);
                }
            }
        }
        return;
    }

    if same_node {
        for first in 0..4 {
            let Some(child_a) = node_a.children[first].as_ref() else {
                continue;
            };

            accumulate_collision_pairs(
                child_a,
                child_a,
                true,
                positions,
                collision_radii,
                params,
                forces,
            );

            for second in (first + 1)..4 {
                let Some(child_b) = node_a.children[second].as_ref() else {
                    continue;
                };
                accumulate_collision_pairs(
                    child_a,
                    child_b,
                    false,
                    positions,
                    collision_radii,
                    params,
                    forces,
                );
            }
        }
        return;
    }

    let split_a = if node_a.is_leaf() {
        false
    } else if node_b.is_leaf() {
        true
    } else {
        node_a.bounds.half_extent >= node_b.bounds.half_extent
    };

    if split_a {
        for child in node_a.children.iter().flatten() {
            accumulate_collision_pairs(
                child,
                node_b,
                false,
                positions,
                collision_radii,
                params,
                forces,
            );
        }
    } else {
        for child in node_b.children.iter().flatten() {
            accumulate_collision_pairs(
                node_a,
                child,
                false,
                positions,
                collision_radii,
                params,
                forces,
            );
        }
    }
}

fn push_apart(
    from: usize,
    to: usize,
    positions: &[Vec2],
    collision_radii: &[f32],
    strength: f32,
    forces: &mut [Vec2],
) {
    let delta = positions[from] - positions[to];
    let distance = delta.length_sq().sqrt();
    let min_distance = collision_radii[from] + collision_radii[to];
    if distance >= min_distance {
        return;
    }

    let direction = if distance > 0.0001 {
        delta / distance
    } else {
        separation_direction(from, to)
    };

    let push = (min_distance - distance) * strength;
    forces[from] += direction * push;
    forces[to] -= direction * push;
}
