mod forces;
mod quadtree;

use eframe::egui::Vec2;

use super::RenderGraph;
use forces::{
    accumulate_centering, accumulate_charge_for_node, accumulate_collision_pairs,
    accumulate_link_forces, ChargeParams, CollisionParams, LinkParams,
};
use quadtree::QuadNode;

/// Below this heat the simulation counts as converged and stops ticking
/// until something perturbs it.
pub(super) const ALPHA_MIN: f32 = 0.001;

/// Heat boost while a node is being dragged.
pub(super) const DRAG_ALPHA_TARGET: f32 = 0.3;

// d3's default cooling schedule: alpha relaxes toward alpha_target by this
// fraction per tick, reaching ALPHA_MIN from 1.0 in about 300 ticks.
const ALPHA_DECAY: f32 = 0.0228;

const VELOCITY_RETAIN: f32 = 0.6;
const BARNES_HUT_THETA: f32 = 0.7;
const CHARGE_SOFTENING: f32 = 100.0;

#[derive(Clone, Copy, Debug)]
pub(super) struct LayoutConfig {
    /// Target separation of linked pairs, world units.
    pub(super) link_distance: f32,
    /// Many-body charge, d3 convention: negative repels.
    pub(super) charge_strength: f32,
    /// Added to each node's radius for overlap avoidance.
    pub(super) collision_margin: f32,
    pub(super) center_strength: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            link_distance: 120.0,
            charge_strength: -1000.0,
            collision_margin: 8.0,
            center_strength: 0.05,
        }
    }
}

/// One simulation tick: accumulate link, charge, centering and collision
/// forces into per-node velocities, then integrate. Pinned nodes are held
/// at their pin and never moved by forces. Returns false once the
/// simulation has cooled below [`ALPHA_MIN`] (or has nothing to do), so the
/// caller can stop repainting.
pub(super) fn step_simulation(cache: &mut RenderGraph, config: &LayoutConfig) -> bool {
    if cache.nodes.is_empty() {
        return false;
    }

    if cache.alpha < ALPHA_MIN && cache.alpha_target < ALPHA_MIN {
        return false;
    }

    cache.alpha += (cache.alpha_target - cache.alpha) * ALPHA_DECAY;

    let node_count = cache.nodes.len();
    let scratch = &mut cache.physics_scratch;
    scratch.forces.clear();
    scratch.forces.resize(node_count, Vec2::ZERO);
    scratch.positions.clear();
    scratch.collision_radii.clear();

    let mut max_collision_radius = 0.0_f32;
    for node in &cache.nodes {
        scratch.positions.push(node.world_pos);
        let collision_radius = node.radius + config.collision_margin;
        scratch.collision_radii.push(collision_radius);
        max_collision_radius = max_collision_radius.max(collision_radius);
    }

    let forces = &mut scratch.forces;
    let positions = &scratch.positions;
    let collision_radii = &scratch.collision_radii;

    if node_count > 1
        && let Some(tree) = QuadNode::build(positions)
    {
        let charge = ChargeParams {
            strength: -config.charge_strength,
            softening: CHARGE_SOFTENING,
            theta: BARNES_HUT_THETA,
            alpha: cache.alpha,
        };
        for (index, force) in forces.iter_mut().enumerate() {
            accumulate_charge_for_node(&tree, index, positions, charge, force);
        }

        let max_collision_distance = max_collision_radius * 2.0;
        accumulate_collision_pairs(
            &tree,
            &tree,
            true,
            positions,
            collision_radii,
            CollisionParams {
                strength: 0.5,
                max_distance_sq: max_collision_distance * max_collision_distance,
            },
            forces,
        );
    }

    accumulate_link_forces(
        &cache.edges,
        &cache.degrees,
        positions,
        LinkParams {
            target_distance: config.link_distance,
            alpha: cache.alpha,
        },
        forces,
    );

    accumulate_centering(positions, config.center_strength, forces);

    for (index, node) in cache.nodes.iter_mut().enumerate() {
        if let Some(pin) = node.pinned {
            node.world_pos = pin;
            node.velocity = Vec2::ZERO;
            continue;
        }

        node.velocity = (node.velocity + forces[index]) * VELOCITY_RETAIN;
        node.world_pos += node.velocity;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GraphSpec, LinkSpec, NodeGroup, NodeSpec, RelationGraph};

    fn sim(nodes: Vec<NodeSpec>, links: Vec<LinkSpec>) -> RenderGraph {
        let graph = RelationGraph::build(GraphSpec { nodes, links }).unwrap();
        RenderGraph::from_graph(&graph).expect("non-empty graph")
    }

    fn run_to_rest(cache: &mut RenderGraph, config: &LayoutConfig) {
        let mut ticks = 0;
        while step_simulation(cache, config) {
            ticks += 1;
            assert!(ticks < 5_000, "simulation failed to cool");
        }
    }

    #[test]
    fn linked_pair_settles_near_target_distance() {
        let mut cache = sim(
            vec![
                NodeSpec::new("a", NodeGroup::Person, 12.0),
                NodeSpec::new("b", NodeGroup::Case, 12.0),
            ],
            vec![LinkSpec::new("a", "b", "charged in")],
        );
        let config = LayoutConfig::default();
        run_to_rest(&mut cache, &config);

        let distance = (cache.nodes[0].world_pos - cache.nodes[1].world_pos).length();
        assert!(
            (108.0..=132.0).contains(&distance),
            "pair settled at {distance}, expected 120 +/- 10%"
        );
    }

    #[test]
    fn empty_graph_is_a_no_op() {
        let graph = RelationGraph::build(GraphSpec::default()).unwrap();
        assert!(RenderGraph::from_graph(&graph).is_none());
    }

    #[test]
    fn single_node_centers_on_origin() {
        let mut cache = sim(vec![NodeSpec::new("only", NodeGroup::Company, 16.0)], vec![]);
        let config = LayoutConfig::default();
        run_to_rest(&mut cache, &config);

        assert!(cache.nodes[0].world_pos.length() < 5.0);
    }

    #[test]
    fn unlinked_nodes_repel() {
        let mut cache = sim(
            vec![
                NodeSpec::new("a", NodeGroup::Person, 12.0),
                NodeSpec::new("b", NodeGroup::Person, 12.0),
            ],
            vec![],
        );
        let initial = (cache.nodes[0].world_pos - cache.nodes[1].world_pos).length();
        let config = LayoutConfig::default();
        run_to_rest(&mut cache, &config);

        let settled = (cache.nodes[0].world_pos - cache.nodes[1].world_pos).length();
        assert!(settled > initial, "repulsion did not separate the pair");
    }

    #[test]
    fn overlapping_nodes_separate_past_collision_radii() {
        let mut cache = sim(
            vec![
                NodeSpec::new("a", NodeGroup::Company, 20.0),
                NodeSpec::new("b", NodeGroup::Company, 20.0),
            ],
            vec![],
        );
        let config = LayoutConfig::default();
        run_to_rest(&mut cache, &config);

        let distance = (cache.nodes[0].world_pos - cache.nodes[1].world_pos).length();
        // collision radius 20 + 8 each
        assert!(distance >= 50.0, "pair still overlapping at {distance}");
    }

    #[test]
    fn pinned_node_never_moves() {
        let mut cache = sim(
            vec![
                NodeSpec::new("pinned", NodeGroup::Person, 12.0),
                NodeSpec::new("free", NodeGroup::Case, 12.0),
            ],
            vec![LinkSpec::new("pinned", "free", "charged in")],
        );
        let pin = eframe::egui::vec2(40.0, -25.0);
        cache.nodes[0].pinned = Some(pin);
        cache.reheat();
        let free_before = cache.nodes[1].world_pos;

        let config = LayoutConfig::default();
        for _ in 0..50 {
            assert!(step_simulation(&mut cache, &config));
            assert_eq!(cache.nodes[0].world_pos, pin);
            assert_eq!(cache.nodes[0].velocity, Vec2::ZERO);
        }
        assert_ne!(cache.nodes[1].world_pos, free_before);

        // unpinning hands the node back to the simulation
        cache.nodes[0].pinned = None;
        cache.cool();
        let pinned_before = cache.nodes[0].world_pos;
        run_to_rest(&mut cache, &config);
        assert_ne!(cache.nodes[0].world_pos, pinned_before);
    }

    #[test]
    fn cooled_simulation_resumes_on_reheat() {
        let mut cache = sim(
            vec![
                NodeSpec::new("a", NodeGroup::Person, 12.0),
                NodeSpec::new("b", NodeGroup::Case, 12.0),
            ],
            vec![LinkSpec::new("a", "b", "charged in")],
        );
        let config = LayoutConfig::default();
        run_to_rest(&mut cache, &config);
        assert!(!step_simulation(&mut cache, &config));

        cache.reheat();
        assert!(step_simulation(&mut cache, &config));
        assert!(cache.alpha >= ALPHA_MIN);

        cache.cool();
        run_to_rest(&mut cache, &config);
        assert!(!step_simulation(&mut cache, &config));
    }
}
