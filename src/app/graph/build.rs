use eframe::egui::{vec2, Vec2};

use crate::data::RelationGraph;
use crate::util::stable_pair;

use super::super::render_utils::node_color;
use super::super::{PhysicsScratch, RenderGraph, SimNode, ViewScratch};

// Golden-angle phyllotaxis spacing for initial placement.
const SEED_RADIUS_STEP: f32 = 25.0;
const GOLDEN_ANGLE: f32 = 2.399_963;

impl RenderGraph {
    /// Builds fresh simulation state for a dataset; `None` for an empty
    /// graph, which renders as a placeholder with no simulation at all.
    /// Seeding is deterministic per node id so reloading the same dataset
    /// relaxes into the same layout.
    pub(in crate::app) fn from_graph(graph: &RelationGraph) -> Option<Self> {
        if graph.is_empty() {
            return None;
        }

        let nodes = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let radius = SEED_RADIUS_STEP * ((index as f32) + 0.5).sqrt();
                let angle = (index as f32) * GOLDEN_ANGLE;
                let (jitter_x, jitter_y) = stable_pair(&spec.id);
                let world_pos = vec2(
                    radius * angle.cos() + jitter_x,
                    radius * angle.sin() + jitter_y,
                );

                SimNode {
                    id: spec.id.clone(),
                    group: spec.group,
                    base_color: node_color(spec),
                    radius: spec.size.max(1.0),
                    world_pos,
                    velocity: Vec2::ZERO,
                    pinned: None,
                }
            })
            .collect::<Vec<_>>();

        let mut degrees = vec![0usize; nodes.len()];
        let mut edges = Vec::with_capacity(graph.links().len());
        let mut edge_labels = Vec::with_capacity(graph.links().len());
        for link in graph.links() {
            degrees[link.source] += 1;
            degrees[link.target] += 1;
            edges.push((link.source, link.target));
            edge_labels.push(link.relationship.clone());
        }

        Some(Self {
            nodes,
            edges,
            edge_labels,
            degrees,
            alpha: 1.0,
            alpha_target: 0.0,
            physics_scratch: PhysicsScratch::default(),
            view_scratch: ViewScratch::default(),
        })
    }
}
