use std::collections::HashSet;

use crate::data::RelationGraph;

/// One-hop neighborhood of the hovered node, link direction ignored. This
/// feeds the dim/emphasize pass in the renderer; depth is deliberately a
/// single hop.
pub(super) fn connected_set(graph: &RelationGraph, hovered: usize) -> HashSet<usize> {
    graph.neighbor_indices(hovered).iter().copied().collect()
}

/// Whether a link takes the accent treatment while `hovered` is active.
pub(super) fn link_active(edge: (usize, usize), hovered: usize) -> bool {
    edge.0 == hovered || edge.1 == hovered
}
