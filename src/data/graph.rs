use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};

use super::model::{GraphSpec, NodeSpec};

/// A link whose endpoints resolved during ingestion. Indices point into
/// [`RelationGraph::nodes`]; direction is kept for arrowhead rendering only.
#[derive(Clone, Debug)]
pub struct LinkRecord {
    pub source: usize,
    pub target: usize,
    pub relationship: String,
}

/// Validated in-memory graph. Node order follows the supplied dataset;
/// adjacency is undirected and index-based so hover queries never chase
/// node references.
#[derive(Clone, Debug)]
pub struct RelationGraph {
    nodes: Vec<NodeSpec>,
    links: Vec<LinkRecord>,
    index_by_id: HashMap<String, usize>,
    adjacency: Vec<HashSet<usize>>,
    dropped_links: usize,
}

impl RelationGraph {
    /// Builds the graph, rejecting duplicate node ids and dropping links
    /// with unresolved endpoints (logged, non-fatal).
    pub fn build(spec: GraphSpec) -> Result<Self> {
        let mut index_by_id = HashMap::with_capacity(spec.nodes.len());
        for (index, node) in spec.nodes.iter().enumerate() {
            if index_by_id.insert(node.id.clone(), index).is_some() {
                bail!("duplicate node id {:?} in graph dataset", node.id);
            }
        }

        let mut links = Vec::with_capacity(spec.links.len());
        let mut adjacency = vec![HashSet::new(); spec.nodes.len()];
        let mut dropped_links = 0usize;

        for link in spec.links {
            let (Some(&source), Some(&target)) = (
                index_by_id.get(&link.source),
                index_by_id.get(&link.target),
            ) else {
                log::warn!(
                    "dropping link {:?} -> {:?}: endpoint not present in dataset",
                    link.source,
                    link.target
                );
                dropped_links += 1;
                continue;
            };

            if source != target {
                adjacency[source].insert(target);
                adjacency[target].insert(source);
            }

            links.push(LinkRecord {
                source,
                target,
                relationship: link.relationship,
            });
        }

        if dropped_links > 0 {
            log::info!(
                "graph ingested with {} nodes, {} links ({} dropped)",
                spec.nodes.len(),
                links.len(),
                dropped_links
            );
        }

        Ok(Self {
            nodes: spec.nodes,
            links,
            index_by_id,
            adjacency,
            dropped_links,
        })
    }

    pub fn nodes(&self) -> &[NodeSpec] {
        &self.nodes
    }

    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn dropped_link_count(&self) -> usize {
        self.dropped_links
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn resolve(&self, id: &str) -> Option<&NodeSpec> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    /// Direct neighbors of `index`, regardless of link direction.
    pub fn neighbor_indices(&self, index: usize) -> &HashSet<usize> {
        &self.adjacency[index]
    }

    /// One-hop neighbor ids of `id`; empty for unknown ids.
    pub fn neighbors(&self, id: &str) -> HashSet<&str> {
        self.index_of(id)
            .map(|index| {
                self.adjacency[index]
                    .iter()
                    .map(|&neighbor| self.nodes[neighbor].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LinkSpec, NodeGroup};

    fn node(id: &str) -> NodeSpec {
        NodeSpec::new(id, NodeGroup::Person, 12.0)
    }

    #[test]
    fn build_resolves_all_retained_links() {
        let graph = RelationGraph::build(GraphSpec {
            nodes: vec![node("a"), node("b"), node("c")],
            links: vec![
                LinkSpec::new("a", "b", "knows"),
                LinkSpec::new("b", "c", "employs"),
            ],
        })
        .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.links().len(), 2);
        for link in graph.links() {
            assert!(link.source < graph.node_count());
            assert!(link.target < graph.node_count());
        }
    }

    #[test]
    fn duplicate_node_id_is_a_validation_error() {
        let result = RelationGraph::build(GraphSpec {
            nodes: vec![node("a"), node("a")],
            links: vec![],
        });

        let error = result.unwrap_err().to_string();
        assert!(error.contains("duplicate node id"), "got: {error}");
    }

    #[test]
    fn unresolved_link_is_dropped_not_fatal() {
        let graph = RelationGraph::build(GraphSpec {
            nodes: vec![node("a"), node("b")],
            links: vec![
                LinkSpec::new("a", "b", "knows"),
                LinkSpec::new("a", "ghost", "haunts"),
                LinkSpec::new("ghost", "b", "haunts"),
            ],
        })
        .unwrap();

        assert_eq!(graph.links().len(), 1);
        assert_eq!(graph.dropped_link_count(), 2);
        assert!(graph.neighbors("a").contains("b"));
        assert!(!graph.neighbors("a").contains("ghost"));
    }

    #[test]
    fn adjacency_is_symmetric_for_directed_links() {
        let graph = RelationGraph::build(GraphSpec {
            nodes: vec![node("a"), node("b")],
            links: vec![LinkSpec::new("a", "b", "charged in")],
        })
        .unwrap();

        assert!(graph.neighbors("a").contains("b"));
        assert!(graph.neighbors("b").contains("a"));
        assert_eq!(
            graph.neighbor_indices(0).contains(&1),
            graph.neighbor_indices(1).contains(&0)
        );
    }

    #[test]
    fn empty_dataset_builds_with_empty_adjacency() {
        let graph = RelationGraph::build(GraphSpec::default()).unwrap();
        assert!(graph.is_empty());
        assert!(graph.links().is_empty());
        assert!(graph.neighbors("anything").is_empty());
    }

    #[test]
    fn self_link_is_retained_but_not_adjacent() {
        let graph = RelationGraph::build(GraphSpec {
            nodes: vec![node("a")],
            links: vec![LinkSpec::new("a", "a", "loop")],
        })
        .unwrap();

        assert_eq!(graph.links().len(), 1);
        assert!(graph.neighbor_indices(0).is_empty());
    }
}
