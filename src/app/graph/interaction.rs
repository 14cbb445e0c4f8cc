use std::collections::HashSet;

use eframe::egui::{self, vec2, Rect, Response, Ui, Vec2};

use super::super::viewport::Viewport;
use super::super::{highlight, PointerState, RenderGraph, ViewModel};

/// Extra world-space slop around a node when hit-testing the pointer.
const HIT_MARGIN: f32 = 2.0;

/// Nearest node whose disc (plus margin) contains the world-space pointer.
pub(super) fn node_at(cache: &RenderGraph, world: Vec2) -> Option<usize> {
    cache
        .nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let distance = (node.world_pos - world).length();
            (distance <= node.radius + HIT_MARGIN).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _distance)| index)
}

/// Keeps a dragged pin inside the drawing surface, in world coordinates.
/// Bounds follow the live viewport, so a mid-drag resize just tightens the
/// clamp on the next move.
pub(super) fn clamp_to_surface(world: Vec2, rect: Rect, viewport: &Viewport) -> Vec2 {
    let min = viewport.screen_to_world(rect, rect.left_top());
    let max = viewport.screen_to_world(rect, rect.right_bottom());
    vec2(world.x.clamp(min.x, max.x), world.y.clamp(min.y, max.y))
}

impl ViewModel {
    /// Wheel zoom about the pointer, eased per scroll step.
    pub(super) fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pivot = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.viewport.zoom_by(factor, pivot, rect);
    }

    /// Runs the pointer state machine for one frame: drag-pin, pan, hover
    /// highlight and click-select. Returns true while an interaction should
    /// keep the frame loop awake.
    pub(super) fn handle_pointer(&mut self, ui: &Ui, rect: Rect, response: &Response) -> bool {
        let Some(cache) = self.cache.as_mut() else {
            return false;
        };

        if response.drag_started_by(egui::PointerButton::Primary) {
            match response
                .interact_pointer_pos()
                .map(|pointer| self.viewport.screen_to_world(rect, pointer))
                .and_then(|world| node_at(cache, world).map(|index| (index, world)))
            {
                Some((index, world)) => {
                    let node = &mut cache.nodes[index];
                    let grab = node.world_pos - world;
                    node.pinned = Some(node.world_pos);
                    cache.reheat();
                    self.pointer = PointerState::Dragging { index, grab };
                }
                None => self.pointer = PointerState::Panning,
            }
        }

        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.viewport.pan_by(response.drag_delta());
        }

        match self.pointer {
            PointerState::Dragging { index, grab } => {
                if let Some(pointer) = response.interact_pointer_pos() {
                    let world = self.viewport.screen_to_world(rect, pointer) + grab;
                    let pin = clamp_to_surface(world, rect, &self.viewport);
                    let node = &mut cache.nodes[index];
                    node.pinned = Some(pin);
                    node.world_pos = pin;
                    node.velocity = Vec2::ZERO;
                }

                if response.drag_stopped() {
                    cache.nodes[index].pinned = None;
                    cache.cool();
                    self.pointer = PointerState::Idle;
                }
            }
            PointerState::Panning => {
                if response.dragged_by(egui::PointerButton::Primary) {
                    self.viewport.pan_by(response.drag_delta());
                }
                if response.drag_stopped() {
                    self.pointer = PointerState::Idle;
                }
            }
            PointerState::Idle => {}
        }

        self.hovered = if self.pointer == PointerState::Idle {
            ui.input(|input| input.pointer.hover_pos())
                .filter(|pointer| rect.contains(*pointer))
                .and_then(|pointer| node_at(cache, self.viewport.screen_to_world(rect, pointer)))
        } else {
            None
        };
        self.connected = match self.hovered {
            Some(index) => highlight::connected_set(&self.graph, index),
            None => HashSet::new(),
        };

        if response.clicked_by(egui::PointerButton::Primary) {
            match self.hovered.map(|index| cache.nodes[index].id.as_str()) {
                Some(id) if self.selected.as_deref() == Some(id) => self.selected = None,
                Some(id) => self.selected = Some(id.to_owned()),
                None => self.selected = None,
            }
        }

        response.dragged() || self.pointer != PointerState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GraphSpec, LinkSpec, NodeGroup, NodeSpec, RelationGraph};
    use eframe::egui::pos2;

    fn two_node_cache() -> RenderGraph {
        let graph = RelationGraph::build(GraphSpec {
            nodes: vec![
                NodeSpec::new("a", NodeGroup::Person, 20.0),
                NodeSpec::new("b", NodeGroup::Case, 15.0),
            ],
            links: vec![LinkSpec::new("a", "b", "charged in")],
        })
        .unwrap();
        RenderGraph::from_graph(&graph).unwrap()
    }

    #[test]
    fn hit_test_picks_the_closest_containing_node() {
        let mut cache = two_node_cache();
        cache.nodes[0].world_pos = vec2(0.0, 0.0);
        cache.nodes[1].world_pos = vec2(25.0, 0.0);

        // inside both discs, but closer to node 1
        assert_eq!(node_at(&cache, vec2(18.0, 0.0)), Some(1));
        assert_eq!(node_at(&cache, vec2(4.0, 0.0)), Some(0));
        assert_eq!(node_at(&cache, vec2(500.0, 500.0)), None);
    }

    #[test]
    fn surface_clamp_respects_pan_and_zoom() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 600.0));
        let mut viewport = Viewport::default();
        viewport.zoom_by(2.0, rect.center(), rect);

        let min = viewport.screen_to_world(rect, rect.left_top());
        let max = viewport.screen_to_world(rect, rect.right_bottom());

        let inside = vec2(0.0, 0.0);
        assert_eq!(clamp_to_surface(inside, rect, &viewport), inside);

        let outside = vec2(10_000.0, -10_000.0);
        let clamped = clamp_to_surface(outside, rect, &viewport);
        assert_eq!(clamped, vec2(max.x, min.y));
    }
}
