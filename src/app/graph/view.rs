use eframe::egui::{
    self, vec2, Align2, Color32, FontId, Painter, Pos2, Rect, Sense, Shape, Stroke, Ui,
};

use crate::util::ellipsize;

use super::super::physics::step_simulation;
use super::super::render_utils::{
    blend_color, circle_visible, draw_background, fade, ACCENT_COLOR, DIM_OPACITY, LABEL_COLOR,
    LINK_COLOR, LINK_LABEL_COLOR, NODE_STROKE_COLOR, SEARCH_COLOR, SELECTION_COLOR,
};
use super::super::{highlight, RenderGraph, SimNode, ViewModel};

impl ViewModel {
    /// One frame of the graph surface: physics tick, pointer handling, then
    /// a full repaint from live positions, the viewport transform and the
    /// highlight state. Repaints are requested only while the simulation is
    /// hot or an interaction is in flight.
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, &self.viewport);

        let surface = rect.size();
        if self.last_surface != Some(surface) {
            let extent = self
                .cache
                .as_ref()
                .map(RenderGraph::content_extent)
                .unwrap_or(0.0);
            self.viewport.clamp_to_surface(rect, extent);
            self.last_surface = Some(surface);
        }

        self.handle_zoom(ui, rect, &response);

        let moving = match self.cache.as_mut() {
            Some(cache) => step_simulation(cache, &self.layout),
            None => false,
        };

        let interacting = self.handle_pointer(ui, rect, &response);

        let Some(cache) = self.cache.as_mut() else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No relationships to display.",
                FontId::proportional(15.0),
                Color32::from_gray(140),
            );
            return;
        };

        let scale = self.viewport.scale();
        cache.view_scratch.screen_positions.clear();
        cache.view_scratch.screen_radii.clear();
        for node in &cache.nodes {
            cache
                .view_scratch
                .screen_positions
                .push(self.viewport.world_to_screen(rect, node.world_pos));
            cache.view_scratch.screen_radii.push(node.radius * scale);
        }

        let hovered = self.hovered;
        let hover_active = hovered.is_some();
        let search_dimming = !hover_active && !self.search_matches.is_empty();

        if hover_active {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let stroke_width = (1.5 * scale).clamp(0.4, 5.0);
        let link_font = FontId::proportional((10.0 * scale).clamp(5.0, 20.0));
        for (edge_index, &(source, target)) in cache.edges.iter().enumerate() {
            let start = cache.view_scratch.screen_positions[source];
            let end = cache.view_scratch.screen_positions[target];
            if start.x.max(end.x) < rect.left()
                || start.x.min(end.x) > rect.right()
                || start.y.max(end.y) < rect.top()
                || start.y.min(end.y) > rect.bottom()
            {
                continue;
            }

            let active = hovered.is_some_and(|index| highlight::link_active((source, target), index));
            let (color, width) = if active {
                (fade(ACCENT_COLOR, 0.9), stroke_width * 1.4)
            } else if hover_active {
                (fade(LINK_COLOR, 0.1), stroke_width)
            } else {
                (fade(LINK_COLOR, 0.6), stroke_width)
            };

            painter.line_segment([start, end], Stroke::new(width, color));
            draw_arrowhead(
                &painter,
                start,
                end,
                cache.view_scratch.screen_radii[target],
                color,
                scale,
            );

            if scale >= 0.45 {
                let label_opacity = if active {
                    1.0
                } else if hover_active {
                    DIM_OPACITY
                } else {
                    1.0
                };
                painter.text(
                    start + (end - start) * 0.5,
                    Align2::CENTER_CENTER,
                    &cache.edge_labels[edge_index],
                    link_font.clone(),
                    fade(LINK_LABEL_COLOR, label_opacity),
                );
            }
        }

        let node_font = FontId::proportional((11.0 * scale).clamp(6.0, 22.0));
        let mut selection_animating = false;
        for (index, node) in cache.nodes.iter().enumerate() {
            let position = cache.view_scratch.screen_positions[index];
            let radius = cache.view_scratch.screen_radii[index];
            if !circle_visible(rect, position, radius + 4.0) {
                continue;
            }

            let is_hovered = hovered == Some(index);
            let is_connected = self.connected.contains(&index);
            let is_match = self.search_matches.contains(&index);

            let mut fill = node.base_color;
            let mut opacity = 1.0;
            if hover_active && !(is_hovered || is_connected) {
                opacity = DIM_OPACITY;
            } else if search_dimming && !is_match {
                opacity = 0.45;
            }
            if is_match && !hover_active {
                fill = blend_color(fill, SEARCH_COLOR, 0.55);
            }

            let is_selected = self.selected.as_deref() == Some(node.id.as_str());
            let selection_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("node-selection", node.id.as_str())),
                is_selected,
            );
            if selection_mix > 0.0 && selection_mix < 1.0 {
                selection_animating = true;
            }
            let fill = blend_color(fill, SELECTION_COLOR, selection_mix * 0.35);

            painter.circle_filled(position, radius, fade(fill, opacity));
            painter.circle_stroke(
                position,
                radius,
                Stroke::new((2.0 * scale).clamp(0.6, 3.5), fade(NODE_STROKE_COLOR, opacity)),
            );

            if is_hovered {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.5, fade(ACCENT_COLOR, 0.85)),
                );
            }

            if selection_mix > 0.0 {
                let halo_strength = (selection_mix * (1.0 - selection_mix) * 4.0).clamp(0.0, 1.0);
                let halo_alpha = (30.0 + (halo_strength * 145.0)) as u8;
                painter.circle_stroke(
                    position,
                    radius + 4.0 + ((1.0 - selection_mix) * 6.0),
                    Stroke::new(
                        1.0 + (halo_strength * 1.6),
                        Color32::from_rgba_unmultiplied(245, 206, 93, halo_alpha),
                    ),
                );
            }

            if scale >= 0.4 {
                painter.text(
                    position,
                    Align2::CENTER_CENTER,
                    ellipsize(&node.id, 24),
                    node_font.clone(),
                    fade(LABEL_COLOR, opacity),
                );
            }
        }

        if let Some(index) = hovered
            && let Some(pointer) = ui.input(|input| input.pointer.hover_pos())
        {
            draw_tooltip(&painter, rect, pointer, &cache.nodes[index]);
        }

        if moving || interacting || selection_animating {
            ui.ctx().request_repaint();
        }
    }
}

fn draw_arrowhead(
    painter: &Painter,
    start: Pos2,
    end: Pos2,
    target_radius: f32,
    color: Color32,
    scale: f32,
) {
    let delta = end - start;
    let length = delta.length();
    if length <= target_radius + 2.0 {
        return;
    }

    let direction = delta / length;
    let tip = end - direction * (target_radius + 2.0);
    let size = (6.0 * scale).clamp(3.0, 10.0);
    let normal = vec2(-direction.y, direction.x);
    let left = tip - direction * size + normal * (size * 0.5);
    let right = tip - direction * size - normal * (size * 0.5);

    painter.add(Shape::convex_polygon(vec![tip, left, right], color, Stroke::NONE));
}

/// Tooltip near the pointer: node id, group label, group description.
/// Painter-drawn, so it can never intercept pointer events.
fn draw_tooltip(painter: &Painter, rect: Rect, pointer: Pos2, node: &SimNode) {
    let title = painter.layout_no_wrap(node.id.clone(), FontId::proportional(13.0), LABEL_COLOR);
    let group = painter.layout_no_wrap(
        format!("Type: {}", node.group.label()),
        FontId::proportional(11.5),
        Color32::from_gray(205),
    );
    let detail = painter.layout_no_wrap(
        node.group.description().to_owned(),
        FontId::proportional(11.5),
        Color32::from_gray(170),
    );

    let padding = vec2(10.0, 8.0);
    let line_gap = 3.0;
    let width = title.size().x.max(group.size().x).max(detail.size().x);
    let height = title.size().y + group.size().y + detail.size().y + (line_gap * 2.0);
    let size = vec2(width, height) + padding * 2.0;

    let mut origin = pointer + vec2(16.0, -12.0 - size.y);
    origin.x = origin.x.clamp(rect.left(), (rect.right() - size.x).max(rect.left()));
    origin.y = origin.y.clamp(rect.top(), (rect.bottom() - size.y).max(rect.top()));

    let body = Rect::from_min_size(origin, size);
    painter.rect_filled(body.expand(1.0), 7.0, Color32::from_gray(70));
    painter.rect_filled(body, 6.0, Color32::from_rgba_unmultiplied(22, 33, 62, 240));

    let mut cursor = origin + padding;
    let title_height = title.size().y;
    let group_height = group.size().y;
    painter.galley(cursor, title, LABEL_COLOR);
    cursor.y += title_height + line_gap;
    painter.galley(cursor, group, LABEL_COLOR);
    cursor.y += group_height + line_gap;
    painter.galley(cursor, detail, LABEL_COLOR);
}
