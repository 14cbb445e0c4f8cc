use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use crate::data::{NodeGroup, NodeSpec};

use super::viewport::Viewport;

pub(super) const LINK_COLOR: Color32 = Color32::from_rgb(0x54, 0x6e, 0x7a);
pub(super) const LINK_LABEL_COLOR: Color32 = Color32::from_rgb(0x90, 0xa4, 0xae);
pub(super) const NODE_STROKE_COLOR: Color32 = Color32::from_rgb(0x26, 0x32, 0x38);
pub(super) const LABEL_COLOR: Color32 = Color32::from_rgb(0xec, 0xef, 0xf1);
pub(super) const ACCENT_COLOR: Color32 = Color32::from_rgb(0xa9, 0x55, 0x65);
pub(super) const SEARCH_COLOR: Color32 = Color32::from_rgb(0x67, 0xc4, 0xff);
pub(super) const SELECTION_COLOR: Color32 = Color32::from_rgb(0xf5, 0xce, 0x5d);

/// Opacity applied to everything outside the hovered neighborhood.
pub(super) const DIM_OPACITY: f32 = 0.2;

pub(super) fn group_color(group: NodeGroup) -> Color32 {
    match group {
        NodeGroup::Person => Color32::from_rgb(0xa9, 0x55, 0x65),
        NodeGroup::Case => Color32::from_rgb(0x4e, 0x86, 0x77),
        NodeGroup::Crime => Color32::from_rgb(0xb1, 0xf7, 0xfc),
        NodeGroup::Family => Color32::from_rgb(0x82, 0x71, 0xb0),
        NodeGroup::Associate => Color32::from_rgb(0x82, 0x71, 0xb0),
        NodeGroup::Company => Color32::from_rgb(0xbb, 0x87, 0x0c),
    }
}

/// Node fill: the dataset's "#rrggbb" override when present and parseable,
/// the group palette otherwise.
pub(super) fn node_color(spec: &NodeSpec) -> Color32 {
    spec.color
        .as_deref()
        .and_then(parse_hex_color)
        .unwrap_or_else(|| group_color(spec.group))
}

pub(super) fn parse_hex_color(raw: &str) -> Option<Color32> {
    let hex = raw.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

pub(super) fn fade(color: Color32, opacity: f32) -> Color32 {
    let opacity = opacity.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * opacity) as u8,
    )
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, viewport: &Viewport) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(0x1a, 0x1a, 0x2e));

    let step = (56.0 * viewport.scale().clamp(0.6, 1.8)).max(20.0);
    let origin = viewport.world_to_screen(rect, eframe::egui::Vec2::ZERO);
    let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 90, 60));

    let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(step);
    while x < rect.right() {
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            grid_stroke,
        );
        x += step;
    }

    let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(step);
    while y < rect.bottom() {
        painter.line_segment(
            [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
            grid_stroke,
        );
        y += step;
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn hex_override_parses_and_falls_back() {
        assert_eq!(
            parse_hex_color("#ff6b6b"),
            Some(Color32::from_rgb(0xff, 0x6b, 0x6b))
        );
        assert_eq!(parse_hex_color("ff6b6b"), None);
        assert_eq!(parse_hex_color("#ff6b"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);

        let spec = NodeSpec::new("x", NodeGroup::Case, 10.0).with_color("#zz0000");
        assert_eq!(node_color(&spec), group_color(NodeGroup::Case));
    }

    #[test]
    fn fade_scales_alpha_only() {
        let faded = fade(Color32::from_rgb(100, 150, 200), 0.2);
        assert_eq!(faded.r(), 100);
        assert_eq!(faded.g(), 150);
        assert_eq!(faded.b(), 200);
        assert_eq!(faded.a(), 51);
    }

    #[test]
    fn circle_visibility_against_surface() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(100.0, 100.0));
        assert!(circle_visible(rect, pos2(50.0, 50.0), 5.0));
        assert!(circle_visible(rect, pos2(-3.0, 50.0), 5.0));
        assert!(!circle_visible(rect, pos2(-20.0, 50.0), 5.0));
    }
}
