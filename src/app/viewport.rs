use eframe::egui::{Pos2, Rect, Vec2};

pub(super) const MIN_SCALE: f32 = 0.1;
pub(super) const MAX_SCALE: f32 = 4.0;

/// World extent assumed when the graph is empty or the surface has not been
/// laid out yet, so pan clamping always has a non-zero content area to work
/// with.
pub(super) const FALLBACK_EXTENT: f32 = 300.0;

/// Pan/zoom state, composed into one affine transform applied per paint.
/// Node world coordinates are never mutated by viewing, which keeps
/// hit-testing and force math in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Viewport {
    scale: f32,
    translate: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate: Vec2::ZERO,
        }
    }
}

impl Viewport {
    pub(super) fn scale(&self) -> f32 {
        self.scale
    }

    pub(super) fn world_to_screen(&self, rect: Rect, world: Vec2) -> Pos2 {
        rect.center() + self.translate + world * self.scale
    }

    pub(super) fn screen_to_world(&self, rect: Rect, screen: Pos2) -> Vec2 {
        // scale is clamped to MIN_SCALE everywhere it changes, so this
        // division is always defined.
        (screen - rect.center() - self.translate) / self.scale
    }

    /// Multiplies scale, clamped to [MIN_SCALE, MAX_SCALE], keeping the
    /// world point under `pivot` visually fixed.
    pub(super) fn zoom_by(&mut self, factor: f32, pivot: Pos2, rect: Rect) {
        let world_before = self.screen_to_world(rect, pivot);
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.translate = pivot - rect.center() - world_before * self.scale;
    }

    pub(super) fn pan_by(&mut self, delta: Vec2) {
        self.translate += delta;
    }

    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Re-clamps translation so content within `extent` world units of the
    /// origin cannot sit entirely outside `rect`. Scale is untouched; used
    /// after window resizes.
    pub(super) fn clamp_to_surface(&mut self, rect: Rect, extent: f32) {
        let extent = if extent > 0.0 { extent } else { FALLBACK_EXTENT };
        let limit_x = (rect.width() * 0.5) + (extent * self.scale);
        let limit_y = (rect.height() * 0.5) + (extent * self.scale);
        self.translate.x = self.translate.x.clamp(-limit_x, limit_x);
        self.translate.y = self.translate.y.clamp(-limit_y, limit_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn surface() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0))
    }

    #[test]
    fn scale_stays_clamped_for_any_zoom_sequence() {
        let rect = surface();
        let mut viewport = Viewport::default();

        viewport.zoom_by(100.0, rect.center(), rect);
        assert_eq!(viewport.scale(), MAX_SCALE);

        for _ in 0..20 {
            viewport.zoom_by(0.01, rect.center(), rect);
        }
        assert_eq!(viewport.scale(), MIN_SCALE);

        viewport.zoom_by(1.7, rect.center(), rect);
        assert!(viewport.scale() >= MIN_SCALE && viewport.scale() <= MAX_SCALE);
    }

    #[test]
    fn zoom_keeps_pivot_point_fixed() {
        let rect = surface();
        let mut viewport = Viewport::default();
        viewport.pan_by(vec2(33.0, -17.0));

        let pivot = pos2(120.0, 450.0);
        let world_before = viewport.screen_to_world(rect, pivot);

        viewport.zoom_by(1.6, pivot, rect);
        let screen_after = viewport.world_to_screen(rect, world_before);

        assert!((screen_after - pivot).length() < 0.001);
    }

    #[test]
    fn pan_is_unclamped_and_additive() {
        let mut viewport = Viewport::default();
        viewport.pan_by(vec2(10_000.0, 0.0));
        viewport.pan_by(vec2(5.0, -3.0));

        let rect = surface();
        let origin = viewport.world_to_screen(rect, Vec2::ZERO);
        assert_eq!(origin, rect.center() + vec2(10_005.0, -3.0));
    }

    #[test]
    fn screen_world_round_trip() {
        let rect = surface();
        let mut viewport = Viewport::default();
        viewport.zoom_by(2.5, pos2(200.0, 100.0), rect);
        viewport.pan_by(vec2(-40.0, 12.0));

        let screen = pos2(317.0, 205.0);
        let world = viewport.screen_to_world(rect, screen);
        assert!((viewport.world_to_screen(rect, world) - screen).length() < 0.001);
    }

    #[test]
    fn resize_reclamp_brings_content_back_without_touching_scale() {
        let rect = surface();
        let mut viewport = Viewport::default();
        viewport.zoom_by(2.0, rect.center(), rect);
        viewport.pan_by(vec2(100_000.0, -100_000.0));

        let scale_before = viewport.scale();
        viewport.clamp_to_surface(rect, 250.0);

        assert_eq!(viewport.scale(), scale_before);
        let origin = viewport.world_to_screen(rect, Vec2::ZERO);
        // Content circle (extent 250 at 2x) must intersect the surface.
        assert!(origin.x - 500.0 <= rect.right());
        assert!(origin.x + 500.0 >= rect.left());
        assert!(origin.y - 500.0 <= rect.bottom());
        assert!(origin.y + 500.0 >= rect.top());
    }

    #[test]
    fn reclamp_with_zero_extent_uses_fallback() {
        let rect = surface();
        let mut viewport = Viewport::default();
        viewport.pan_by(vec2(9_999.0, 0.0));
        viewport.clamp_to_surface(rect, 0.0);

        assert!(viewport.translate.x <= (rect.width() * 0.5) + FALLBACK_EXTENT);
    }
}
