//! # Progress Overlay
//!
//! 圆形进度徽章：圆底、从 12 点方向顺时针的扇形、细描边。

use std::cell::Cell;

use tiny_skia::{BlendMode, FillRule, Paint, PathBuilder, Pixmap, Stroke};

use super::{Gravity, Overlay, OverlayArea};
use crate::render::{color_from_rgba, pie_path};

/// 进度叠加层
#[derive(Debug)]
pub struct ProgressOverlay {
    progress: Cell<f32>,
    gravity: Gravity,
    scale: f32,
    background: [u8; 4],
    foreground: [u8; 4],
    outline: [u8; 4],
    active: Cell<bool>,
}

impl Default for ProgressOverlay {
    fn default() -> Self {
        Self {
            progress: Cell::new(0.0),
            gravity: Gravity::Center,
            scale: 0.6,
            background: [0, 0, 0, 160],
            foreground: [255, 255, 255, 220],
            outline: [255, 255, 255, 255],
            active: Cell::new(true),
        }
    }
}

impl ProgressOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// 直径相对图标的比例 (0.0 - 1.0)
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale.clamp(0.0, 1.0);
        self
    }

    pub fn with_colors(mut self, background: [u8; 4], foreground: [u8; 4], outline: [u8; 4]) -> Self {
        self.background = background;
        self.foreground = foreground;
        self.outline = outline;
        self
    }

    /// 设置进度，超出 [0, 1] 的值被截断
    pub fn set_progress(&self, progress: f32) {
        self.progress.set(progress.clamp(0.0, 1.0));
    }

    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }
}

impl Overlay for ProgressOverlay {
    fn render(&self, surface: &mut Pixmap, area: &OverlayArea<'_>) {
        let diameter = area.icon_width.min(area.icon_height) * self.scale;
        if diameter <= 0.0 {
            return;
        }

        let (x, y) = self.gravity.position(
            (area.icon_width, area.icon_height),
            (diameter, diameter),
            (0.0, 0.0),
        );
        let radius = diameter / 2.0;
        let (cx, cy) = (x + radius, y + radius);

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.blend_mode = BlendMode::SourceOver;

        let Some(circle) = PathBuilder::from_circle(cx, cy, radius) else {
            return;
        };
        paint.set_color(color_from_rgba(self.background));
        surface.fill_path(&circle, &paint, FillRule::Winding, area.transform, area.mask);

        if let Some(pie) = pie_path(cx, cy, radius, self.progress.get()) {
            paint.set_color(color_from_rgba(self.foreground));
            surface.fill_path(&pie, &paint, FillRule::Winding, area.transform, area.mask);
        }

        let stroke = Stroke {
            width: (diameter / 24.0).max(1.0),
            ..Default::default()
        };
        paint.set_color(color_from_rgba(self.outline));
        surface.stroke_path(&circle, &paint, &stroke, area.transform, area.mask);
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Transform;

    fn area() -> OverlayArea<'static> {
        OverlayArea {
            icon_width: 40.0,
            icon_height: 40.0,
            transform: Transform::identity(),
            mask: None,
        }
    }

    #[test]
    fn test_progress_clamped() {
        let overlay = ProgressOverlay::new();
        overlay.set_progress(1.7);
        assert_eq!(overlay.progress(), 1.0);
        overlay.set_progress(-0.2);
        assert_eq!(overlay.progress(), 0.0);
    }

    #[test]
    fn test_half_progress_fills_right_side() {
        let overlay = ProgressOverlay::new().with_scale(1.0);
        overlay.set_progress(0.5);

        let mut surface = Pixmap::new(40, 40).unwrap();
        overlay.render(&mut surface, &area());

        let right = surface.pixel(28, 20).unwrap();
        let left = surface.pixel(11, 20).unwrap();
        assert!(right.red() > left.red());
        assert!(left.alpha() > 0);
        assert!(!overlay.apply_effects());
    }
}
