//! # Bitmap Overlay
//!
//! 以位图作为叠加内容。

use std::cell::Cell;

use tiny_skia::{BlendMode, FilterQuality, Pixmap, PixmapPaint};

use super::{Gravity, Overlay, OverlayArea};

/// 位图叠加层
///
/// 尺寸按图标高度的 `scale` 倍计算，保持位图原有宽高比。
#[derive(Debug)]
pub struct ImageOverlay {
    pixmap: Pixmap,
    gravity: Gravity,
    x_adjust: f32,
    y_adjust: f32,
    scale: f32,
    alpha: f32,
    apply_effects: bool,
    active: Cell<bool>,
}

impl ImageOverlay {
    /// 创建位图叠加层（居中、半个图标高、不透明）
    pub fn new(pixmap: Pixmap) -> Self {
        Self {
            pixmap,
            gravity: Gravity::Center,
            x_adjust: 0.0,
            y_adjust: 0.0,
            scale: 0.5,
            alpha: 1.0,
            apply_effects: false,
            active: Cell::new(true),
        }
    }

    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    /// 偏移量，以图标宽高为单位
    pub fn with_adjust(mut self, x: f32, y: f32) -> Self {
        self.x_adjust = x;
        self.y_adjust = y;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale.max(0.0);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// 是否随图标效果一起变换
    pub fn with_effects(mut self, apply: bool) -> Self {
        self.apply_effects = apply;
        self
    }

    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    /// 在图标坐标中的尺寸
    fn size(&self, icon_height: f32) -> (f32, f32) {
        let h = icon_height * self.scale;
        let w = h * self.pixmap.width() as f32 / self.pixmap.height() as f32;
        (w, h)
    }
}

impl Overlay for ImageOverlay {
    fn render(&self, surface: &mut Pixmap, area: &OverlayArea<'_>) {
        let (w, h) = self.size(area.icon_height);
        if w <= 0.0 || h <= 0.0 {
            return;
        }

        let (x, y) = self.gravity.position(
            (area.icon_width, area.icon_height),
            (w, h),
            (self.x_adjust, self.y_adjust),
        );
        let transform = area.transform.pre_translate(x, y).pre_scale(
            w / self.pixmap.width() as f32,
            h / self.pixmap.height() as f32,
        );
        let paint = PixmapPaint {
            opacity: self.alpha,
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Bilinear,
        };
        surface.draw_pixmap(0, 0, self.pixmap.as_ref(), &paint, transform, area.mask);
    }

    fn apply_effects(&self) -> bool {
        self.apply_effects
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::{Color, Transform};

    fn red_square(size: u32) -> Pixmap {
        let mut pixmap = Pixmap::new(size, size).unwrap();
        pixmap.fill(Color::from_rgba8(255, 0, 0, 255));
        pixmap
    }

    #[test]
    fn test_badge_in_corner() {
        let overlay = ImageOverlay::new(red_square(4))
            .with_gravity(Gravity::SouthEast)
            .with_scale(0.25);
        let mut surface = Pixmap::new(32, 32).unwrap();
        let area = OverlayArea {
            icon_width: 32.0,
            icon_height: 32.0,
            transform: Transform::identity(),
            mask: None,
        };
        overlay.render(&mut surface, &area);

        assert_eq!(surface.pixel(28, 28).unwrap().red(), 255);
        assert_eq!(surface.pixel(20, 28).unwrap().alpha(), 0);
        assert_eq!(surface.pixel(4, 4).unwrap().alpha(), 0);
    }

    #[test]
    fn test_builder_flags() {
        let overlay = ImageOverlay::new(red_square(2)).with_effects(true);
        assert!(overlay.apply_effects());
        assert!(overlay.is_active());
        overlay.set_active(false);
        assert!(!overlay.is_active());
    }
}
