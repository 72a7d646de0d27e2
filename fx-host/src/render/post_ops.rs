//! # Post-ops 模块
//!
//! 图标绘制完成后作用在整个表面上的步骤。
//!
//! 顺序固定，每一步都有自己的开关条件，并报告是否修改了表面。

use fx_runtime::{AnimationState, DockEdge, IconGeometry};
use tiny_skia::{
    BlendMode, Color, FillRule, FilterQuality, GradientStop, Paint, PathBuilder, Pixmap,
    PixmapPaint, Point, RadialGradient, Rect, SpreadMode, Transform,
};
use tracing::trace;

use super::filters::{self, SHADOW_BLUR_RADIUS};
use super::pre_ops::base_rect;
use super::{Decorations, color_from_rgba, pie_path, rounded_rect_path};
use crate::config::{ArrowStyle, EffectsConfig};
use crate::resources::DecorationImages;

/// 阴影相对图标的放大倍数
const SHADOW_SCALE: f32 = 1.0625;
/// 阴影不透明度
const SHADOW_ALPHA: f32 = 0.5;
/// 最多绘制的指示箭头数
const MAX_ARROWS: u32 = 3;

/// 后处理步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOp {
    Clip,
    Depth,
    Shadow,
    Saturate,
    Glow,
    Alpha,
    Reflection,
    Active,
    Spotlight,
    Arrows,
    Progress,
}

/// 后处理所需的输入
#[derive(Debug, Clone, Copy)]
pub struct PostOpContext<'a> {
    pub geometry: IconGeometry,
    pub state: &'a AnimationState,
    pub config: &'a EffectsConfig,
    pub images: &'a DecorationImages,
    pub decorations: &'a Decorations,
}

impl PostOpContext<'_> {
    fn width(&self) -> f32 {
        self.geometry.window_width as f32
    }

    fn height(&self) -> f32 {
        self.geometry.window_height as f32
    }

    fn icon_offset(&self) -> f32 {
        self.config.icon_offset as f32
    }

    /// 图标整体不透明度（动画 × 配置）
    fn combined_alpha(&self) -> f32 {
        self.state.alpha * self.config.icon_alpha
    }
}

/// 依次执行全部后处理步骤
///
/// # 返回
///
/// 实际修改了表面的步骤列表，按执行顺序排列。
pub fn apply_all(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> Vec<PostOp> {
    let steps: [(PostOp, fn(&mut Pixmap, &PostOpContext<'_>) -> bool); 11] = [
        (PostOp::Clip, border_clip),
        (PostOp::Depth, depth),
        (PostOp::Shadow, shadow),
        (PostOp::Saturate, saturate),
        (PostOp::Glow, glow),
        (PostOp::Alpha, alpha),
        (PostOp::Reflection, reflection),
        (PostOp::Active, active),
        (PostOp::Spotlight, spotlight),
        (PostOp::Arrows, arrows),
        (PostOp::Progress, progress),
    ];

    let applied: Vec<PostOp> = steps
        .iter()
        .filter_map(|(op, step)| step(surface, cx).then_some(*op))
        .collect();

    trace!(?applied, "后处理完成");
    applied
}

fn pixmap_paint(opacity: f32, blend_mode: BlendMode) -> PixmapPaint {
    PixmapPaint {
        opacity: opacity.clamp(0.0, 1.0),
        blend_mode,
        quality: FilterQuality::Bilinear,
    }
}

fn solid_paint(color: Color, blend_mode: BlendMode) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.blend_mode = blend_mode;
    paint.anti_alias = true;
    paint
}

// ========== clip ==========

/// 清除 dock 边缘一侧 `border_clip` 像素宽的条带
pub fn border_clip(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    let bc = cx.config.border_clip as f32;
    if bc <= 0.0 {
        return false;
    }

    let (w, h) = (cx.width(), cx.height());
    let strip = match cx.geometry.edge {
        DockEdge::Top => Rect::from_xywh(0.0, 0.0, w, bc),
        DockEdge::Left => Rect::from_xywh(0.0, 0.0, bc, h),
        DockEdge::Bottom => Rect::from_xywh(0.0, h - bc, w, bc),
        DockEdge::Right => Rect::from_xywh(w - bc, 0.0, bc, h),
    };
    let Some(strip) = strip else { return false };

    let paint = solid_paint(Color::BLACK, BlendMode::Clear);
    surface.fill_rect(strip, &paint, Transform::identity(), None);
    true
}

// ========== depth ==========

/// 伪 3D 厚度：沿 dock 方向叠加若干份错位副本
pub fn depth(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    let depth = cx.state.icon_depth;
    if !cx.config.icon_depth_on || depth <= 1 {
        return false;
    }

    let reversed = cx.state.depth_reversed;
    let base = depth as f32 / if reversed { -2.0 } else { 2.0 };
    let mult = if reversed { 1.0 } else { -1.0 };

    let copy = surface.clone();
    let paint = pixmap_paint(1.0, BlendMode::SourceOver);
    for i in 1..depth {
        let offset = base + mult * (depth - i) as f32;
        let transform = if cx.geometry.edge.is_horizontal() {
            Transform::from_translate(offset, 0.0)
        } else {
            Transform::from_translate(0.0, offset)
        };
        surface.draw_pixmap(0, 0, copy.as_ref(), &paint, transform, None);
    }
    true
}

// ========== shadow ==========

/// 阴影：变暗、模糊、稍微放大后画在图标下方
pub fn shadow(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    if !cx.config.show_shadows {
        return false;
    }

    let mut blurred = surface.clone();
    filters::darken(&mut blurred);
    filters::blur_alpha(&mut blurred, SHADOW_BLUR_RADIUS);

    let (w, h) = (cx.width(), cx.height());
    let transform = Transform::from_scale(SHADOW_SCALE, SHADOW_SCALE).pre_translate(
        (w - w * SHADOW_SCALE) / 2.0,
        (h - h * SHADOW_SCALE) / 2.0,
    );
    let paint = pixmap_paint(SHADOW_ALPHA, BlendMode::DestinationOver);
    surface.draw_pixmap(0, 0, blurred.as_ref(), &paint, transform, None);
    true
}

// ========== saturate / glow ==========

pub fn saturate(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    if cx.state.saturation >= 1.0 {
        return false;
    }
    filters::saturate(surface, cx.state.saturation);
    true
}

pub fn glow(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    if cx.state.glow_amount <= 0.0 {
        return false;
    }
    filters::lighten(surface, cx.state.glow_amount);
    true
}

// ========== alpha ==========

/// 整体不透明度：用 DEST_OUT 擦除 `1 - alpha`
pub fn alpha(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    let a = cx.combined_alpha().clamp(0.0, 1.0);
    if a >= 1.0 {
        return false;
    }

    let Some(color) = Color::from_rgba(0.0, 0.0, 0.0, 1.0 - a) else {
        return false;
    };
    let Some(rect) = Rect::from_xywh(0.0, 0.0, cx.width(), cx.height()) else {
        return false;
    };

    let paint = solid_paint(color, BlendMode::DestinationOut);
    surface.fill_rect(rect, &paint, Transform::identity(), None);
    true
}

// ========== reflection ==========

/// 倒影：镜像后画在图标靠 dock 边缘的一侧
pub fn reflection(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    if !cx.config.show_reflection {
        return false;
    }

    let (w, h) = (cx.width(), cx.height());
    let shift = cx.icon_offset() * 2.0 + cx.config.reflection_offset as f32;
    let dx = w - shift;
    let dy = h - shift;

    let vertical_mirror = Transform::from_row(1.0, 0.0, 0.0, -1.0, 0.0, h);
    let horizontal_mirror = Transform::from_row(-1.0, 0.0, 0.0, 1.0, w, 0.0);
    let transform = match cx.geometry.edge {
        DockEdge::Top => Transform::from_translate(0.0, -dy).pre_concat(vertical_mirror),
        DockEdge::Bottom => Transform::from_translate(0.0, dy).pre_concat(vertical_mirror),
        DockEdge::Left => Transform::from_translate(-dx, 0.0).pre_concat(horizontal_mirror),
        DockEdge::Right => Transform::from_translate(dx, 0.0).pre_concat(horizontal_mirror),
    };

    let copy = surface.clone();
    let paint = pixmap_paint(
        cx.state.alpha * cx.config.reflection_alpha,
        BlendMode::DestinationOver,
    );
    surface.draw_pixmap(0, 0, copy.as_ref(), &paint, transform, None);
    true
}

// ========== active ==========

/// 活动指示器：图标基准位置背后的圆角矩形或自定义图片
pub fn active(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    if !cx.decorations.is_active {
        return false;
    }

    let (x, y, w, h) = base_rect(&cx.geometry, cx.config.icon_offset);

    if let Some(image) = &cx.images.active {
        let transform = Transform::from_translate(x, y)
            .pre_scale(w / image.width() as f32, h / image.height() as f32);
        let paint = pixmap_paint(1.0, BlendMode::DestinationOver);
        surface.draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
        return true;
    }

    let Some(path) = rounded_rect_path(x, y, w, h, cx.config.active.corner_radius) else {
        return false;
    };
    let paint = solid_paint(
        color_from_rgba(cx.config.active.color),
        BlendMode::DestinationOver,
    );
    surface.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    true
}

// ========== spotlight ==========

/// 聚光灯：先画在图标下方，再以一半强度叠加在上方
pub fn spotlight(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    let sa = cx.state.spotlight_alpha;
    if !cx.state.spotlight || sa <= 0.0 {
        return false;
    }

    match &cx.images.spotlight {
        Some(image) => spotlight_image(surface, cx, image, sa),
        None => spotlight_gradient(surface, cx, sa),
    }
    true
}

fn spotlight_image(surface: &mut Pixmap, cx: &PostOpContext<'_>, image: &Pixmap, sa: f32) {
    let (w, h) = (cx.width(), cx.height());
    let ih = cx.geometry.icon_height as f32;
    let off = cx.icon_offset();
    let img_w = image.width() as f32;
    let img_h = image.height() as f32;

    let (x, y, degrees) = match cx.geometry.edge {
        DockEdge::Bottom => (0.0, h - ih + ih / 12.0 - off, 0.0),
        DockEdge::Top => (w, ih - ih / 12.0 + off, 180.0),
        DockEdge::Right => (w - ih + ih / 12.0 - off, h, -90.0),
        DockEdge::Left => (ih - ih / 12.0 + off, 0.0, 90.0),
    };
    let (sx, sy) = if cx.geometry.edge.is_horizontal() {
        (w / img_w, ih * 5.0 / 4.0 / img_h)
    } else {
        (ih * 5.0 / 4.0 / img_h, h / img_w)
    };

    let transform = Transform::from_translate(x, y)
        .pre_scale(sx, sy)
        .pre_rotate(degrees);

    let under = pixmap_paint(sa, BlendMode::DestinationOver);
    surface.draw_pixmap(0, 0, image.as_ref(), &under, transform, None);
    let over = pixmap_paint(sa / 2.0, BlendMode::SourceOver);
    surface.draw_pixmap(0, 0, image.as_ref(), &over, transform, None);
}

/// 没有聚光灯图片时，以 dock 边缘中点为圆心的白色径向渐变
fn spotlight_gradient(surface: &mut Pixmap, cx: &PostOpContext<'_>, sa: f32) {
    let (x, y, iw, ih) = base_rect(&cx.geometry, cx.config.icon_offset);
    let center = match cx.geometry.edge {
        DockEdge::Bottom => Point::from_xy(x + iw / 2.0, y + ih),
        DockEdge::Top => Point::from_xy(x + iw / 2.0, y),
        DockEdge::Right => Point::from_xy(x + iw, y + ih / 2.0),
        DockEdge::Left => Point::from_xy(x, y + ih / 2.0),
    };
    let radius = iw.max(ih) * 0.75;
    let Some(rect) = Rect::from_xywh(0.0, 0.0, cx.width(), cx.height()) else {
        return;
    };

    for (strength, blend_mode) in [(sa, BlendMode::DestinationOver), (sa / 2.0, BlendMode::SourceOver)] {
        let stops = vec![
            GradientStop::new(0.0, Color::from_rgba8(255, 255, 255, (strength * 255.0) as u8)),
            GradientStop::new(1.0, Color::TRANSPARENT),
        ];
        let Some(shader) =
            RadialGradient::new(center, center, radius, stops, SpreadMode::Pad, Transform::identity())
        else {
            return;
        };
        let paint = Paint {
            shader,
            blend_mode,
            anti_alias: true,
            ..Default::default()
        };
        surface.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

// ========== arrows ==========

/// 指示箭头：在 dock 边缘排列 1 到 3 个
pub fn arrows(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    let count = cx.decorations.indicator_count.min(MAX_ARROWS);
    if count == 0 {
        return false;
    }

    let (x, y, iw, ih) = base_rect(&cx.geometry, cx.config.icon_offset);
    let (w, h) = (cx.width(), cx.height());
    let size = (iw.min(ih) / 8.0).max(4.0);
    let spacing = size * 1.5;
    let half = size / 2.0;

    for i in 0..count {
        let along = (i as f32 - (count - 1) as f32 / 2.0) * spacing;
        let (ax, ay, degrees) = match cx.geometry.edge {
            DockEdge::Bottom => (x + iw / 2.0 + along, h - half, 0.0),
            DockEdge::Top => (x + iw / 2.0 + along, half, 180.0),
            DockEdge::Left => (half, y + ih / 2.0 + along, 90.0),
            DockEdge::Right => (w - half, y + ih / 2.0 + along, -90.0),
        };
        let transform = Transform::from_translate(ax, ay).pre_rotate(degrees);
        draw_arrow(surface, cx, size, transform);
    }
    true
}

/// 在局部坐标系（原点为箭头中心，尖端朝 -y）绘制一个箭头
fn draw_arrow(surface: &mut Pixmap, cx: &PostOpContext<'_>, size: f32, transform: Transform) {
    let half = size / 2.0;

    if let Some(image) = &cx.images.arrow {
        let transform = transform
            .pre_translate(-half, -half)
            .pre_scale(size / image.width() as f32, size / image.height() as f32);
        let paint = pixmap_paint(1.0, BlendMode::SourceOver);
        surface.draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
        return;
    }

    let path = match cx.config.arrow.style {
        ArrowStyle::Triangle => {
            let mut pb = PathBuilder::new();
            pb.move_to(0.0, -half);
            pb.line_to(half, half);
            pb.line_to(-half, half);
            pb.close();
            pb.finish()
        }
        ArrowStyle::Dot => PathBuilder::from_circle(0.0, 0.0, size / 2.5),
    };
    let Some(path) = path else { return };

    let paint = solid_paint(color_from_rgba(cx.config.arrow.color), BlendMode::SourceOver);
    surface.fill_path(&path, &paint, FillRule::Winding, transform, None);
}

// ========== progress ==========

/// 进度饼图：深色圆底 + 从 12 点方向顺时针的白色扇形
pub fn progress(surface: &mut Pixmap, cx: &PostOpContext<'_>) -> bool {
    let p = cx.decorations.progress;
    if p >= 1.0 {
        return false;
    }

    let (w, h) = (cx.width(), cx.height());
    let iw = cx.geometry.icon_width as f32;
    let ih = cx.geometry.icon_height as f32;
    let off = cx.icon_offset();
    let (px, py) = match cx.geometry.edge {
        DockEdge::Top => (w / 2.0, off + ih / 2.0),
        DockEdge::Bottom => (w / 2.0, h - off - ih / 2.0),
        DockEdge::Left => (off + iw / 2.0, h / 2.0),
        DockEdge::Right => (w - off - iw / 2.0, h / 2.0),
    };
    let radius = iw.min(ih) / 2.0 * 0.7;
    let a = cx.combined_alpha().clamp(0.0, 1.0);

    let Some(background) = PathBuilder::from_circle(px, py, radius) else {
        return false;
    };
    let Some(bg_color) = Color::from_rgba(0.2, 0.2, 0.2, 0.7 * a) else {
        return false;
    };
    let paint = solid_paint(bg_color, BlendMode::SourceOver);
    surface.fill_path(&background, &paint, FillRule::Winding, Transform::identity(), None);

    if let (Some(pie), Some(fg_color)) = (
        pie_path(px, py, radius * 0.85, p),
        Color::from_rgba(1.0, 1.0, 1.0, 0.8 * a),
    ) {
        let paint = solid_paint(fg_color, BlendMode::SourceOver);
        surface.fill_path(&pie, &paint, FillRule::Winding, Transform::identity(), None);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        geometry: IconGeometry,
        state: AnimationState,
        config: EffectsConfig,
        images: DecorationImages,
        decorations: Decorations,
    }

    impl Fixture {
        fn new(edge: DockEdge) -> Self {
            Self {
                geometry: IconGeometry {
                    icon_width: 32,
                    icon_height: 32,
                    window_width: 64,
                    window_height: 48,
                    edge,
                },
                state: AnimationState::default(),
                config: EffectsConfig::default(),
                images: DecorationImages::default(),
                decorations: Decorations::default(),
            }
        }

        fn context(&self) -> PostOpContext<'_> {
            PostOpContext {
                geometry: self.geometry,
                state: &self.state,
                config: &self.config,
                images: &self.images,
                decorations: &self.decorations,
            }
        }
    }

    /// 在基准位置画一个不透明白色方块
    fn surface_with_icon(fx: &Fixture) -> Pixmap {
        let mut surface = Pixmap::new(64, 48).unwrap();
        let (x, y, w, h) = base_rect(&fx.geometry, fx.config.icon_offset);
        let rect = Rect::from_xywh(x, y, w, h).unwrap();
        surface.fill_rect(
            rect,
            &solid_paint(Color::WHITE, BlendMode::SourceOver),
            Transform::identity(),
            None,
        );
        surface
    }

    fn alpha_at(surface: &Pixmap, x: u32, y: u32) -> u8 {
        surface.pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn test_neutral_state_applies_nothing() {
        let fx = Fixture::new(DockEdge::Bottom);
        let mut surface = surface_with_icon(&fx);
        let before = surface.data().to_vec();
        assert!(apply_all(&mut surface, &fx.context()).is_empty());
        assert_eq!(surface.data(), &before[..]);
    }

    #[test]
    fn test_post_ops_report_in_order() {
        let mut fx = Fixture::new(DockEdge::Bottom);
        fx.state.glow_amount = 0.5;
        fx.state.saturation = 0.5;
        fx.state.alpha = 0.5;
        fx.decorations.progress = 0.3;
        fx.decorations.indicator_count = 2;

        let mut surface = surface_with_icon(&fx);
        let applied = apply_all(&mut surface, &fx.context());
        assert_eq!(
            applied,
            vec![
                PostOp::Saturate,
                PostOp::Glow,
                PostOp::Alpha,
                PostOp::Arrows,
                PostOp::Progress
            ]
        );
    }

    #[test]
    fn test_alpha_scales_coverage() {
        let mut fx = Fixture::new(DockEdge::Bottom);
        fx.state.alpha = 0.5;
        let mut surface = surface_with_icon(&fx);
        assert!(alpha(&mut surface, &fx.context()));
        let a = alpha_at(&surface, 32, 40);
        assert!(a.abs_diff(128) <= 1, "alpha = {a}");
    }

    #[test]
    fn test_icon_alpha_multiplies() {
        let mut fx = Fixture::new(DockEdge::Bottom);
        fx.config.icon_alpha = 0.5;
        fx.state.alpha = 0.5;
        let mut surface = surface_with_icon(&fx);
        alpha(&mut surface, &fx.context());
        let a = alpha_at(&surface, 32, 40);
        assert!(a.abs_diff(64) <= 1, "alpha = {a}");
    }

    #[test]
    fn test_border_clip_clears_edge_strip() {
        let mut fx = Fixture::new(DockEdge::Bottom);
        fx.config.border_clip = 4;
        let mut surface = surface_with_icon(&fx);
        assert!(border_clip(&mut surface, &fx.context()));
        assert_eq!(alpha_at(&surface, 32, 46), 0);
        assert_eq!(alpha_at(&surface, 32, 40), 255);
    }

    #[test]
    fn test_reflection_lands_below_icon() {
        let mut fx = Fixture::new(DockEdge::Bottom);
        fx.config.icon_offset = 8;
        fx.config.show_reflection = true;
        fx.config.reflection_alpha = 1.0;
        let mut surface = surface_with_icon(&fx);
        // 图标占 y ∈ [8, 40)，下方 8 像素的留白原本为空
        assert_eq!(alpha_at(&surface, 32, 44), 0);
        assert!(reflection(&mut surface, &fx.context()));
        assert!(alpha_at(&surface, 32, 44) > 0);
    }

    #[test]
    fn test_shadow_spreads_outside_icon() {
        let mut fx = Fixture::new(DockEdge::Top);
        fx.config.show_shadows = true;
        let mut surface = surface_with_icon(&fx);
        // 图标占 x ∈ [16, 48)
        assert_eq!(alpha_at(&surface, 14, 10), 0);
        assert!(shadow(&mut surface, &fx.context()));
        assert!(alpha_at(&surface, 14, 10) > 0);
        assert_eq!(alpha_at(&surface, 32, 10), 255);
    }

    #[test]
    fn test_depth_requires_switch() {
        let mut fx = Fixture::new(DockEdge::Bottom);
        fx.state.icon_depth = 6;
        fx.config.icon_depth_on = false;
        let mut surface = surface_with_icon(&fx);
        assert!(!depth(&mut surface, &fx.context()));

        fx.config.icon_depth_on = true;
        assert!(depth(&mut surface, &fx.context()));
        // 副本向左错位，超出原来的左边缘
        assert!(alpha_at(&surface, 14, 30) > 0);
    }

    #[test]
    fn test_active_indicator_behind_icon() {
        let mut fx = Fixture::new(DockEdge::Bottom);
        fx.decorations.is_active = true;
        let mut surface = Pixmap::new(64, 48).unwrap();
        assert!(active(&mut surface, &fx.context()));
        assert!(alpha_at(&surface, 32, 32) > 0);
        assert_eq!(alpha_at(&surface, 4, 4), 0);
    }

    #[test]
    fn test_spotlight_gradient_fallback() {
        let mut fx = Fixture::new(DockEdge::Bottom);
        fx.state.spotlight = true;
        fx.state.spotlight_alpha = 1.0;
        let mut surface = Pixmap::new(64, 48).unwrap();
        assert!(spotlight(&mut surface, &fx.context()));
        // 靠近 dock 边缘中点最亮
        assert!(alpha_at(&surface, 32, 47) > alpha_at(&surface, 32, 20));
    }

    #[test]
    fn test_arrows_capped_at_three() {
        let mut fx = Fixture::new(DockEdge::Left);
        fx.decorations.indicator_count = 7;
        let mut surface = Pixmap::new(64, 48).unwrap();
        assert!(arrows(&mut surface, &fx.context()));

        // 每个箭头 4 像素，间隔 6 像素，沿竖直方向排列在左边缘
        let column: Vec<u8> = (0..48).map(|y| alpha_at(&surface, 2, y)).collect();
        let runs = column
            .windows(2)
            .filter(|pair| pair[0] == 0 && pair[1] > 0)
            .count();
        assert_eq!(runs, 3);
    }

    #[test]
    fn test_progress_pie() {
        let mut fx = Fixture::new(DockEdge::Bottom);
        fx.decorations.progress = 0.25;
        let mut surface = Pixmap::new(64, 48).unwrap();
        assert!(progress(&mut surface, &fx.context()));

        // 圆心 (32, 32)；右上象限被白色扇形覆盖，左上象限只有深色底
        let filled = surface.pixel(36, 28).unwrap();
        let empty = surface.pixel(28, 28).unwrap();
        assert!(filled.red() > empty.red());
        assert!(empty.alpha() > 0);
    }
}
