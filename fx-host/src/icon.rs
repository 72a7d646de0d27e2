//! # Icon 模块
//!
//! 单个图标的效果门面：持有引擎、配置、装饰状态与叠加层列表，
//! 并提供成对的 `begin_paint` / `end_paint`。
//!
//! ## 绘制流程
//!
//! ```text
//! let mut cx = icon.begin_paint()?;   // clear + pre-ops
//! cx.paint_icon(&artwork);            // 图标位图
//! let frame = icon.end_paint(cx);     // 叠加层 + post-ops
//! ```
//!
//! [`PaintContext`] 是按值返回、按值交还的：配对由类型系统保证，
//! 并且不借用 [`IconEffects`]，绘制期间仍可增删叠加层。

use std::rc::{Rc, Weak};
use std::time::Duration;

use fx_runtime::{
    AnimationState, EffectEngine, EffectEvent, EffectKind, IconGeometry, IconWidget, RunPhase,
};
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};
use tracing::{debug, trace};

use crate::config::EffectsConfig;
use crate::error::HostResult;
use crate::overlay::{Overlay, OverlayArea};
use crate::render::post_ops::{self, PostOp, PostOpContext};
use crate::render::pre_ops::{self, IconPlacement};
use crate::render::{Decorations, RenderError};
use crate::resources::DecorationImages;

/// 一次绘制的上下文
///
/// 由 [`IconEffects::begin_paint`] 创建，交给 [`IconEffects::end_paint`] 消耗。
pub struct PaintContext {
    surface: Pixmap,
    placement: IconPlacement,
    geometry: IconGeometry,
    state: AnimationState,
    overlays: Vec<Rc<dyn Overlay>>,
}

impl PaintContext {
    /// 用 pre-ops 的变换与裁剪绘制图标位图
    ///
    /// 位图会被缩放到图标尺寸。
    pub fn paint_icon(&mut self, icon: &Pixmap) {
        let sx = self.geometry.icon_width as f32 / icon.width() as f32;
        let sy = self.geometry.icon_height as f32 / icon.height() as f32;
        let transform = self.placement.transform.pre_scale(sx, sy);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        self.surface.draw_pixmap(
            0,
            0,
            icon.as_ref(),
            &paint,
            transform,
            self.placement.mask.as_ref(),
        );
    }

    /// 图标坐标到表面坐标的变换
    pub fn transform(&self) -> Transform {
        self.placement.transform
    }

    /// 本次绘制的几何信息
    pub fn geometry(&self) -> IconGeometry {
        self.geometry
    }

    /// 本次绘制读取的动画状态
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// 直接访问绘制表面
    pub fn surface_mut(&mut self) -> &mut Pixmap {
        &mut self.surface
    }
}

/// 单个图标的效果门面
pub struct IconEffects {
    engine: EffectEngine,
    config: EffectsConfig,
    images: DecorationImages,
    decorations: Decorations,
    overlays: Vec<Rc<dyn Overlay>>,
}

impl IconEffects {
    /// 创建图标效果实例，按配置加载装饰图片
    ///
    /// # 参数
    /// - `widget`: 宿主控件的弱引用
    /// - `config`: 效果配置（会先验证）
    pub fn new(widget: Weak<dyn IconWidget>, config: EffectsConfig) -> HostResult<Self> {
        let images = DecorationImages::load(&config);
        Self::with_images(widget, config, images)
    }

    /// 使用已经加载好的装饰图片创建
    pub fn with_images(
        widget: Weak<dyn IconWidget>,
        config: EffectsConfig,
        images: DecorationImages,
    ) -> HostResult<Self> {
        config.validate()?;
        let engine = EffectEngine::new(widget, &config.engine_config()?)?;
        Ok(Self {
            engine,
            config,
            images,
            decorations: Decorations::default(),
            overlays: Vec::new(),
        })
    }

    // ========== 配置 ==========

    /// 更换配置：风格与帧间隔立即交给引擎，装饰图片重新加载
    pub fn set_config(&mut self, config: EffectsConfig) -> HostResult<()> {
        config.validate()?;
        let engine_config = config.engine_config()?;
        self.engine.set_styles(&engine_config.styles);
        self.engine.set_frame_interval(engine_config.frame_interval())?;
        self.images = DecorationImages::load(&config);
        self.config = config;
        debug!("效果配置已更新");
        Ok(())
    }

    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    // ========== 效果控制 ==========

    pub fn start(&mut self, kind: EffectKind) {
        self.engine.start(kind);
    }

    pub fn start_ex(&mut self, kind: EffectKind, max_loops: u32, signal_start: bool, signal_end: bool) {
        self.engine.start_ex(kind, max_loops, signal_start, signal_end);
    }

    pub fn stop(&mut self, kind: EffectKind) {
        self.engine.stop(kind);
    }

    pub fn set_icon_size(&mut self, width: i32, height: i32, resize_hint: bool) {
        self.engine.set_icon_size(width, height, resize_hint);
    }

    /// 推进时间
    pub fn update(&mut self, dt: Duration) {
        self.engine.update(dt);
    }

    /// 直接推进一帧
    pub fn tick(&mut self) -> bool {
        self.engine.tick()
    }

    pub fn take_events(&mut self) -> Vec<EffectEvent> {
        self.engine.take_events()
    }

    pub fn phase(&self) -> RunPhase {
        self.engine.phase()
    }

    pub fn engine(&self) -> &EffectEngine {
        &self.engine
    }

    // ========== 装饰 ==========

    pub fn set_active(&mut self, active: bool) {
        self.decorations.is_active = active;
    }

    /// 指示箭头数量（绘制时最多 3 个）
    pub fn set_indicator_count(&mut self, count: u32) {
        self.decorations.indicator_count = count;
    }

    /// 进度 (0.0 - 1.0)，1.0 隐藏进度饼图
    pub fn set_progress(&mut self, progress: f32) {
        self.decorations.progress = progress.clamp(0.0, 1.0);
    }

    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    // ========== 叠加层 ==========

    pub fn add_overlay(&mut self, overlay: Rc<dyn Overlay>) {
        if !self.overlays.iter().any(|o| Rc::ptr_eq(o, &overlay)) {
            self.overlays.push(overlay);
        }
    }

    /// 移除叠加层；不存在时返回 `false`
    pub fn remove_overlay(&mut self, overlay: &Rc<dyn Overlay>) -> bool {
        let before = self.overlays.len();
        self.overlays.retain(|o| !Rc::ptr_eq(o, overlay));
        before != self.overlays.len()
    }

    pub fn list_overlays(&self) -> Vec<Rc<dyn Overlay>> {
        self.overlays.clone()
    }

    // ========== 绘制 ==========

    /// 开始绘制：分配表面、清空并执行 pre-ops
    ///
    /// dock 边缘与窗口尺寸在此时从控件实时读取。
    pub fn begin_paint(&self) -> Result<PaintContext, RenderError> {
        let geometry = self.engine.geometry();
        let width = geometry.window_width.max(1) as u32;
        let height = geometry.window_height.max(1) as u32;
        let mut surface = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;

        pre_ops::clear(&mut surface);
        let state = self.engine.state().clone();
        let placement = pre_ops::place_icon(&geometry, &state, self.config.icon_offset)?;

        trace!(edge = ?geometry.edge, width, height, "开始绘制");
        Ok(PaintContext {
            surface,
            placement,
            geometry,
            state,
            overlays: self.overlays.clone(),
        })
    }

    /// 结束绘制：叠加层与 post-ops，返回最终表面
    pub fn end_paint(&self, cx: PaintContext) -> Pixmap {
        self.end_paint_with_report(cx).0
    }

    /// 与 [`end_paint`](Self::end_paint) 相同，额外返回实际执行的后处理步骤
    pub fn end_paint_with_report(&self, cx: PaintContext) -> (Pixmap, Vec<PostOp>) {
        let PaintContext {
            mut surface,
            placement,
            geometry,
            state,
            overlays,
        } = cx;
        let icon_width = geometry.icon_width as f32;
        let icon_height = geometry.icon_height as f32;

        // 受效果影响的叠加层与图标共用变换和裁剪
        let affected = OverlayArea {
            icon_width,
            icon_height,
            transform: placement.transform,
            mask: placement.mask.as_ref(),
        };
        for overlay in overlays.iter().filter(|o| o.is_active() && o.apply_effects()) {
            overlay.render(&mut surface, &affected);
        }

        let post = PostOpContext {
            geometry,
            state: &state,
            config: &self.config,
            images: &self.images,
            decorations: &self.decorations,
        };
        let applied = post_ops::apply_all(&mut surface, &post);

        // 不受效果影响的叠加层画在基准位置
        let (base_x, base_y, _, _) = pre_ops::base_rect(&geometry, self.config.icon_offset);
        let exempt = OverlayArea {
            icon_width,
            icon_height,
            transform: Transform::from_translate(base_x, base_y),
            mask: None,
        };
        for overlay in overlays.iter().filter(|o| o.is_active() && !o.apply_effects()) {
            overlay.render(&mut surface, &exempt);
        }

        (surface, applied)
    }

    /// 渲染一帧：begin_paint → paint_icon → end_paint
    pub fn render_frame(&self, icon: &Pixmap) -> Result<Pixmap, RenderError> {
        let mut cx = self.begin_paint()?;
        cx.paint_icon(icon);
        Ok(self.end_paint(cx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use fx_runtime::{DockEdge, Region};
    use tiny_skia::Color;

    use crate::overlay::ImageOverlay;

    struct TestWidget {
        edge: Cell<DockEdge>,
    }

    impl IconWidget for TestWidget {
        fn request_repaint(&self, _region: Option<Region>) {}

        fn widget_geometry(&self) -> Region {
            Region::from_size(64, 48)
        }

        fn dock_edge(&self) -> DockEdge {
            self.edge.get()
        }
    }

    fn setup() -> (Rc<TestWidget>, IconEffects) {
        let widget = Rc::new(TestWidget {
            edge: Cell::new(DockEdge::Bottom),
        });
        let dyn_widget: Rc<dyn IconWidget> = widget.clone();
        let mut icon = IconEffects::with_images(
            Rc::downgrade(&dyn_widget),
            EffectsConfig::default(),
            DecorationImages::default(),
        )
        .unwrap();
        icon.set_icon_size(32, 32, false);
        (widget, icon)
    }

    fn artwork() -> Pixmap {
        let mut pixmap = Pixmap::new(16, 16).unwrap();
        pixmap.fill(Color::from_rgba8(0, 0, 255, 255));
        pixmap
    }

    #[test]
    fn test_neutral_frame_places_icon_at_base() {
        let (_widget, icon) = setup();
        let frame = icon.render_frame(&artwork()).unwrap();
        assert_eq!((frame.width(), frame.height()), (64, 48));
        assert_eq!(frame.pixel(32, 40).unwrap().blue(), 255);
        assert_eq!(frame.pixel(32, 8).unwrap().alpha(), 0);
    }

    #[test]
    fn test_edge_read_at_paint_time() {
        let (widget, icon) = setup();
        widget.edge.set(DockEdge::Top);
        let frame = icon.render_frame(&artwork()).unwrap();
        assert_eq!(frame.pixel(32, 8).unwrap().blue(), 255);
        assert_eq!(frame.pixel(32, 40).unwrap().alpha(), 0);
    }

    #[test]
    fn test_overlay_list_is_deduplicated() {
        let (_widget, mut icon) = setup();
        let overlay: Rc<dyn Overlay> = Rc::new(ImageOverlay::new(artwork()));
        icon.add_overlay(overlay.clone());
        icon.add_overlay(overlay.clone());
        assert_eq!(icon.list_overlays().len(), 1);
        assert!(icon.remove_overlay(&overlay));
        assert!(!icon.remove_overlay(&overlay));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (_widget, mut icon) = setup();
        let bad = EffectsConfig {
            frame_interval_ms: 0,
            ..Default::default()
        };
        assert!(icon.set_config(bad).is_err());
        assert_eq!(icon.config().frame_interval_ms, 40);
    }

    #[test]
    fn test_progress_decoration_reported() {
        let (_widget, mut icon) = setup();
        icon.set_progress(0.4);
        let mut cx = icon.begin_paint().unwrap();
        cx.paint_icon(&artwork());
        let (_, applied) = icon.end_paint_with_report(cx);
        assert_eq!(applied, vec![PostOp::Progress]);
    }
}
