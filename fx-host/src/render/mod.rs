//! # Render 模块
//!
//! 把动画状态变成像素的渲染管线。
//!
//! ## 管线结构
//!
//! ```text
//! pre-ops  : clear → translate → clip → scale → rotate → flip
//! paint    : 图标位图 + 受效果影响的叠加层
//! post-ops : clip → depth → shadow → saturate → glow → alpha → reflection
//!            → active → spotlight → arrows → progress
//! overlays : 不受效果影响的叠加层（基准位置）
//! ```
//!
//! 每一步都从单位矩阵构建自己的变换，步骤之间不泄漏变换或裁剪状态。

pub mod filters;
pub mod post_ops;
pub mod pre_ops;

use std::f32::consts::PI;

use thiserror::Error;
use tiny_skia::{Color, Path, PathBuilder};

pub use post_ops::{PostOp, PostOpContext};
pub use pre_ops::IconPlacement;

/// 渲染错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// 无法分配绘制表面或蒙版
    #[error("无法分配 {width}x{height} 的绘制表面")]
    Surface { width: u32, height: u32 },
}

/// 图标装饰状态
///
/// 由宿主根据应用状态设置，与动画无关。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decorations {
    /// 是否为活动窗口
    pub is_active: bool,
    /// 指示箭头数量（最多绘制 3 个）
    pub indicator_count: u32,
    /// 进度 (0.0 - 1.0)，1.0 表示不显示
    pub progress: f32,
}

impl Default for Decorations {
    fn default() -> Self {
        Self {
            is_active: false,
            indicator_count: 0,
            progress: 1.0,
        }
    }
}

/// RGBA 数组转换为颜色
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// 圆角矩形路径，半径不超过短边的一半
pub fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<Path> {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

/// 从 12 点方向顺时针展开的扇形
///
/// `fraction` 为 0 时返回 `None`。
pub fn pie_path(cx: f32, cy: f32, radius: f32, fraction: f32) -> Option<Path> {
    let fraction = fraction.clamp(0.0, 1.0);
    if fraction <= 0.0 || radius <= 0.0 {
        return None;
    }

    let start = 1.5 * PI;
    let sweep = 2.0 * PI * fraction;
    let segments = ((64.0 * fraction).ceil() as usize).max(2);

    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy);
    for i in 0..=segments {
        let angle = start + sweep * i as f32 / segments as f32;
        pb.line_to(cx + radius * angle.cos(), cy + radius * angle.sin());
    }
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_decorations_draw_nothing() {
        let deco = Decorations::default();
        assert!(!deco.is_active);
        assert_eq!(deco.indicator_count, 0);
        assert_eq!(deco.progress, 1.0);
    }

    #[test]
    fn test_pie_path_bounds() {
        assert!(pie_path(10.0, 10.0, 5.0, 0.0).is_none());

        // 四分之一：从 12 点到 3 点
        let quarter = pie_path(10.0, 10.0, 5.0, 0.25).unwrap();
        let bounds = quarter.bounds();
        assert!((bounds.left() - 10.0).abs() < 0.01);
        assert!((bounds.top() - 5.0).abs() < 0.01);
        assert!((bounds.right() - 15.0).abs() < 0.01);
        assert!((bounds.bottom() - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_rounded_rect_radius_clamped() {
        let path = rounded_rect_path(0.0, 0.0, 10.0, 4.0, 20.0).unwrap();
        let bounds = path.bounds();
        assert_eq!(bounds.width(), 10.0);
        assert_eq!(bounds.height(), 4.0);
    }
}
