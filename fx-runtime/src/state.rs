//! # State 模块
//!
//! 每个图标实例一份的动画状态。
//!
//! 当前持有帧槽位的动画每帧读写这些字段，渲染管线只读取它们。
//! 状态只在一个效果的**新一轮运行**开始时重置，运行中途从不重置。

use crate::geometry::Region;

/// 动画阶段方向
///
/// 各动画状态机共享同一个方向字段，用来标记当前处于哪个阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    SquishDown,
    SquishDown2,
    SquishUp,
    SquishUp2,
    SpotlightOn,
    TrembleUp,
    TrembleDown,
    SpotlightOff,
}

/// 动画状态
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    /// 帧计数器
    pub count: i32,
    /// 当前阶段
    pub direction: Direction,
    /// 沿 dock 方向的偏移
    pub side_offset: f32,
    /// 垂直于 dock 方向（远离边缘）的偏移
    pub top_offset: f32,
    /// 宽度缩放修饰
    pub width_mod: f32,
    /// 高度缩放修饰
    pub height_mod: f32,
    /// 图标坐标系中的裁剪矩形，`None` 表示不裁剪
    pub clip: Option<Region>,
    /// 伪 3D 厚度（像素）
    pub icon_depth: i32,
    /// 厚度朝向是否反转
    pub depth_reversed: bool,
    /// 旋转角度
    pub rotate_degrees: f32,
    /// 不透明度
    pub alpha: f32,
    /// 饱和度（1.0 为原色）
    pub saturation: f32,
    /// 发光强度
    pub glow_amount: f32,
    /// 是否绘制聚光灯
    pub spotlight: bool,
    /// 聚光灯不透明度
    pub spotlight_alpha: f32,
    /// 是否镜像
    pub flip: bool,
    /// 简约风格的高亮矩形
    pub simple_rect: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            count: 0,
            direction: Direction::None,
            side_offset: 0.0,
            top_offset: 0.0,
            width_mod: 1.0,
            height_mod: 1.0,
            clip: None,
            icon_depth: 0,
            depth_reversed: false,
            rotate_degrees: 0.0,
            alpha: 1.0,
            saturation: 1.0,
            glow_amount: 0.0,
            spotlight: false,
            spotlight_alpha: 0.0,
            flip: false,
            simple_rect: false,
        }
    }
}

impl AnimationState {
    /// 重置为默认值（新一轮运行开始时调用）
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 是否处于中性姿态：绘制结果与没有任何效果时一致
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// 是否需要缩放
    pub fn is_scaled(&self) -> bool {
        self.width_mod != 1.0 || self.height_mod != 1.0
    }
}
