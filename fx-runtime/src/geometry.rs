//! # Geometry 模块
//!
//! Dock 边缘与图标/窗口尺寸。

use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// Dock 所在的屏幕边缘
///
/// 边缘决定了所有几何量的轴向：在 `Left` / `Right` 上，
/// "向上弹起"意味着水平方向移动，宽高修饰量互换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockEdge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl DockEdge {
    /// 是否为水平 dock（Top / Bottom）
    pub fn is_horizontal(self) -> bool {
        matches!(self, DockEdge::Top | DockEdge::Bottom)
    }
}

impl std::str::FromStr for DockEdge {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(DockEdge::Top),
            "bottom" => Ok(DockEdge::Bottom),
            "left" => Ok(DockEdge::Left),
            "right" => Ok(DockEdge::Right),
            _ => Err(StyleError::UnknownEdge { name: s.to_string() }),
        }
    }
}

/// 矩形区域（像素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    /// 创建区域
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 原点为 (0, 0) 的区域
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// 一帧所需的几何信息
///
/// 图标尺寸来自 `set_icon_size`，窗口尺寸与边缘每帧从控件实时读取。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconGeometry {
    pub icon_width: i32,
    pub icon_height: i32,
    pub window_width: i32,
    pub window_height: i32,
    pub edge: DockEdge,
}

impl IconGeometry {
    /// 缩放类动画允许的最大倍数：窗口沿 dock 方向能容纳的图标倍数
    pub fn max_zoom(&self) -> f32 {
        if self.edge.is_horizontal() {
            self.window_width as f32 / self.icon_width.max(1) as f32
        } else {
            self.window_height as f32 / self.icon_height.max(1) as f32
        }
    }
}
