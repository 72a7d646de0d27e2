//! # Widget 模块
//!
//! 引擎对宿主控件的全部需求。
//!
//! 引擎只持有控件的 [`Weak`](std::rc::Weak) 引用：控件可能在动画进行中被销毁，
//! 此时引擎跳过重绘和通知，但仍完成自身的清理。

use crate::geometry::{DockEdge, Region};

/// 宿主控件接口
pub trait IconWidget {
    /// 请求异步重绘；`None` 表示整个控件
    fn request_repaint(&self, region: Option<Region>);

    /// 控件（窗口）几何
    fn widget_geometry(&self) -> Region;

    /// Dock 所在边缘，每次使用时实时读取
    fn dock_edge(&self) -> DockEdge;

    /// 控件是否已经绘制过至少一次
    fn has_painted(&self) -> bool {
        true
    }

    /// 请求重新布局（图标尺寸变化时）
    fn request_resize(&self) {}
}
