//! # Overlay 模块
//!
//! 叠加在图标上的附加内容（徽章、进度等）。
//!
//! 叠加层分两类：
//! - 受效果影响：与图标共用 pre-ops 的变换与裁剪，随动画一起移动/缩放；
//! - 不受效果影响：在所有后处理之后，画在图标未经变换的基准位置。
//!
//! 位置按九宫格重心 [`Gravity`] 计算，偏移量以图标尺寸为单位。

mod bitmap;
mod progress;

pub use bitmap::ImageOverlay;
pub use progress::ProgressOverlay;

use tiny_skia::{Mask, Pixmap, Transform};

/// 叠加层的九宫格重心
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gravity {
    #[default]
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Gravity {
    /// 叠加层左上角在图标坐标中的位置
    ///
    /// # 参数
    ///
    /// - `icon`: 图标尺寸 `(w, h)`
    /// - `overlay`: 叠加层尺寸 `(w, h)`
    /// - `adjust`: 偏移量 `(x, y)`，以图标宽高为单位
    pub fn position(self, icon: (f32, f32), overlay: (f32, f32), adjust: (f32, f32)) -> (f32, f32) {
        let (iw, ih) = icon;
        let (ow, oh) = overlay;
        let xo = adjust.0 * iw;
        let yo = adjust.1 * ih;

        let left = xo;
        let center_x = iw / 2.0 - ow / 2.0 + xo;
        let right = iw - ow + xo;
        let top = yo;
        let center_y = ih / 2.0 - oh / 2.0 + yo;
        let bottom = ih - oh + yo;

        match self {
            Gravity::Center => (center_x, center_y),
            Gravity::North => (center_x, top),
            Gravity::NorthEast => (right, top),
            Gravity::East => (right, center_y),
            Gravity::SouthEast => (right, bottom),
            Gravity::South => (center_x, bottom),
            Gravity::SouthWest => (left, bottom),
            Gravity::West => (left, center_y),
            Gravity::NorthWest => (left, top),
        }
    }
}

/// 叠加层绘制区域
///
/// `transform` 把图标坐标（原点在图标左上角）映射到表面坐标。
#[derive(Debug, Clone, Copy)]
pub struct OverlayArea<'a> {
    pub icon_width: f32,
    pub icon_height: f32,
    pub transform: Transform,
    pub mask: Option<&'a Mask>,
}

/// 叠加层接口
pub trait Overlay {
    /// 在图标坐标系中绘制
    fn render(&self, surface: &mut Pixmap, area: &OverlayArea<'_>);

    /// 是否随图标效果一起变换
    fn apply_effects(&self) -> bool {
        false
    }

    /// 是否可见；不可见的叠加层被跳过
    fn is_active(&self) -> bool {
        true
    }
}
