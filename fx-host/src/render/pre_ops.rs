//! # Pre-ops 模块
//!
//! 绘制图标之前的变换步骤，顺序固定：
//!
//! ```text
//! clear → translate → clip → scale → rotate → flip
//! ```
//!
//! 结果是一个变换矩阵和一个可选的裁剪蒙版，图标位图和受效果影响的叠加层
//! 都在这个坐标系（图标坐标，原点在图标左上角）里绘制。

use fx_runtime::{AnimationState, DockEdge, IconGeometry, Region};
use tiny_skia::{FillRule, Mask, PathBuilder, Pixmap, Rect, Transform};
use tracing::trace;

use super::RenderError;

/// 图标的摆放：变换与裁剪蒙版
#[derive(Debug, Clone)]
pub struct IconPlacement {
    /// 图标坐标到表面坐标的变换
    pub transform: Transform,
    /// 裁剪蒙版（表面尺寸），`None` 表示不裁剪
    pub mask: Option<Mask>,
}

/// 沿两个屏幕轴的缩放倍数
///
/// 宽度修饰量总是沿 dock 方向；在竖直 dock 上两个轴互换。
pub fn axis_scale(edge: DockEdge, state: &AnimationState) -> (f32, f32) {
    if edge.is_horizontal() {
        (state.width_mod, state.height_mod)
    } else {
        (state.height_mod, state.width_mod)
    }
}

/// 图标左上角在表面上的位置
///
/// 根据边缘把缩放后的图标贴在 dock 一侧，`top_offset` 使其远离边缘，
/// `side_offset` 使其沿 dock 方向移动。结果截断为整数像素。
pub fn icon_origin(geo: &IconGeometry, state: &AnimationState, icon_offset: i32) -> (f32, f32) {
    let (sx, sy) = axis_scale(geo.edge, state);
    let scaled_w = geo.icon_width as f32 * sx;
    let scaled_h = geo.icon_height as f32 * sy;
    let win_w = geo.window_width as f32;
    let win_h = geo.window_height as f32;
    let offset = icon_offset as f32;
    let top = state.top_offset;
    let side = state.side_offset;

    let (dx, dy) = match geo.edge {
        DockEdge::Bottom => ((win_w - scaled_w) / 2.0 - side, win_h - scaled_h - top - offset),
        DockEdge::Top => ((win_w - scaled_w) / 2.0 + side, top + offset),
        DockEdge::Right => (win_w - scaled_w - top - offset, (win_h - scaled_h) / 2.0 - side),
        DockEdge::Left => (top + offset, (win_h - scaled_h) / 2.0 + side),
    };

    (dx.trunc(), dy.trunc())
}

/// 没有任何效果时图标所在的矩形（表面坐标）
pub fn base_rect(geo: &IconGeometry, icon_offset: i32) -> (f32, f32, f32, f32) {
    let (x, y) = icon_origin(geo, &AnimationState::default(), icon_offset);
    (x, y, geo.icon_width as f32, geo.icon_height as f32)
}

/// 清空表面
pub fn clear(surface: &mut Pixmap) {
    surface.fill(tiny_skia::Color::TRANSPARENT);
}

/// 计算图标的摆放
///
/// # 参数
///
/// - `geo`: 本帧几何（边缘实时读取）
/// - `state`: 动画状态
/// - `icon_offset`: 图标距 dock 边缘的偏移
pub fn place_icon(
    geo: &IconGeometry,
    state: &AnimationState,
    icon_offset: i32,
) -> Result<IconPlacement, RenderError> {
    // ========== translate ==========
    let (dx, dy) = icon_origin(geo, state, icon_offset);
    let mut transform = Transform::from_translate(dx, dy);

    // ========== clip ==========
    let mask = match state.clip {
        Some(clip) => {
            let (clip_transform, rect) = clip_geometry(geo, clip);
            transform = transform.pre_concat(clip_transform);
            Some(build_mask(geo, rect, transform)?)
        }
        None => None,
    };

    // ========== scale ==========
    if state.is_scaled() {
        let (sx, sy) = axis_scale(geo.edge, state);
        transform = transform.pre_scale(sx, sy);
    }

    // ========== rotate ==========
    if state.rotate_degrees > 0.0 {
        transform = transform.pre_rotate(state.rotate_degrees);
    }

    // ========== flip ==========
    if state.flip {
        let iw = geo.icon_width as f32;
        let ih = geo.icon_height as f32;
        let mirror = if geo.edge.is_horizontal() {
            Transform::from_row(-1.0, 0.0, 0.0, 1.0, iw, 0.0)
        } else {
            Transform::from_row(1.0, 0.0, 0.0, -1.0, 0.0, ih)
        };
        transform = transform.pre_concat(mirror);
    }

    trace!(?transform, clipped = mask.is_some(), "图标摆放");
    Ok(IconPlacement { transform, mask })
}

/// 裁剪区域按边缘重映射
///
/// 返回附加的平移以及图标坐标中的可见矩形 `(x, y, w, h)`；
/// 平移让露出的部分紧贴 dock 边缘。
fn clip_geometry(geo: &IconGeometry, clip: Region) -> (Transform, (f32, f32, f32, f32)) {
    let iw = geo.icon_width as f32;
    let ih = geo.icon_height as f32;
    let (cx, cy, cw, ch) = (
        clip.x as f32,
        clip.y as f32,
        clip.width as f32,
        clip.height as f32,
    );

    match geo.edge {
        DockEdge::Bottom => (
            Transform::from_translate(iw - (cw - cx), ih - (ch - cy)),
            (cx, cy, cw, ch),
        ),
        DockEdge::Top => (
            Transform::from_translate(-iw + (cw - cx), -ih + (ch - cy)),
            (cx, ih - cy - ch, cw, ch),
        ),
        DockEdge::Right | DockEdge::Left => {
            // 在竖直 dock 上，裁剪的宽高沿屏幕轴互换
            let mw = ch / ih * iw;
            let mh = cw / iw * ih;
            let mx = cy / ih * iw;
            let my = cx / iw * ih;
            if geo.edge == DockEdge::Right {
                (
                    Transform::from_translate(iw - (mw - mx), ih - (mh - my)),
                    (mx, my, mw, mh),
                )
            } else {
                (
                    Transform::from_translate(-iw + (mw - mx), -ih + (mh - my)),
                    (iw - mx - mw, my, mw, mh),
                )
            }
        }
    }
}

fn build_mask(
    geo: &IconGeometry,
    (x, y, w, h): (f32, f32, f32, f32),
    transform: Transform,
) -> Result<Mask, RenderError> {
    let width = geo.window_width.max(1) as u32;
    let height = geo.window_height.max(1) as u32;
    let mut mask = Mask::new(width, height).ok_or(RenderError::Surface { width, height })?;

    // 空矩形得到全零蒙版：整个图标被裁掉
    if w <= 0.0 || h <= 0.0 {
        return Ok(mask);
    }
    if let Some(rect) = Rect::from_xywh(x, y, w, h) {
        let path = PathBuilder::from_rect(rect);
        mask.fill_path(&path, FillRule::Winding, true, transform);
    }

    Ok(mask)
}
