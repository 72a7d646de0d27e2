//! # Filters 模块
//!
//! 直接作用在预乘 RGBA 像素上的滤镜。
//!
//! 所有滤镜都保持预乘不变量：颜色分量不超过 alpha。

use tiny_skia::Pixmap;

/// 阴影模糊半径
pub const SHADOW_BLUR_RADIUS: usize = 4;

/// 降低饱和度
///
/// 按亮度权重 0.30 / 0.59 / 0.11 向灰度插值，`saturation` 为 1.0 时不变。
pub fn saturate(pixmap: &mut Pixmap, saturation: f32) {
    let s = saturation.clamp(0.0, 1.0);
    for px in pixmap.data_mut().chunks_exact_mut(4) {
        if px[3] == 0 {
            continue;
        }
        let (r, g, b) = (px[0] as f32, px[1] as f32, px[2] as f32);
        let intensity = r * 0.30 + g * 0.59 + b * 0.11;
        let a = px[3] as f32;
        px[0] = mix(intensity, r, s).min(a) as u8;
        px[1] = mix(intensity, g, s).min(a) as u8;
        px[2] = mix(intensity, b, s).min(a) as u8;
    }
}

fn mix(gray: f32, color: f32, s: f32) -> f32 {
    (gray * (1.0 - s) + color * s).round()
}

/// 提亮（发光）
///
/// 每个分量增加 `(24 + v / 8) * amount`，不超过 alpha；为 0 的分量保持不变。
pub fn lighten(pixmap: &mut Pixmap, amount: f32) {
    if amount <= 0.0 {
        return;
    }
    for px in pixmap.data_mut().chunks_exact_mut(4) {
        let a = px[3];
        for c in &mut px[..3] {
            *c = lighten_component(*c, amount).min(a);
        }
    }
}

fn lighten_component(v: u8, amount: f32) -> u8 {
    if v < 1 {
        return v;
    }
    let boost = (24.0 + (v >> 3) as f32) * amount;
    (v as f32 + boost).min(255.0) as u8
}

/// 变暗：颜色置零，只保留 alpha
pub fn darken(pixmap: &mut Pixmap) {
    for px in pixmap.data_mut().chunks_exact_mut(4) {
        px[0] = 0;
        px[1] = 0;
        px[2] = 0;
    }
}

/// 对 alpha 通道做盒式模糊
///
/// 窗口外的像素按透明处理，总和除以完整窗口面积 `(2r + 1)²`。
/// 颜色分量被清零，结果是一张黑色半透明位图。
pub fn blur_alpha(pixmap: &mut Pixmap, radius: usize) {
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let area = ((2 * radius + 1) * (2 * radius + 1)) as u32;

    let source: Vec<u8> = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
    let data = pixmap.data_mut();

    for y in 0..height {
        for x in 0..width {
            let y0 = y.saturating_sub(radius);
            let y1 = (y + radius).min(height - 1);
            let x0 = x.saturating_sub(radius);
            let x1 = (x + radius).min(width - 1);

            let mut sum = 0u32;
            for sy in y0..=y1 {
                let row = &source[sy * width..(sy + 1) * width];
                sum += row[x0..=x1].iter().map(|&a| a as u32).sum::<u32>();
            }

            let i = (y * width + x) * 4;
            data[i] = 0;
            data[i + 1] = 0;
            data[i + 2] = 0;
            data[i + 3] = (sum / area) as u8;
        }
    }
}
