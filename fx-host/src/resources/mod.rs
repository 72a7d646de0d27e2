//! # Resources 模块
//!
//! 图片资源的加载与格式转换。
//!
//! 磁盘上的图片经 `image` crate 解码为 RGBA8，再转换为 tiny-skia 使用的
//! 预乘 alpha 位图；渲染结果反向转换后保存为 PNG。

use std::path::Path;

use image::RgbaImage;
use tiny_skia::{ColorU8, Pixmap};
use tracing::{debug, warn};

use crate::config::EffectsConfig;

mod error;

pub use error::ResourceError;

/// 从文件加载图片并转换为预乘位图
///
/// 支持 PNG、JPEG、WebP 格式。
///
/// # 参数
///
/// - `path`: 图片路径
/// - `kind`: 资源类型，仅用于错误信息
pub fn load_pixmap(path: impl AsRef<Path>, kind: &str) -> Result<Pixmap, ResourceError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ResourceError::NotFound { path: display });
    }

    // 读取文件
    let bytes = std::fs::read(path).map_err(|e| ResourceError::LoadFailed {
        path: display.clone(),
        kind: kind.to_string(),
        message: e.to_string(),
    })?;

    // 使用 image crate 解码
    let img = image::load_from_memory(&bytes).map_err(|e| ResourceError::InvalidFormat {
        path: display.clone(),
        message: e.to_string(),
    })?;

    let pixmap = pixmap_from_rgba(&img.to_rgba8())?;
    debug!(path = %path.display(), kind, width = pixmap.width(), height = pixmap.height(), "图片已加载");
    Ok(pixmap)
}

/// RGBA8 图像转换为预乘位图
pub fn pixmap_from_rgba(rgba: &RgbaImage) -> Result<Pixmap, ResourceError> {
    let (width, height) = rgba.dimensions();
    let mut pixmap =
        Pixmap::new(width, height).ok_or(ResourceError::PixmapAllocation { width, height })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    Ok(pixmap)
}

/// 预乘位图转换回 RGBA8 图像
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());

    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }

    image
}

/// 把位图保存为 PNG
pub fn save_png(pixmap: &Pixmap, path: impl AsRef<Path>) -> Result<(), ResourceError> {
    let path = path.as_ref();
    pixmap_to_rgba(pixmap)
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| ResourceError::SaveFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

/// 装饰图片
///
/// 每一项都是可选的：加载失败时记录警告，渲染管线退回矢量绘制。
#[derive(Debug, Clone, Default)]
pub struct DecorationImages {
    /// 聚光灯
    pub spotlight: Option<Pixmap>,
    /// 指示箭头
    pub arrow: Option<Pixmap>,
    /// 活动指示器
    pub active: Option<Pixmap>,
}

impl DecorationImages {
    /// 按配置加载全部装饰图片
    pub fn load(config: &EffectsConfig) -> Self {
        Self {
            spotlight: load_optional(config.spotlight_image.as_deref(), "spotlight"),
            arrow: load_optional(config.arrow.image.as_deref(), "arrow"),
            active: load_optional(config.active.image.as_deref(), "active"),
        }
    }
}

fn load_optional(path: Option<&Path>, kind: &str) -> Option<Pixmap> {
    let path = path?;
    match load_pixmap(path, kind) {
        Ok(pixmap) => Some(pixmap),
        Err(e) => {
            warn!(kind, error = %e, "装饰图片加载失败，使用矢量绘制");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premultiply_round_trip() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        rgba.put_pixel(1, 0, image::Rgba([200, 100, 0, 128]));

        let pixmap = pixmap_from_rgba(&rgba).unwrap();
        let p = pixmap.pixels()[1];
        assert_eq!(p.alpha(), 128);
        assert!(p.red() <= 128);

        let back = pixmap_to_rgba(&pixmap);
        assert_eq!(back.get_pixel(0, 0).0, [255, 0, 0, 255]);
        let [r, g, _, a] = back.get_pixel(1, 0).0;
        assert_eq!(a, 128);
        assert!(r.abs_diff(200) <= 2);
        assert!(g.abs_diff(100) <= 2);
    }

    #[test]
    fn test_zero_size_image_rejected() {
        let rgba = RgbaImage::new(0, 0);
        assert!(matches!(
            pixmap_from_rgba(&rgba),
            Err(ResourceError::PixmapAllocation { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_pixmap("/definitely/not/here.png", "icon");
        assert!(matches!(result, Err(ResourceError::NotFound { .. })));
    }

    #[test]
    fn test_save_and_reload_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut pixmap = Pixmap::new(4, 4).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(0, 128, 255, 255));
        save_png(&pixmap, &path).unwrap();

        let loaded = load_pixmap(&path, "icon").unwrap();
        assert_eq!(loaded.width(), 4);
        assert_eq!(loaded.pixels()[5].blue(), 255);
    }

    #[test]
    fn test_missing_decorations_fall_back() {
        let config = EffectsConfig {
            spotlight_image: Some("/nope/spotlight.png".into()),
            ..Default::default()
        };
        let images = DecorationImages::load(&config);
        assert!(images.spotlight.is_none());
        assert!(images.arrow.is_none());
    }
}
