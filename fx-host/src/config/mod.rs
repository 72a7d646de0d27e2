//! # Config 模块
//!
//! 宿主侧的效果配置，集中管理渲染管线与引擎需要的所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (effects.json)
//! 3. 默认值（最低）
//!
//! 每个图标实例持有自己的一份配置，不存在进程级全局状态。

use std::fs;
use std::path::{Path, PathBuf};

use fx_runtime::{EffectStyles, EngineConfig, StyleError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 指示箭头的绘制方式
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArrowStyle {
    /// 指向图标的三角形
    #[default]
    Triangle,
    /// 圆点
    Dot,
}

/// 指示箭头配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArrowConfig {
    #[serde(default)]
    pub style: ArrowStyle,

    /// RGBA 颜色
    #[serde(default = "default_arrow_color")]
    pub color: [u8; 4],

    /// 自定义图片，设置后优先于矢量绘制
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// 活动指示器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveConfig {
    /// RGBA 颜色
    #[serde(default = "default_active_color")]
    pub color: [u8; 4],

    /// 圆角半径（像素）
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f32,

    /// 自定义图片，设置后优先于圆角矩形
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// 效果配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectsConfig {
    /// 每种效果类型的风格
    #[serde(default)]
    pub styles: EffectStyles,

    /// 打包的旧式风格值（每种效果 4 位），设置后覆盖 `styles`
    #[serde(default)]
    pub icon_effect: Option<u32>,

    /// 帧间隔（毫秒）
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// 图标整体不透明度 (0.0 - 1.0)
    #[serde(default = "default_icon_alpha")]
    pub icon_alpha: f32,

    /// 倒影不透明度 (0.0 - 1.0)
    #[serde(default = "default_reflection_alpha")]
    pub reflection_alpha: f32,

    /// 倒影与图标之间的距离（像素）
    #[serde(default)]
    pub reflection_offset: i32,

    /// 图标距离 dock 边缘的偏移（像素）
    #[serde(default)]
    pub icon_offset: i32,

    #[serde(default)]
    pub show_shadows: bool,

    #[serde(default)]
    pub show_reflection: bool,

    /// 是否绘制伪 3D 厚度
    #[serde(default = "default_icon_depth_on")]
    pub icon_depth_on: bool,

    /// 边缘裁剪宽度（像素）
    #[serde(default)]
    pub border_clip: i32,

    #[serde(default)]
    pub arrow: ArrowConfig,

    #[serde(default)]
    pub active: ActiveConfig,

    /// 聚光灯图片；缺失时使用径向渐变
    #[serde(default)]
    pub spotlight_image: Option<PathBuf>,
}

// 默认值函数
fn default_frame_interval_ms() -> u64 {
    40
}

fn default_icon_alpha() -> f32 {
    1.0
}

fn default_reflection_alpha() -> f32 {
    0.33
}

fn default_icon_depth_on() -> bool {
    true
}

fn default_arrow_color() -> [u8; 4] {
    [255, 255, 255, 200]
}

fn default_active_color() -> [u8; 4] {
    [255, 255, 255, 64]
}

fn default_corner_radius() -> f32 {
    6.0
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            style: ArrowStyle::default(),
            color: default_arrow_color(),
            image: None,
        }
    }
}

impl Default for ActiveConfig {
    fn default() -> Self {
        Self {
            color: default_active_color(),
            corner_radius: default_corner_radius(),
            image: None,
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            styles: EffectStyles::default(),
            icon_effect: None,
            frame_interval_ms: default_frame_interval_ms(),
            icon_alpha: default_icon_alpha(),
            reflection_alpha: default_reflection_alpha(),
            reflection_offset: 0,
            icon_offset: 0,
            show_shadows: false,
            show_reflection: false,
            icon_depth_on: default_icon_depth_on(),
            border_clip: 0,
            arrow: ArrowConfig::default(),
            active: ActiveConfig::default(),
            spotlight_image: None,
        }
    }
}

impl EffectsConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = ?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::load_strict(path) {
            Ok(config) => {
                info!(path = ?path, "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 严格加载：读取、解析或验证失败都返回错误
    pub fn load_strict(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 实际生效的风格：`icon_effect` 存在时优先
    pub fn effective_styles(&self) -> Result<EffectStyles, ConfigError> {
        match self.icon_effect {
            Some(packed) => Ok(EffectStyles::from_packed(packed)?),
            None => Ok(self.styles),
        }
    }

    /// 引擎需要的那部分配置
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        Ok(EngineConfig {
            styles: self.effective_styles()?,
            frame_interval_ms: self.frame_interval_ms,
        })
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "帧间隔必须大于 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.icon_alpha) {
            return Err(ConfigError::ValidationFailed(
                "图标不透明度必须在 0.0 - 1.0 之间".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.reflection_alpha) {
            return Err(ConfigError::ValidationFailed(
                "倒影不透明度必须在 0.0 - 1.0 之间".to_string(),
            ));
        }

        if self.border_clip < 0 {
            return Err(ConfigError::ValidationFailed(
                "边缘裁剪宽度不能为负".to_string(),
            ));
        }

        if self.active.corner_radius < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "圆角半径不能为负".to_string(),
            ));
        }

        // 打包值中的每个半字节都必须对应一种风格
        self.effective_styles()?;

        Ok(())
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
    /// 风格值无效
    #[error("配置中的风格无效: {0}")]
    Style(#[from] StyleError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_runtime::EffectStyle;

    #[test]
    fn test_default_config() {
        let config = EffectsConfig::default();
        assert_eq!(config.frame_interval_ms, 40);
        assert_eq!(config.icon_alpha, 1.0);
        assert!(config.icon_depth_on);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = EffectsConfig {
            show_reflection: true,
            icon_offset: 6,
            ..Default::default()
        };
        let json = serde_json::to_string_pretty(&config).unwrap();

        // 反序列化
        let loaded: EffectsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config: EffectsConfig =
            serde_json::from_str(r#"{"styles": {"hover": "glow"}, "arrow": {"style": "dot"}}"#)
                .unwrap();
        assert_eq!(config.styles.hover, EffectStyle::Glow);
        assert_eq!(config.arrow.style, ArrowStyle::Dot);
        assert_eq!(config.arrow.color, [255, 255, 255, 200]);
        assert_eq!(config.reflection_alpha, 0.33);
    }

    #[test]
    fn test_config_validation() {
        let mut config = EffectsConfig::default();

        // 无效不透明度
        config.icon_alpha = 1.5;
        assert!(config.validate().is_err());

        // 恢复有效值
        config.icon_alpha = 0.8;
        assert!(config.validate().is_ok());

        config.frame_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_packed_styles_override() {
        let config = EffectsConfig {
            icon_effect: Some(0x0000_0017),
            ..Default::default()
        };
        let engine = config.engine_config().unwrap();
        assert_eq!(engine.styles.hover, EffectStyle::Glow);
        assert_eq!(engine.styles.opening, EffectStyle::Fade);

        let bad = EffectsConfig {
            icon_effect: Some(0x0000_000A),
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(ConfigError::Style(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("effects.json");

        let config = EffectsConfig {
            show_shadows: true,
            border_clip: 2,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = EffectsConfig::load_strict(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();

        let missing = EffectsConfig::load(dir.path().join("missing.json"));
        assert_eq!(missing, EffectsConfig::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(EffectsConfig::load(&broken), EffectsConfig::default());
        assert!(matches!(
            EffectsConfig::load_strict(&broken),
            Err(ConfigError::SerializationFailed(_))
        ));
    }
}
