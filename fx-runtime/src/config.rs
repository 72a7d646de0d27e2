//! # Config 模块
//!
//! 引擎自身需要的配置：每种效果类型的风格与帧间隔。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::effect::EffectStyles;
use crate::error::{EngineError, EngineResult};

fn default_frame_interval_ms() -> u64 {
    40
}

/// 引擎配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 每种效果类型的风格
    #[serde(default)]
    pub styles: EffectStyles,
    /// 帧间隔（毫秒）
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            styles: EffectStyles::default(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl EngineConfig {
    /// 从打包的风格值创建
    pub fn from_packed(packed: u32) -> EngineResult<Self> {
        Ok(Self {
            styles: EffectStyles::from_packed(packed)?,
            ..Self::default()
        })
    }

    /// 帧间隔
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// 验证配置
    pub fn validate(&self) -> EngineResult<()> {
        if self.frame_interval_ms == 0 {
            return Err(EngineError::ZeroFrameInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectStyle;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.frame_interval(), Duration::from_millis(40));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = EngineConfig {
            frame_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(EngineError::ZeroFrameInterval));
    }

    #[test]
    fn test_from_packed() {
        let config = EngineConfig::from_packed(0x0000_0007).unwrap();
        assert_eq!(config.styles.hover, EffectStyle::Glow);
        assert_eq!(config.styles.opening, EffectStyle::Classic);

        assert!(matches!(
            EngineConfig::from_packed(0x0000_0009),
            Err(EngineError::Style(_))
        ));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"styles": {"hover": "zoom"}}"#).unwrap();
        assert_eq!(config.styles.hover, EffectStyle::Zoom);
        assert_eq!(config.styles.closing, EffectStyle::Classic);
        assert_eq!(config.frame_interval_ms, 40);
    }
}
