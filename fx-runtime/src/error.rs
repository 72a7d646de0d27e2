//! # Error 模块
//!
//! 定义 fx-runtime 中使用的错误类型。
//!
//! 引擎的运行期操作（start/stop/tick）从不返回错误：无效请求是静默的 no-op。
//! 只有构造期的配置解析会失败。

use thiserror::Error;

use crate::effect::EffectKind;

/// 效果风格解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// 打包值中的某个半字节不对应任何风格
    #[error("效果 {kind:?} 的风格编号 {value} 无效")]
    UnknownStyle { kind: EffectKind, value: u32 },

    /// 未知的风格名称
    #[error("未知的效果风格名称 '{name}'")]
    UnknownStyleName { name: String },

    /// 未知的效果类型名称
    #[error("未知的效果类型 '{name}'")]
    UnknownKind { name: String },

    /// 未知的 dock 边缘名称
    #[error("未知的 dock 边缘 '{name}'")]
    UnknownEdge { name: String },
}

/// 引擎配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 风格配置错误
    #[error("风格配置错误: {0}")]
    Style(#[from] StyleError),

    /// 帧间隔为零
    #[error("帧间隔必须大于 0")]
    ZeroFrameInterval,
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
