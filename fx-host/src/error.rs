//! # Error 模块
//!
//! fx-host 的顶层错误类型，汇总各子模块的错误。

use thiserror::Error;

use fx_runtime::EngineError;

use crate::config::ConfigError;
use crate::render::RenderError;
use crate::resources::ResourceError;

/// 宿主错误
#[derive(Error, Debug)]
pub enum HostError {
    /// 配置错误
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 资源错误
    #[error(transparent)]
    Resource(#[from] ResourceError),

    /// 引擎配置错误
    #[error("引擎配置错误: {0}")]
    Engine(#[from] EngineError),

    /// 渲染错误
    #[error(transparent)]
    Render(#[from] RenderError),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 类型别名
pub type HostResult<T> = Result<T, HostError>;
