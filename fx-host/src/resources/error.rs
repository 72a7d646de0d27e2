//! # Resource Error 模块
//!
//! 定义图片资源相关的错误类型。

use thiserror::Error;

/// 资源错误
#[derive(Error, Debug)]
pub enum ResourceError {
    /// 资源加载失败
    #[error("加载 {kind} 资源失败: {path} - {message}")]
    LoadFailed {
        /// 资源路径
        path: String,
        /// 资源类型（icon, spotlight 等）
        kind: String,
        /// 错误消息
        message: String,
    },

    /// 资源未找到
    #[error("资源未找到: {path}")]
    NotFound {
        /// 资源路径
        path: String,
    },

    /// 无效的资源格式
    #[error("无效的资源格式: {path} - {message}")]
    InvalidFormat {
        /// 资源路径
        path: String,
        /// 错误消息
        message: String,
    },

    /// 无法分配位图（尺寸为零或过大）
    #[error("无法分配 {width}x{height} 的位图")]
    PixmapAllocation { width: u32, height: u32 },

    /// 写出图片失败
    #[error("保存图片失败: {path} - {message}")]
    SaveFailed { path: String, message: String },
}
