//! # FX Host
//!
//! Dock 图标动画效果的宿主层：配置、资源、渲染管线与叠加层。
//!
//! ## 架构概述
//!
//! ```text
//! EffectsConfig ──► IconEffects ──► EffectEngine (fx-runtime)
//!                       │                 │ AnimationState
//!                       ▼                 ▼
//!                  begin_paint ──► pre-ops ──► 图标 + 叠加层 ──► post-ops ──► end_paint
//! ```
//!
//! 软件渲染使用 tiny-skia，图片编解码使用 image crate。
//!
//! ## 模块结构
//!
//! - [`config`]：效果配置（JSON）
//! - [`resources`]：图片加载与格式转换
//! - [`render`]：pre-ops / post-ops / 像素滤镜
//! - [`overlay`]：叠加层
//! - [`icon`]：单个图标的效果门面
//! - [`error`]：错误类型定义

pub mod config;
pub mod error;
pub mod icon;
pub mod overlay;
pub mod render;
pub mod resources;

pub use config::{ActiveConfig, ArrowConfig, ArrowStyle, ConfigError, EffectsConfig};
pub use error::{HostError, HostResult};
pub use icon::{IconEffects, PaintContext};
pub use overlay::{Gravity, ImageOverlay, Overlay, OverlayArea, ProgressOverlay};
pub use render::{Decorations, PostOp, RenderError};
pub use resources::{DecorationImages, ResourceError};
