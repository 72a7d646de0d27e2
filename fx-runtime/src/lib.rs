//! # FX Runtime
//!
//! Dock 图标动画效果的核心运行时库。
//!
//! ## 架构概述
//!
//! `fx-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染。
//! 每个图标实例持有一个 [`EffectEngine`]，宿主通过 [`IconWidget`] 接口被动接收重绘请求：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── start / start_ex / stop ────►│  入队、调度
//!   │──── update(dt) / tick() ────────►│  推进当前运行的一帧
//!   │◄─── request_repaint(region) ─────│
//!   │──── state() ────────────────────►│  渲染管线读取动画状态
//!   │◄─── take_events() ───────────────│  start / end 通知
//! ```
//!
//! ## 核心类型
//!
//! - [`EffectKind`] / [`EffectStyle`]：效果类型与风格
//! - [`EffectQueue`]：按优先级排序的请求队列
//! - [`EffectEngine`]：帧调度、抢占、挂起/恢复与完成判定
//! - [`AnimationState`]：动画状态机写入、渲染管线读取的状态
//! - [`AnimationTable`]：（效果类型 × 风格）到状态机的分派表
//!
//! ## 使用示例
//!
//! ```ignore
//! let widget: Rc<dyn IconWidget> = Rc::new(MyWidget::new());
//! let mut engine = EffectEngine::new(Rc::downgrade(&widget), &EngineConfig::default())?;
//! engine.set_icon_size(48, 48, false);
//! engine.start(EffectKind::Opening);
//!
//! loop {
//!     engine.update(frame_dt);
//!     for event in engine.take_events() {
//!         host.notify(event);
//!     }
//!     // 渲染时读取 engine.state()
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`effect`]：效果类型、风格、请求
//! - [`queue`]：效果队列
//! - [`scheduler`]：效果引擎
//! - [`state`]：动画状态
//! - [`anims`]：动画状态机与分派表
//! - [`geometry`]：dock 边缘与尺寸
//! - [`widget`]：宿主控件接口
//! - [`event`]：通知事件
//! - [`config`]：引擎配置
//! - [`error`]：错误类型定义

pub mod anims;
pub mod config;
pub mod effect;
pub mod error;
pub mod event;
pub mod geometry;
pub mod queue;
pub mod scheduler;
pub mod state;
pub mod widget;

// 重导出核心类型
pub use anims::{AnimationTable, AnimationVariant, EffectAnimation, FrameContext, FrameStep};
pub use config::EngineConfig;
pub use effect::{EffectKind, EffectRequest, EffectStyle, EffectStyles};
pub use error::{EngineError, EngineResult, StyleError};
pub use event::EffectEvent;
pub use geometry::{DockEdge, IconGeometry, Region};
pub use queue::EffectQueue;
pub use scheduler::{DEFAULT_FRAME_INTERVAL, EffectEngine, RunPhase};
pub use state::{AnimationState, Direction};
pub use widget::IconWidget;
