//! # Event 模块
//!
//! 引擎向宿主发出的通知。

use crate::effect::EffectKind;

/// 效果事件
///
/// 只有在请求时设置了对应标记才会发出，且每个请求至多发出一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectEvent {
    /// 动画开始（`animation-start`）
    AnimationStarted(EffectKind),
    /// 动画结束（`animation-end`）
    AnimationEnded(EffectKind),
}

impl EffectEvent {
    /// 事件关联的效果类型
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectEvent::AnimationStarted(kind) | EffectEvent::AnimationEnded(kind) => *kind,
        }
    }
}
