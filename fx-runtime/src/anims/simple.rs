//! # Simple 动画
//!
//! 简约风格：悬停时常亮发光，请求注意时高亮矩形闪烁，打开/关闭时平滑淡入淡出。

use std::f64::consts::PI;
use std::time::Duration;

use super::{EffectAnimation, FrameContext, FrameStep};
use crate::state::AnimationState;

/// 悬停：保持发光直到被抢占
#[derive(Debug, Default)]
pub struct SimpleHover;

impl EffectAnimation for SimpleHover {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        cx.state.glow_amount = 1.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        if cx.is_queue_head() {
            return FrameStep::Suspend;
        }
        cx.state.glow_amount = 0.0;
        FrameStep::LoopEnd
    }
}

/// 请求注意：高亮矩形以 750ms 间隔闪烁
///
/// 每次切换都视为一轮结束，因此有限循环次数按闪烁次数计。
#[derive(Debug, Default)]
pub struct SimpleAttention {
    started: bool,
}

impl SimpleAttention {
    pub const BLINK_INTERVAL: Duration = Duration::from_millis(750);
}

impl EffectAnimation for SimpleAttention {
    fn init(&mut self, _cx: &mut FrameContext<'_>) {
        self.started = false;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        if !self.started {
            self.started = true;
            cx.state.simple_rect = true;
            return FrameStep::ContinueAfter(Self::BLINK_INTERVAL);
        }
        cx.state.simple_rect = !cx.state.simple_rect;
        FrameStep::LoopEnd
    }

    fn finish(&mut self, state: &mut AnimationState) {
        state.simple_rect = false;
    }
}

const FADE_PERIOD: i32 = 10;

/// 计算 sin/cos 平方淡变的当前值，并推进计数
fn fade_step(state: &mut AnimationState, f: fn(f64) -> f64) -> FrameStep {
    let t = state.count as f64 * PI / 2.0 / FADE_PERIOD as f64;
    state.count += 1;
    let v = f(t);
    state.alpha = (v * v) as f32;

    if state.count >= FADE_PERIOD {
        state.count = 0;
        state.alpha = 1.0;
        return FrameStep::LoopEnd;
    }
    FrameStep::Continue
}

/// 打开：alpha = sin²
#[derive(Debug, Default)]
pub struct SimpleOpening;

impl EffectAnimation for SimpleOpening {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        cx.state.count = 0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        fade_step(cx.state, f64::sin)
    }
}

/// 关闭：alpha = cos²
#[derive(Debug, Default)]
pub struct SimpleClosing;

impl EffectAnimation for SimpleClosing {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        cx.state.count = 0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        fade_step(cx.state, f64::cos)
    }
}
