//! # Fade 动画
//!
//! 透明度类动画：关闭时上浮淡出，悬停时呼吸式明暗。

use super::{EffectAnimation, FrameContext, FrameStep};
use crate::state::Direction;

/// 关闭：上浮并淡出
#[derive(Debug, Default)]
pub struct FadeOut;

impl FadeOut {
    const PERIOD: i32 = 20;
    const MAX_OFFSET: f32 = 50.0;
}

impl EffectAnimation for FadeOut {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        cx.state.count = 0;
        cx.state.alpha = 1.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let state = &mut *cx.state;
        state.count += 1;
        state.top_offset = state.count as f32 * (Self::MAX_OFFSET / Self::PERIOD as f32);
        state.alpha = 1.0 - state.count as f32 / Self::PERIOD as f32;
        let done = state.count >= Self::PERIOD;
        if done {
            state.count = 0;
        }
        cx.redraw();

        if done { FrameStep::LoopEnd } else { FrameStep::Continue }
    }
}

/// 呼吸式明暗
///
/// 透明度每帧降低 0.05 直到 0.35，再以 1.5 倍速度回升到 1。
#[derive(Debug, Default)]
pub struct Fading;

impl Fading {
    const MIN_ALPHA: f32 = 0.35;
    const ALPHA_STEP: f32 = 0.05;
}

impl EffectAnimation for Fading {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        cx.state.alpha = 1.0;
        cx.state.direction = Direction::Down;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;

        if state.direction == Direction::Down {
            state.alpha -= Self::ALPHA_STEP;
            if state.alpha <= Self::MIN_ALPHA {
                state.direction = Direction::Up;
            }
            return FrameStep::Continue;
        }

        state.alpha += Self::ALPHA_STEP * 1.5;
        if state.alpha >= 1.0 {
            state.alpha = 1.0;
            state.direction = Direction::Down;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::drive;
    use super::*;
    use crate::state::AnimationState;

    #[test]
    fn test_fade_out() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut FadeOut, &mut state, true, 100);
        assert_eq!(frames, 20);
        assert_eq!(step, FrameStep::LoopEnd);
        assert!(state.alpha.abs() < 1e-6);
        assert!((state.top_offset - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_fading_cycle() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut Fading, &mut state, true, 100);
        assert_eq!(step, FrameStep::LoopEnd);
        assert_eq!(state.alpha, 1.0);
        assert_eq!(state.direction, Direction::Down);
        // 下降约 13 帧，回升约 9 帧
        assert!((20..=24).contains(&frames), "frames = {}", frames);
    }
}
