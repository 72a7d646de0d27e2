//! # Glow 动画
//!
//! 发光类动画：通过 `glow_amount` 提亮整个图标。

use super::{EffectAnimation, FrameContext, FrameStep};
use crate::state::Direction;

/// 悬停：作为队首时保持全亮，被抢占后逐帧熄灭
#[derive(Debug, Default)]
pub struct Glow;

impl Glow {
    const GLOW_STEP: f32 = 0.08;
}

impl EffectAnimation for Glow {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        cx.state.glow_amount = 1.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        if cx.is_queue_head() {
            cx.state.glow_amount = 1.0;
            return FrameStep::Suspend;
        }

        cx.state.glow_amount -= Self::GLOW_STEP;
        if cx.state.glow_amount <= 0.0 {
            cx.state.glow_amount = 0.0;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 打开：先淡入，再从过曝的发光中冷却
#[derive(Debug, Default)]
pub struct GlowOpening;

impl GlowOpening {
    const ALPHA_STEP: f32 = 0.04;
    const GLOW_STEP: f32 = 0.05;
    const INITIAL_GLOW: f32 = 1.95;
}

impl EffectAnimation for GlowOpening {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        state.direction = Direction::Up;
        state.alpha = 0.0;
        state.glow_amount = Self::INITIAL_GLOW;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;

        match state.direction {
            Direction::Up => {
                state.alpha += Self::ALPHA_STEP;
                if state.alpha > 1.0 {
                    state.alpha = 1.0;
                    state.direction = Direction::Down;
                }
            }
            Direction::Down => {
                state.glow_amount -= Self::GLOW_STEP;
                if state.glow_amount < 0.0 {
                    state.glow_amount = 0.0;
                    state.direction = Direction::None;
                }
            }
            _ => state.direction = Direction::Down,
        }

        if state.direction == Direction::None {
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 关闭：边淡出边变亮
#[derive(Debug, Default)]
pub struct GlowClosing;

impl GlowClosing {
    const ALPHA_STEP: f32 = 0.03;
    const GLOW_STEP: f32 = 0.085;
}

impl EffectAnimation for GlowClosing {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        cx.state.direction = Direction::Down;
        cx.state.glow_amount = 0.8;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;

        if state.direction == Direction::Down {
            state.alpha -= Self::ALPHA_STEP;
            state.glow_amount += Self::GLOW_STEP;
            if state.alpha < 0.0 {
                state.alpha = 0.0;
                state.direction = Direction::None;
            }
        } else {
            state.direction = Direction::Down;
        }

        if state.direction == Direction::None {
            state.alpha = 1.0;
            state.glow_amount = 0.0;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 请求注意：发光强度在 0 与 1.5 之间往返
#[derive(Debug, Default)]
pub struct GlowAttention;

impl GlowAttention {
    const PERIOD: i32 = 20;
    const MAX_GLOW: f32 = 1.5;
}

impl EffectAnimation for GlowAttention {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        state.count = 0;
        state.direction = Direction::Up;
        state.glow_amount = 0.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;
        let step = Self::MAX_GLOW / Self::PERIOD as f32;

        if state.direction == Direction::Up {
            state.glow_amount += step;
        } else {
            state.glow_amount -= step;
        }

        if state.glow_amount >= Self::MAX_GLOW {
            state.direction = Direction::Down;
        } else if state.glow_amount <= 0.0 {
            state.direction = Direction::Up;
        }

        if state.glow_amount <= 0.0 {
            state.count = 0;
            state.glow_amount = 0.0;
            state.direction = Direction::Up;
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
    fn test_glow_hover_holds_while_head() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut Glow, &mut state, true, 10);
        assert_eq!((frames, step), (1, FrameStep::Suspend));
        assert_eq!(state.glow_amount, 1.0);
    }

    #[test]
    fn test_glow_hover_fades_when_preempted() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut Glow, &mut state, false, 100);
        assert_eq!(step, FrameStep::LoopEnd);
        assert_eq!(state.glow_amount, 0.0);
        // 1.0 / 0.08 ≈ 12.5
        assert!((12..=13).contains(&frames));
    }

    #[test]
    fn test_glow_opening() {
        let mut state = AnimationState::default();
        let (_, step) = drive(&mut GlowOpening, &mut state, true, 200);
        assert_eq!(step, FrameStep::LoopEnd);
        assert_eq!(state.alpha, 1.0);
        assert_eq!(state.glow_amount, 0.0);
    }

    #[test]
    fn test_glow_closing_restores_alpha() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut GlowClosing, &mut state, true, 200);
        assert_eq!(step, FrameStep::LoopEnd);
        assert!((33..=35).contains(&frames));
        assert_eq!(state.alpha, 1.0);
        assert_eq!(state.glow_amount, 0.0);
    }

    #[test]
    fn test_glow_attention_round_trip() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut GlowAttention, &mut state, true, 200);
        assert_eq!(step, FrameStep::LoopEnd);
        assert!((39..=42).contains(&frames), "frames = {}", frames);
        assert_eq!(state.direction, Direction::Up);
    }
}
