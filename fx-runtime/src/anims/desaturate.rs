//! # Desaturate 动画
//!
//! 逐帧降低饱和度到灰度并保持；失去队首后逐帧恢复原色。

use super::{EffectAnimation, FrameContext, FrameStep};
use crate::state::Direction;

/// 去饱和
#[derive(Debug, Default)]
pub struct Desaturate;

impl Desaturate {
    const STEP: f32 = 0.04;
}

impl EffectAnimation for Desaturate {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        cx.state.direction = Direction::Down;
        cx.state.saturation = 1.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let is_head = cx.is_queue_head();
        let state = &mut *cx.state;

        match state.direction {
            Direction::Down => {
                state.saturation = (state.saturation - Self::STEP).max(0.0);
                if is_head {
                    cx.redraw();
                    return if cx.state.saturation > 0.0 {
                        FrameStep::Continue
                    } else {
                        FrameStep::Suspend
                    };
                }
                state.direction = Direction::Up;
            }
            _ => state.saturation += Self::STEP,
        }
        cx.redraw();

        let state = &mut *cx.state;
        if state.saturation >= 1.0 {
            state.saturation = 1.0;
            state.direction = Direction::Down;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::super::FrameContext;
    use super::super::test_support::{drive, geometry};
    use super::*;
    use crate::state::AnimationState;

    #[test]
    fn test_desaturate_suspends_at_grey() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut Desaturate, &mut state, true, 100);
        assert_eq!(step, FrameStep::Suspend);
        assert_eq!(state.saturation, 0.0);
        // 1.0 / 0.04 = 25
        assert!((25..=26).contains(&frames));
    }

    #[test]
    fn test_desaturate_recovers_after_preemption() {
        let mut state = AnimationState::default();
        let mut anim = Desaturate;
        let mut cx = FrameContext::new(&mut state, geometry(), true);
        anim.init(&mut cx);
        for _ in 0..10 {
            anim.frame(&mut cx);
        }
        assert!(cx.state.saturation < 0.7);

        let mut last = FrameStep::Continue;
        for _ in 0..40 {
            let mut cx = FrameContext::new(&mut state, geometry(), false);
            last = anim.frame(&mut cx);
            if last == FrameStep::LoopEnd {
                break;
            }
        }
        assert_eq!(last, FrameStep::LoopEnd);
        assert_eq!(state.saturation, 1.0);
        assert_eq!(state.direction, Direction::Down);
    }
}
