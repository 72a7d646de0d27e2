//! # Zoom 动画
//!
//! 缩放类动画。悬停缩放的最大倍数取决于窗口沿 dock 方向能容纳的大小。

use super::{EffectAnimation, FrameContext, FrameStep};
use crate::state::{AnimationState, Direction};

fn reset_mods(state: &mut AnimationState) {
    state.width_mod = 1.0;
    state.height_mod = 1.0;
}

/// 悬停：放大到最大并保持，被抢占后缩回
#[derive(Debug, Default)]
pub struct Zoom;

impl Zoom {
    const INCREMENT: f32 = 1.0 / 8.0;
}

impl EffectAnimation for Zoom {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        state.count = 0;
        reset_mods(state);
        state.top_offset = 0.0;
        state.direction = Direction::Up;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let max = cx.geometry().max_zoom();
        let is_head = cx.is_queue_head();
        cx.redraw();
        let state = &mut *cx.state;

        match state.direction {
            Direction::Up => {
                if state.width_mod + Self::INCREMENT < max {
                    state.width_mod += Self::INCREMENT;
                    state.height_mod += Self::INCREMENT;
                }
                if is_head {
                    if state.width_mod + Self::INCREMENT < max {
                        return FrameStep::Continue;
                    }
                    return FrameStep::Suspend;
                }
                state.direction = Direction::Down;
            }
            Direction::Down => {
                state.width_mod -= Self::INCREMENT;
                state.height_mod -= Self::INCREMENT;
                if state.width_mod <= 1.0 {
                    state.direction = Direction::Up;
                    reset_mods(state);
                }
            }
            _ => state.direction = Direction::Up,
        }

        if state.direction == Direction::Up && state.width_mod <= 1.0 && state.height_mod <= 1.0 {
            reset_mods(state);
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 请求注意：放大并上移，到达最大后缩回
#[derive(Debug, Default)]
pub struct ZoomAttention;

impl ZoomAttention {
    const INCREMENT: f32 = 1.0 / 12.0;
}

impl EffectAnimation for ZoomAttention {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        state.count = 0;
        reset_mods(state);
        state.top_offset = 0.0;
        state.direction = Direction::Up;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let max = cx.geometry().max_zoom();
        cx.redraw();
        let state = &mut *cx.state;

        match state.direction {
            Direction::Up => {
                if state.width_mod + Self::INCREMENT < max {
                    state.width_mod += Self::INCREMENT;
                    state.height_mod += Self::INCREMENT;
                    state.top_offset += 1.0;
                } else {
                    state.direction = Direction::Down;
                }
            }
            Direction::Down => {
                state.width_mod -= Self::INCREMENT;
                state.height_mod -= Self::INCREMENT;
                state.top_offset -= 1.0;
                if state.width_mod <= 1.0 {
                    state.direction = Direction::Up;
                    reset_mods(state);
                    state.top_offset = 0.0;
                }
            }
            _ => state.direction = Direction::Up,
        }

        if state.direction == Direction::Up && state.width_mod <= 1.0 && state.height_mod <= 1.0 {
            reset_mods(state);
            state.top_offset = 0.0;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

const OPEN_CLOSE_PERIOD: f32 = 20.0;

/// 打开：从 0 放大并淡入
#[derive(Debug, Default)]
pub struct ZoomOpening;

impl EffectAnimation for ZoomOpening {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        state.count = 0;
        state.width_mod = 0.0;
        state.height_mod = 0.0;
        state.alpha = 0.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;
        state.width_mod += 1.0 / OPEN_CLOSE_PERIOD;
        state.height_mod += 1.0 / OPEN_CLOSE_PERIOD;
        state.alpha += 1.0 / OPEN_CLOSE_PERIOD;

        if state.width_mod >= 1.0 {
            state.alpha = 1.0;
            reset_mods(state);
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 关闭：缩小到 0 并淡出
#[derive(Debug, Default)]
pub struct ZoomClosing;

impl EffectAnimation for ZoomClosing {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        state.count = 0;
        reset_mods(state);
        state.alpha = 1.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;
        state.width_mod -= 1.0 / OPEN_CLOSE_PERIOD;
        state.height_mod -= 1.0 / OPEN_CLOSE_PERIOD;
        state.alpha -= 1.0 / OPEN_CLOSE_PERIOD;

        if state.alpha <= 0.0 {
            state.count = 0;
            reset_mods(state);
            state.alpha = 1.0;
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

    #[test]
    fn test_zoom_suspends_at_max() {
        // 96 / 48 = 2 倍上限
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut Zoom, &mut state, true, 100);
        assert_eq!(step, FrameStep::Suspend);
        assert_eq!(frames, 7);
        assert!(state.width_mod < 2.0);
        assert!(state.width_mod > 1.8);
    }

    #[test]
    fn test_zoom_shrinks_after_preemption() {
        let mut state = AnimationState {
            width_mod: 1.5,
            height_mod: 1.5,
            direction: Direction::Up,
            ..Default::default()
        };
        let mut anim = Zoom;
        let mut steps = Vec::new();
        for _ in 0..20 {
            let mut cx = FrameContext::new(&mut state, geometry(), false);
            let step = anim.frame(&mut cx);
            steps.push(step);
            if step == FrameStep::LoopEnd {
                break;
            }
        }
        assert_eq!(steps.last(), Some(&FrameStep::LoopEnd));
        assert_eq!(state.width_mod, 1.0);
    }

    #[test]
    fn test_zoom_attention_returns_to_neutral() {
        let mut state = AnimationState::default();
        let (_, step) = drive(&mut ZoomAttention, &mut state, true, 200);
        assert_eq!(step, FrameStep::LoopEnd);
        assert_eq!(state.width_mod, 1.0);
        assert_eq!(state.top_offset, 0.0);
    }

    #[test]
    fn test_zoom_opening_and_closing() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut ZoomOpening, &mut state, true, 100);
        assert_eq!(step, FrameStep::LoopEnd);
        assert!((19..=21).contains(&frames));
        assert_eq!(state.alpha, 1.0);

        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut ZoomClosing, &mut state, true, 100);
        assert_eq!(step, FrameStep::LoopEnd);
        assert!((19..=21).contains(&frames));
        assert_eq!(state.alpha, 1.0);
        assert_eq!(state.width_mod, 1.0);
    }
}
