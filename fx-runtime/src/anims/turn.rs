//! # Turn 动画
//!
//! 绕竖直轴翻转一整圈。宽度按四分之一周期收缩/展开，配合伪 3D 厚度和镜像。

use super::{EffectAnimation, FrameContext, FrameStep, eased_count, turn_quarter};
use crate::geometry::Region;
use crate::state::{AnimationState, Direction};

const PERIOD: i32 = 36;
const MAX_DEPTH: f32 = 10.0;
const MIN_WIDTH_MOD: f32 = 0.1;

/// 按加速后的计数推进一帧翻转，返回加速后的计数
fn turn_step(state: &mut AnimationState) -> i32 {
    let prev = state.count;
    let c = eased_count(state.count, PERIOD);

    let (width, reversed, flip) = turn_quarter(c, PERIOD);
    state.width_mod = width;
    state.depth_reversed = reversed;
    state.flip = flip;
    state.icon_depth = (MAX_DEPTH * (1.0 - state.width_mod)) as i32;

    state.count = prev + 1;
    state.width_mod = state.width_mod.clamp(MIN_WIDTH_MOD, 1.0);
    c
}

fn reset_turn(state: &mut AnimationState) {
    state.count = 0;
    state.top_offset = 0.0;
    state.icon_depth = 0;
    state.depth_reversed = false;
    state.direction = Direction::None;
    state.width_mod = 1.0;
    state.flip = false;
}

/// 悬停 / 启动中 / 请求注意：原地翻转一圈
#[derive(Debug, Default)]
pub struct Turn;

impl EffectAnimation for Turn {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        reset_turn(cx.state);
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;
        turn_step(state);

        if state.count >= PERIOD {
            reset_turn(state);
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 打开：前半圈自下而上展开，后半圈弹起再落下
#[derive(Debug, Default)]
pub struct TurnOpening;

impl EffectAnimation for TurnOpening {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let icon_width = cx.geometry().icon_width;
        let state = &mut *cx.state;
        reset_turn(state);
        state.clip = Some(Region::new(0, 0, icon_width, 0));
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let geo = *cx.geometry();
        cx.redraw();
        let state = &mut *cx.state;
        let max_offset = (geo.icon_height / 2) as f32;
        let quarter = PERIOD / 4;

        let c = turn_step(state);
        if c < PERIOD / 2 {
            let height = c * geo.icon_height / (PERIOD / 2);
            state.clip = Some(Region::new(0, 0, geo.icon_width, height));
        } else if c < PERIOD * 3 / 4 {
            state.clip = None;
            state.top_offset = (c - PERIOD / 2) as f32 * max_offset / quarter as f32;
        } else {
            state.clip = None;
            state.top_offset = max_offset - (c - PERIOD * 3 / 4) as f32 * max_offset / quarter as f32;
        }

        if state.count >= PERIOD {
            reset_turn(state);
            state.clip = None;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 关闭：翻转的同时上浮淡出
#[derive(Debug, Default)]
pub struct TurnClosing;

impl EffectAnimation for TurnClosing {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        reset_turn(state);
        state.width_mod = 0.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let icon_height = cx.geometry().icon_height;
        cx.redraw();
        let state = &mut *cx.state;

        let c = turn_step(state);
        state.top_offset = (c * icon_height / PERIOD) as f32;
        state.alpha = 1.0 - c as f32 / PERIOD as f32;

        if state.count >= PERIOD {
            reset_turn(state);
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
    fn test_turn_full_cycle() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut Turn, &mut state, true, 100);
        assert_eq!((frames, step), (PERIOD as usize, FrameStep::LoopEnd));
        assert_eq!(state.width_mod, 1.0);
        assert!(!state.flip);
        assert_eq!(state.icon_depth, 0);
    }

    #[test]
    fn test_turn_width_never_below_minimum() {
        let mut state = AnimationState::default();
        let mut anim = Turn;
        let mut cx = FrameContext::new(&mut state, geometry(), true);
        anim.init(&mut cx);
        for _ in 0..PERIOD - 1 {
            let mut cx = FrameContext::new(&mut state, geometry(), true);
            anim.frame(&mut cx);
            assert!(state.width_mod >= MIN_WIDTH_MOD);
            assert!(state.icon_depth <= MAX_DEPTH as i32);
        }
    }

    #[test]
    fn test_turn_opening_reveals_from_clip() {
        let mut state = AnimationState::default();
        let mut anim = TurnOpening;
        let mut cx = FrameContext::new(&mut state, geometry(), true);
        anim.init(&mut cx);
        assert_eq!(cx.state.clip, Some(Region::new(0, 0, 48, 0)));
        anim.frame(&mut cx);
        assert!(cx.state.clip.is_some());

        let (frames, step) = drive(&mut TurnOpening, &mut state, true, 100);
        assert_eq!((frames, step), (PERIOD as usize, FrameStep::LoopEnd));
        assert_eq!(state.clip, None);
        assert_eq!(state.top_offset, 0.0);
    }

    #[test]
    fn test_turn_closing_fades() {
        let mut state = AnimationState::default();
        let mut anim = TurnClosing;
        let mut cx = FrameContext::new(&mut state, geometry(), true);
        anim.init(&mut cx);
        for _ in 0..20 {
            anim.frame(&mut cx);
        }
        assert!(cx.state.alpha < 1.0);
        assert!(cx.state.top_offset > 0.0);

        let (_, step) = drive(&mut TurnClosing, &mut state, true, 100);
        assert_eq!(step, FrameStep::LoopEnd);
        assert_eq!(state.alpha, 1.0);
    }
}
