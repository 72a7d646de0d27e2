//! # Squish 动画
//!
//! 挤压弹跳：落地时横向压扁、纵向压缩，再弹回原形。

use std::f32::consts::PI;

use super::{EffectAnimation, FrameContext, FrameStep};
use crate::state::{AnimationState, Direction};

const MAX_BOUNCE_OFFSET: f32 = 15.0;
/// 挤压阶段的周期
const SQUISH_PERIOD: i32 = 28;
/// 挤压到的最小高度修饰
const SQUISH_LIMIT: f32 = 0.75;

fn squish_step() -> f32 {
    3.0 / SQUISH_PERIOD as f32
}

/// 推进挤压阶段；返回是否处于挤压阶段
///
/// `SquishDown` → `SquishUp` → `None`（弹跳），`SquishDown2` → `SquishUp2` 为第二次挤压。
fn advance_squish(state: &mut AnimationState) -> bool {
    match state.direction {
        Direction::SquishDown | Direction::SquishDown2 => {
            state.width_mod += squish_step();
            state.height_mod -= squish_step();
            if state.height_mod <= SQUISH_LIMIT {
                state.direction = if state.direction == Direction::SquishDown {
                    Direction::SquishUp
                } else {
                    Direction::SquishUp2
                };
            }
            true
        }
        Direction::SquishUp | Direction::SquishUp2 => {
            state.width_mod -= squish_step();
            state.height_mod += squish_step();
            if state.height_mod >= 1.0 && state.direction == Direction::SquishUp {
                state.width_mod = 1.0;
                state.height_mod = 1.0;
                state.direction = Direction::None;
            }
            true
        }
        _ => false,
    }
}

/// 第二次挤压回弹完成时收尾
fn squish_cycle_done(state: &mut AnimationState) -> bool {
    if state.direction == Direction::SquishUp2 && state.height_mod >= 1.0 {
        state.direction = Direction::None;
        state.count = 0;
        state.width_mod = 1.0;
        state.height_mod = 1.0;
        return true;
    }
    false
}

fn init_cycle(state: &mut AnimationState) {
    state.count = 0;
    state.width_mod = 1.0;
    state.height_mod = 1.0;
    state.direction = Direction::SquishDown;
}

/// 悬停：挤压 → 弹跳 → 再挤压
#[derive(Debug, Default)]
pub struct Squish;

impl EffectAnimation for Squish {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        init_cycle(cx.state);
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;

        if !advance_squish(state) {
            if state.direction == Direction::None {
                state.count += 1;
                let t = state.count as f32 * PI * 2.0 / SQUISH_PERIOD as f32;
                state.top_offset = t.sin() * MAX_BOUNCE_OFFSET;
                if state.count >= SQUISH_PERIOD / 2 {
                    state.direction = Direction::SquishDown2;
                }
            } else {
                state.direction = Direction::SquishDown;
            }
        }

        if squish_cycle_done(state) {
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 请求注意：与悬停相同，弹跳时额外整体放大
#[derive(Debug, Default)]
pub struct SquishAttention;

impl EffectAnimation for SquishAttention {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        init_cycle(cx.state);
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;

        if !advance_squish(state) {
            if state.direction == Direction::None {
                state.count += 1;
                let t = state.count as f32 * PI * 2.0 / SQUISH_PERIOD as f32;
                state.top_offset = t.sin() * MAX_BOUNCE_OFFSET;
                state.width_mod = 1.0 + t.sin() / 8.0;
                state.height_mod = state.width_mod;
                if state.count >= SQUISH_PERIOD / 2 {
                    state.width_mod = 1.0;
                    state.height_mod = 1.0;
                    state.direction = Direction::SquishDown2;
                }
            } else {
                state.direction = Direction::SquishDown;
            }
        }

        if squish_cycle_done(state) {
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 打开弹跳的周期
const BOUNCE_PERIOD: i32 = 20;

/// 打开：边放大边弹起，落地后挤压一次
#[derive(Debug, Default)]
pub struct SquishOpening;

impl EffectAnimation for SquishOpening {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        state.count = 0;
        state.direction = Direction::None;
        state.width_mod = 0.0;
        state.height_mod = 0.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;

        match state.direction {
            Direction::SquishDown => {
                state.width_mod += squish_step();
                state.height_mod -= squish_step();
                if state.height_mod <= SQUISH_LIMIT {
                    state.direction = Direction::SquishUp;
                }
            }
            Direction::SquishUp => {
                state.width_mod -= squish_step();
                state.height_mod += squish_step();
                if state.height_mod >= 1.0 {
                    state.direction = Direction::None;
                    state.count = 0;
                    state.width_mod = 1.0;
                    state.height_mod = 1.0;
                }
            }
            Direction::None => {
                state.count += 1;
                let t = state.count as f32 * PI / BOUNCE_PERIOD as f32;
                state.top_offset = t.sin() * MAX_BOUNCE_OFFSET;
                if state.width_mod < 1.0 {
                    state.width_mod += 1.0 / BOUNCE_PERIOD as f32;
                    state.height_mod = state.width_mod;
                }
                if state.count == BOUNCE_PERIOD {
                    state.direction = Direction::SquishDown;
                    state.top_offset = 0.0;
                    state.width_mod = 1.0;
                    state.height_mod = 1.0;
                }
            }
            _ => state.direction = Direction::None,
        }

        if state.direction == Direction::None && state.count <= 0 {
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

/// 关闭：挤压一次后边弹起边缩小到消失
#[derive(Debug, Default)]
pub struct SquishClosing;

impl EffectAnimation for SquishClosing {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        init_cycle(cx.state);
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;

        match state.direction {
            Direction::SquishDown => {
                state.width_mod += squish_step();
                state.height_mod -= squish_step();
                if state.height_mod <= SQUISH_LIMIT {
                    state.direction = Direction::SquishUp;
                }
            }
            Direction::SquishUp => {
                state.width_mod -= squish_step();
                state.height_mod += squish_step();
                if state.height_mod >= 1.0 {
                    state.direction = Direction::Down;
                    state.count = 0;
                    state.width_mod = 1.0;
                    state.height_mod = 1.0;
                }
            }
            Direction::Down => {
                state.count += 1;
                let t = state.count as f32 * PI / BOUNCE_PERIOD as f32;
                state.top_offset = t.sin() * MAX_BOUNCE_OFFSET;
                if state.width_mod > 0.0 {
                    state.width_mod -= 1.0 / BOUNCE_PERIOD as f32;
                    state.height_mod = state.width_mod;
                }
                if state.count == BOUNCE_PERIOD {
                    state.direction = Direction::None;
                    state.top_offset = 0.0;
                    state.width_mod = 0.0;
                    state.height_mod = 0.0;
                }
            }
            // 一轮结束后重新开始
            _ => init_cycle(state),
        }

        if state.direction == Direction::None && state.count == BOUNCE_PERIOD {
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::drive;
    use super::*;

    #[test]
    fn test_squish_hover_cycle() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut Squish, &mut state, true, 200);
        assert_eq!(step, FrameStep::LoopEnd);
        // 两次挤压（各约 6 帧）加 14 帧弹跳
        assert!((24..=30).contains(&frames), "frames = {}", frames);
        assert_eq!(state.width_mod, 1.0);
        assert_eq!(state.direction, Direction::None);
    }

    #[test]
    fn test_squish_attention_cycle() {
        let mut state = AnimationState::default();
        let (_, step) = drive(&mut SquishAttention, &mut state, true, 200);
        assert_eq!(step, FrameStep::LoopEnd);
        assert_eq!(state.height_mod, 1.0);
    }

    #[test]
    fn test_squish_opening_grows_from_zero() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut SquishOpening, &mut state, true, 200);
        assert_eq!(step, FrameStep::LoopEnd);
        assert!(frames > 20);
        assert_eq!(state.width_mod, 1.0);
        assert_eq!(state.top_offset, 0.0);
    }

    #[test]
    fn test_squish_closing_shrinks_to_zero() {
        let mut state = AnimationState::default();
        let (_, step) = drive(&mut SquishClosing, &mut state, true, 200);
        assert_eq!(step, FrameStep::LoopEnd);
        assert_eq!(state.width_mod, 0.0);
        assert_eq!(state.count, BOUNCE_PERIOD);
    }
}
