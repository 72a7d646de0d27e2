//! # Spotlight3d 动画
//!
//! 聚光灯与翻转的组合：图标在聚光灯中绕竖直轴旋转。
//!
//! 宽度以像素差 `delta`（≤ 0）计算，再换算为 `width_mod = (iw + delta) / iw`，
//! 保证任何时候图标至少保留 [`MIN_WIDTH`] 像素宽。

use super::{EffectAnimation, FrameContext, FrameStep, eased_count};
use crate::geometry::Region;
use crate::state::{AnimationState, Direction};

const PERIOD: i32 = 44;
const MAX_DEPTH: i32 = 10;
/// 图标最小保留宽度（像素）
const MIN_WIDTH: i32 = 4;

/// 旋转一周中给定计数处的宽度差、厚度朝向与镜像
fn spin_delta(c: i32, period: i32, icon_width: i32) -> (i32, bool, bool) {
    let q = period / 4;
    if c < q {
        (-c * icon_width / q, false, false)
    } else if c < q * 2 {
        ((c - q) * icon_width / q - icon_width, true, true)
    } else if c < q * 3 {
        (-(c - q * 2) * icon_width / q, false, true)
    } else {
        ((c - q * 3) * icon_width / q - icon_width, true, false)
    }
}

/// 把宽度差写入状态：厚度、朝向、镜像与宽度修饰
fn apply_spin(state: &mut AnimationState, spin: (i32, bool, bool), icon_width: i32) {
    let (delta, reversed, flip) = spin;
    let icon_width = icon_width.max(1);
    state.icon_depth = MAX_DEPTH * (-delta) / icon_width;
    state.depth_reversed = reversed;
    state.flip = flip;

    let limit = (icon_width - MIN_WIDTH).max(0);
    let delta = delta.clamp(-limit, limit);
    state.width_mod = (icon_width + delta) as f32 / icon_width as f32;
}

fn reset_spin(state: &mut AnimationState) {
    state.count = 0;
    state.top_offset = 0.0;
    state.width_mod = 1.0;
    state.icon_depth = 0;
    state.depth_reversed = false;
    state.flip = false;
}

/// 悬停：聚光灯下旋转一周；被抢占后聚光灯逐渐熄灭
#[derive(Debug, Default)]
pub struct Spotlight3dHover;

impl EffectAnimation for Spotlight3dHover {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        reset_spin(state);
        state.spotlight_alpha = 1.0;
        state.spotlight = true;
        state.glow_amount = 1.0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let icon_width = cx.geometry().icon_width;
        let is_head = cx.is_queue_head();
        cx.redraw();
        let state = &mut *cx.state;

        if is_head {
            state.spotlight_alpha = 1.0;
        } else {
            state.spotlight_alpha = (state.spotlight_alpha - 0.04).max(0.0);
        }
        state.glow_amount = state.spotlight_alpha;

        // 转完一周后停在正面，等聚光灯熄灭
        if state.count > PERIOD {
            state.count -= 1;
        }
        let prev = state.count;
        let c = eased_count(state.count, PERIOD);
        apply_spin(state, spin_delta(c, PERIOD, icon_width), icon_width);
        state.count = prev + 1;

        if state.count >= PERIOD
            && (state.spotlight_alpha >= 1.0 || state.spotlight_alpha <= 0.0)
        {
            reset_spin(state);
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }

    fn finish(&mut self, state: &mut AnimationState) {
        state.spotlight = false;
    }
}

/// 打开：聚光灯中自下而上显现、旋转，最后一跳的同时聚光灯淡出
#[derive(Debug, Default)]
pub struct Spotlight3dOpening;

impl EffectAnimation for Spotlight3dOpening {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let icon_width = cx.geometry().icon_width;
        let state = &mut *cx.state;
        reset_spin(state);
        state.spotlight_alpha = 1.0;
        state.spotlight = true;
        state.glow_amount = 1.0;
        state.clip = Some(Region::new(0, 0, icon_width, 0));
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let geo = *cx.geometry();
        cx.redraw();
        let state = &mut *cx.state;
        let q = PERIOD / 4;
        let max_offset = (geo.icon_height / 2) as f32;

        let prev = state.count;
        let c = eased_count(state.count, PERIOD);
        if c < q * 2 {
            state.clip = Some(Region::new(0, 0, geo.icon_width, c * geo.icon_height / (q * 2)));
        } else if c < q * 3 {
            state.clip = None;
            state.top_offset = (c - q * 2) as f32 * max_offset / q as f32;
        } else {
            state.clip = None;
            state.top_offset = max_offset - (c - q * 3) as f32 * max_offset / q as f32;
            state.spotlight_alpha = 1.0 - (c - q * 3) as f32 / q as f32;
        }
        state.glow_amount = state.spotlight_alpha;

        apply_spin(state, spin_delta(c, PERIOD, geo.icon_width), geo.icon_width);
        state.count = prev + 1;

        if state.count >= PERIOD {
            reset_spin(state);
            state.spotlight = false;
            state.spotlight_alpha = 0.0;
            state.glow_amount = 0.0;
            state.clip = None;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }

    fn finish(&mut self, state: &mut AnimationState) {
        state.spotlight = false;
    }
}

/// 关闭：聚光灯亮起后，图标边旋转边自上而下收起并淡出
#[derive(Debug, Default)]
pub struct Spotlight3dClosing;

impl Spotlight3dClosing {
    const PERIOD: f32 = 80.0;
    /// 收起阶段每圈旋转的帧数
    const TURN_PERIOD: i32 = 20;
}

impl EffectAnimation for Spotlight3dClosing {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let geo = *cx.geometry();
        let state = &mut *cx.state;
        reset_spin(state);
        state.spotlight_alpha = 0.0;
        state.spotlight = true;
        state.clip = Some(Region::from_size(geo.icon_width, geo.icon_height));
        state.direction = Direction::SpotlightOn;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let geo = *cx.geometry();
        cx.redraw();
        let state = &mut *cx.state;
        let fade = 2.0 / Self::PERIOD;

        match state.direction {
            Direction::SpotlightOn => {
                state.spotlight_alpha += 4.0 / Self::PERIOD;
                if state.spotlight_alpha >= 1.0 {
                    state.spotlight_alpha = 1.0;
                    state.direction = Direction::None;
                }
            }
            Direction::None => {
                let clip_step = 2 * geo.icon_height / Self::PERIOD as i32;
                let clip_height = match state.clip.as_mut() {
                    Some(clip) => {
                        clip.height -= clip_step;
                        clip.height
                    }
                    None => 0,
                };
                state.alpha -= fade;

                let spin = spin_delta(state.count, Self::TURN_PERIOD, geo.icon_width);
                apply_spin(state, spin, geo.icon_width);
                let prev = state.count;
                state.count += 1;
                if prev > Self::TURN_PERIOD {
                    state.count = 0;
                }

                if state.alpha <= 0.0 || clip_height <= 0 {
                    state.alpha = 0.0;
                    state.direction = Direction::SpotlightOff;
                    state.clip = None;
                } else if state.alpha <= 0.5 {
                    state.spotlight_alpha -= fade;
                }
            }
            _ => state.spotlight_alpha -= fade,
        }
        state.glow_amount = state.spotlight_alpha;

        if state.direction == Direction::SpotlightOff && state.spotlight_alpha <= 0.0 {
            reset_spin(state);
            state.alpha = 1.0;
            state.spotlight_alpha = 0.0;
            state.glow_amount = 0.0;
            state.direction = Direction::None;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }

    fn finish(&mut self, state: &mut AnimationState) {
        state.spotlight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::super::FrameContext;
    use super::super::test_support::{drive, geometry};
    use super::*;

    #[test]
    fn test_spin_delta_quarters() {
        assert_eq!(spin_delta(0, 44, 48), (0, false, false));
        assert_eq!(spin_delta(11, 44, 48), (-48, true, true));
        assert_eq!(spin_delta(22, 44, 48), (0, false, true));
        assert_eq!(spin_delta(44, 44, 48), (0, true, false));
    }

    #[test]
    fn test_apply_spin_keeps_minimum_width() {
        let mut state = AnimationState::default();
        apply_spin(&mut state, (-48, true, true), 48);
        assert_eq!(state.icon_depth, MAX_DEPTH);
        assert!((state.width_mod - 4.0 / 48.0).abs() < 1e-6);
        assert!(state.flip && state.depth_reversed);
    }

    #[test]
    fn test_hover_single_turn_while_head() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut Spotlight3dHover, &mut state, true, 200);
        assert_eq!((frames, step), (PERIOD as usize, FrameStep::LoopEnd));
        assert_eq!(state.width_mod, 1.0);
        assert_eq!(state.spotlight_alpha, 1.0);

        Spotlight3dHover.finish(&mut state);
        assert!(!state.spotlight);
    }

    #[test]
    fn test_hover_waits_for_spotlight_to_fade() {
        let mut state = AnimationState::default();
        let mut anim = Spotlight3dHover;
        let mut cx = FrameContext::new(&mut state, geometry(), true);
        anim.init(&mut cx);
        anim.frame(&mut cx);

        // 被抢占：0.96 起每帧 -0.04，约 25 帧熄灭，仍需转满一周
        let (frames, step) = {
            let mut frames = 0;
            let mut step = FrameStep::Continue;
            while frames < 200 && step != FrameStep::LoopEnd {
                let mut cx = FrameContext::new(&mut state, geometry(), false);
                step = anim.frame(&mut cx);
                frames += 1;
            }
            (frames, step)
        };
        assert_eq!(step, FrameStep::LoopEnd);
        assert_eq!(frames, PERIOD as usize - 1);
        assert_eq!(state.spotlight_alpha, 0.0);
    }

    #[test]
    fn test_opening_fades_spotlight_out() {
        let mut state = AnimationState::default();
        let (frames, step) = drive(&mut Spotlight3dOpening, &mut state, true, 200);
        assert_eq!((frames, step), (PERIOD as usize, FrameStep::LoopEnd));
        assert!(!state.spotlight);
        assert_eq!(state.clip, None);
        assert_eq!(state.top_offset, 0.0);
    }

    #[test]
    fn test_closing_ends_clean() {
        let mut state = AnimationState::default();
        let (_, step) = drive(&mut Spotlight3dClosing, &mut state, true, 400);
        assert_eq!(step, FrameStep::LoopEnd);
        assert_eq!(state.spotlight_alpha, 0.0);
        assert_eq!(state.clip, None);
        assert_eq!(state.width_mod, 1.0);
        assert_eq!(state.alpha, 1.0);
    }
}
