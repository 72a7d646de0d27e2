//! # Spotlight 动画
//!
//! 聚光灯类动画：在图标身后绘制一束光，`spotlight_alpha` 控制其强度，
//! 发光强度跟随聚光灯强度变化。

use super::{EffectAnimation, FrameContext, FrameStep};
use crate::geometry::Region;
use crate::state::{AnimationState, Direction};

fn hide_spotlight(state: &mut AnimationState) {
    state.spotlight = false;
}

/// 悬停：聚光灯亮起，保持期间轻微颤动，被抢占后熄灭
#[derive(Debug, Default)]
pub struct SpotlightHover;

impl SpotlightHover {
    const PERIOD: f32 = 15.0;
    const TREMBLE_PERIOD: f32 = 5.0;
    const TREMBLE_HEIGHT: f32 = 0.4;
}

impl EffectAnimation for SpotlightHover {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        state.count = 0;
        state.spotlight_alpha = 0.0;
        state.spotlight = true;
        state.glow_amount = 0.0;
        state.direction = Direction::SpotlightOn;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let busy = cx.is_queue_head();
        cx.redraw();
        let state = &mut *cx.state;
        let tremble = Self::TREMBLE_HEIGHT / Self::TREMBLE_PERIOD;

        if state.spotlight_alpha < 1.0 && state.direction == Direction::SpotlightOn {
            state.spotlight_alpha += 1.0 / Self::PERIOD;
        } else if busy && state.direction != Direction::SpotlightOff {
            if state.spotlight_alpha >= 1.0 {
                state.direction = Direction::TrembleDown;
            } else if state.spotlight_alpha < 1.0 - Self::TREMBLE_HEIGHT {
                state.direction = Direction::TrembleUp;
            }
            if state.direction == Direction::TrembleUp {
                state.spotlight_alpha += tremble;
            } else {
                state.spotlight_alpha -= tremble;
            }
        } else {
            state.direction = Direction::SpotlightOff;
            state.spotlight_alpha -= 1.0 / Self::PERIOD;
        }
        state.glow_amount = state.spotlight_alpha;

        if state.direction == Direction::SpotlightOff && state.spotlight_alpha <= 0.0 {
            state.direction = Direction::SpotlightOn;
            state.spotlight_alpha = 0.0;
            state.glow_amount = 0.0;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }

    fn finish(&mut self, state: &mut AnimationState) {
        hide_spotlight(state);
    }
}

/// 启动中 / 请求注意：聚光灯在 0 与 0.75 之间往返
#[derive(Debug, Default)]
pub struct SpotlightHalfFade;

impl SpotlightHalfFade {
    const PERIOD: f32 = 20.0;
    const MAX_ALPHA: f32 = 0.75;
}

impl EffectAnimation for SpotlightHalfFade {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let state = &mut *cx.state;
        state.count = 0;
        state.direction = Direction::SpotlightOn;
        state.spotlight = true;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        cx.redraw();
        let state = &mut *cx.state;
        let step = Self::MAX_ALPHA / Self::PERIOD;

        if state.direction == Direction::SpotlightOn {
            state.spotlight_alpha += step;
        } else {
            state.spotlight_alpha -= step;
        }
        state.glow_amount = state.spotlight_alpha;

        if state.spotlight_alpha > Self::MAX_ALPHA {
            state.direction = Direction::SpotlightOff;
        } else if state.spotlight_alpha <= 0.0 {
            state.direction = Direction::SpotlightOn;
        }

        if state.spotlight_alpha <= 0.0 {
            state.count = 0;
            state.spotlight_alpha = 0.0;
            state.glow_amount = 0.0;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }

    fn finish(&mut self, state: &mut AnimationState) {
        hide_spotlight(state);
    }
}

/// 打开：图标在聚光灯中自下而上显现并展开，随后聚光灯淡出
#[derive(Debug, Default)]
pub struct SpotlightOpening;

impl SpotlightOpening {
    const PERIOD: f32 = 20.0;
}

impl EffectAnimation for SpotlightOpening {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let icon_width = cx.geometry().icon_width;
        let state = &mut *cx.state;
        state.spotlight_alpha = 1.0;
        state.spotlight = true;
        state.glow_amount = 1.0;
        state.width_mod = 0.5;
        state.clip = Some(Region::new(0, 0, icon_width, 0));
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let icon_height = cx.geometry().icon_height;
        cx.redraw();
        let state = &mut *cx.state;
        let clip_step = icon_height / Self::PERIOD as i32;

        if state.width_mod < 1.0 {
            if let Some(clip) = state.clip.as_mut() {
                clip.height += clip_step;
            }
            state.width_mod += 1.5 / Self::PERIOD;
        } else {
            state.width_mod = 1.0;
            match state.clip.as_mut() {
                Some(clip) if clip.height < icon_height => {
                    clip.height = (clip.height + clip_step).min(icon_height);
                }
                _ => {
                    state.clip = None;
                    state.spotlight_alpha -= 3.0 / Self::PERIOD;
                    state.glow_amount = state.spotlight_alpha;
                }
            }
        }

        if state.spotlight_alpha <= 0.0 {
            state.spotlight_alpha = 0.0;
            state.glow_amount = 0.0;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }

    fn finish(&mut self, state: &mut AnimationState) {
        hide_spotlight(state);
    }
}

/// 关闭：聚光灯亮起，图标自上而下收起并淡出，最后聚光灯熄灭
#[derive(Debug, Default)]
pub struct SpotlightClosing;

impl SpotlightClosing {
    const PERIOD: f32 = 40.0;
}

impl EffectAnimation for SpotlightClosing {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let geo = *cx.geometry();
        let state = &mut *cx.state;
        state.spotlight_alpha = 0.0;
        state.glow_amount = 0.0;
        state.clip = Some(Region::from_size(geo.icon_width, geo.icon_height));
        state.direction = Direction::SpotlightOn;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let icon_height = cx.geometry().icon_height;
        cx.redraw();
        let state = &mut *cx.state;
        state.spotlight = true;
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
                if let Some(clip) = state.clip.as_mut() {
                    clip.height -= 2 * icon_height / Self::PERIOD as i32;
                }
                state.width_mod -= fade;
                state.alpha -= fade;
                if state.alpha <= 0.0 {
                    state.width_mod = 1.0;
                    state.alpha = 0.0;
                    state.direction = Direction::SpotlightOff;
                } else if state.alpha <= 0.5 {
                    state.spotlight_alpha -= fade;
                }
            }
            _ => {
                state.clip = None;
                state.spotlight_alpha -= fade;
            }
        }
        state.glow_amount = state.spotlight_alpha;

        if state.direction == Direction::SpotlightOff && state.spotlight_alpha <= 0.0 {
            state.alpha = 1.0;
            state.spotlight_alpha = 0.0;
            state.glow_amount = 0.0;
            state.clip = None;
            state.spotlight = false;
            state.direction = Direction::None;
            return FrameStep::LoopEnd;
        }
        FrameStep::Continue
    }
}
