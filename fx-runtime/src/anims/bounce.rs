//! # Bounce 动画
//!
//! 经典弹跳：图标沿正弦曲线弹起再落回。

use std::f32::consts::PI;

use super::{EffectAnimation, FrameContext, FrameStep};
use crate::geometry::Region;

/// 弹跳最大高度（像素）
const MAX_BOUNCE_OFFSET: f32 = 15.0;

/// 悬停 / 请求注意时的弹跳
#[derive(Debug, Default)]
pub struct Bounce;

impl Bounce {
    const PERIOD: i32 = 20;
}

impl EffectAnimation for Bounce {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        cx.state.count = 0;
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let state = &mut *cx.state;
        state.count += 1;
        state.top_offset = (state.count as f32 * PI / Self::PERIOD as f32).sin() * MAX_BOUNCE_OFFSET;
        let done = state.count >= Self::PERIOD;
        if done {
            state.count = 0;
        }
        cx.redraw();

        if done { FrameStep::LoopEnd } else { FrameStep::Continue }
    }
}

/// 打开时的弹跳
///
/// 第一阶段（`PERIOD1` 帧）裁剪高度从 0 线性增长到图标高度，图标从边缘"长出"；
/// 第二阶段（`PERIOD2` 帧）移除裁剪，按 `sin(t·π/PERIOD2)·MAX` 弹跳一次。
#[derive(Debug, Default)]
pub struct BounceOpening;

impl BounceOpening {
    pub const PERIOD1: i32 = 15;
    pub const PERIOD2: i32 = 20;
}

impl EffectAnimation for BounceOpening {
    fn init(&mut self, cx: &mut FrameContext<'_>) {
        let icon_width = cx.geometry().icon_width;
        let state = &mut *cx.state;
        state.count = 0;
        state.top_offset = 0.0;
        state.clip = Some(Region::from_size(icon_width, 0));
    }

    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep {
        let icon_height = cx.geometry().icon_height;
        let state = &mut *cx.state;

        if state.count < Self::PERIOD1 {
            state.count += 1;
            if let Some(clip) = state.clip.as_mut() {
                clip.height = icon_height * state.count / Self::PERIOD1;
            }
        } else if state.count < Self::PERIOD1 + Self::PERIOD2 {
            state.clip = None;
            state.count += 1;
            let t = (state.count - Self::PERIOD1) as f32;
            state.top_offset = (t * PI / Self::PERIOD2 as f32).sin() * MAX_BOUNCE_OFFSET;
        }

        let done = state.count >= Self::PERIOD1 + Self::PERIOD2;
        if done {
            state.count = 0;
            state.top_offset = 0.0;
            state.clip = None;
        }
        cx.redraw();

        if done { FrameStep::LoopEnd } else { FrameStep::Continue }
    }
}
