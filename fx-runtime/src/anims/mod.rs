//! # Anims 模块
//!
//! 具体的动画状态机，以及（效果类型 × 风格）到状态机的分派表。
//!
//! ## 共享契约
//!
//! 每个状态机都遵循同一套协议：
//!
//! 1. 运行的第一帧调用 [`EffectAnimation::init`] 做一次性初始化；
//! 2. 每帧 [`EffectAnimation::frame`] 只根据帧计数和固定常量修改 [`AnimationState`]，
//!    不做任何时钟校正；
//! 3. 状态有变化时调用 [`FrameContext::redraw`]，引擎据此每帧至多请求一次重绘；
//! 4. 到达自然结束状态时，先把本轮的局部计数复位，再返回 [`FrameStep::LoopEnd`]，
//!    由引擎执行循环判定（循环次数、是否仍是队首）；
//! 5. 需要"保持姿态"的效果（如悬停发光）在仍是队首时返回 [`FrameStep::Suspend`]，
//!    引擎停掉计时器但保留运行和状态，失去队首后再恢复同一个运行。
//!
//! 需要在被抢占时缩短或改变播放的状态机（发光、缩放、聚光灯、去饱和等）
//! 每帧通过 [`FrameContext::is_queue_head`] 检查自己是否仍是队首；
//! 其余状态机（如弹跳、淡出）总是播完本轮，由引擎在循环判定时处理抢占。

mod bounce;
mod desaturate;
mod fade;
mod glow;
mod simple;
mod spotlight;
mod spotlight3d;
mod squish;
mod turn;
mod zoom;

use std::fmt;
use std::time::Duration;

use crate::effect::{EffectKind, EffectStyle, EffectStyles};
use crate::geometry::IconGeometry;
use crate::state::AnimationState;

pub use bounce::{Bounce, BounceOpening};
pub use desaturate::Desaturate;
pub use fade::{FadeOut, Fading};
pub use glow::{Glow, GlowAttention, GlowClosing, GlowOpening};
pub use simple::{SimpleAttention, SimpleClosing, SimpleHover, SimpleOpening};
pub use spotlight::{SpotlightClosing, SpotlightHalfFade, SpotlightHover, SpotlightOpening};
pub use spotlight3d::{Spotlight3dClosing, Spotlight3dHover, Spotlight3dOpening};
pub use squish::{Squish, SquishAttention, SquishClosing, SquishOpening};
pub use turn::{Turn, TurnClosing, TurnOpening};
pub use zoom::{Zoom, ZoomAttention, ZoomClosing, ZoomOpening};

// ========== 帧协议 ==========

/// 一帧执行后的去向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// 按当前帧间隔继续
    Continue,
    /// 继续，并把本次运行的帧间隔改为给定值
    ContinueAfter(Duration),
    /// 到达自然结束状态，交给循环判定
    LoopEnd,
    /// 挂起：停止计时器，保留运行和状态
    Suspend,
}

/// 单帧上下文
///
/// 借出当前实例的动画状态，并携带本帧的几何信息与队首判定。
pub struct FrameContext<'a> {
    /// 动画状态
    pub state: &'a mut AnimationState,
    geometry: IconGeometry,
    is_head: bool,
    repaint: bool,
}

impl<'a> FrameContext<'a> {
    /// 创建帧上下文
    pub fn new(state: &'a mut AnimationState, geometry: IconGeometry, is_head: bool) -> Self {
        Self {
            state,
            geometry,
            is_head,
            repaint: false,
        }
    }

    /// 本帧几何信息
    pub fn geometry(&self) -> &IconGeometry {
        &self.geometry
    }

    /// 当前运行的效果是否仍是队首（未被抢占）
    pub fn is_queue_head(&self) -> bool {
        self.is_head
    }

    /// 标记本帧需要重绘
    pub fn redraw(&mut self) {
        self.repaint = true;
    }

    /// 本帧是否请求了重绘
    pub fn needs_repaint(&self) -> bool {
        self.repaint
    }
}

/// 动画状态机
///
/// 实现者本身就是"运行状态"：在运行的第一帧创建，之后每帧被借用。
pub trait EffectAnimation {
    /// 运行开始时的一次性初始化
    fn init(&mut self, cx: &mut FrameContext<'_>);

    /// 推进一帧
    fn frame(&mut self, cx: &mut FrameContext<'_>) -> FrameStep;

    /// 运行结束且不再重复时调用，用于收起残留的装饰状态
    fn finish(&mut self, _state: &mut AnimationState) {}
}

// ========== 分派表 ==========

/// 动画状态机的标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationVariant {
    Bounce,
    BounceOpening,
    FadeOut,
    Fading,
    SimpleHover,
    SimpleAttention,
    SimpleOpening,
    SimpleClosing,
    Glow,
    GlowOpening,
    GlowClosing,
    GlowAttention,
    Zoom,
    ZoomAttention,
    ZoomOpening,
    ZoomClosing,
    Squish,
    SquishAttention,
    SquishOpening,
    SquishClosing,
    Turn,
    TurnOpening,
    TurnClosing,
    SpotlightHover,
    SpotlightHalfFade,
    SpotlightOpening,
    SpotlightClosing,
    Spotlight3dHover,
    Spotlight3dOpening,
    Spotlight3dClosing,
    Desaturate,
}

impl AnimationVariant {
    /// 为一次新的运行创建状态机
    pub fn instantiate(self) -> Box<dyn EffectAnimation> {
        match self {
            AnimationVariant::Bounce => Box::new(Bounce),
            AnimationVariant::BounceOpening => Box::new(BounceOpening),
            AnimationVariant::FadeOut => Box::new(FadeOut),
            AnimationVariant::Fading => Box::new(Fading),
            AnimationVariant::SimpleHover => Box::new(SimpleHover),
            AnimationVariant::SimpleAttention => Box::new(SimpleAttention::default()),
            AnimationVariant::SimpleOpening => Box::new(SimpleOpening),
            AnimationVariant::SimpleClosing => Box::new(SimpleClosing),
            AnimationVariant::Glow => Box::new(Glow),
            AnimationVariant::GlowOpening => Box::new(GlowOpening),
            AnimationVariant::GlowClosing => Box::new(GlowClosing),
            AnimationVariant::GlowAttention => Box::new(GlowAttention),
            AnimationVariant::Zoom => Box::new(Zoom),
            AnimationVariant::ZoomAttention => Box::new(ZoomAttention),
            AnimationVariant::ZoomOpening => Box::new(ZoomOpening),
            AnimationVariant::ZoomClosing => Box::new(ZoomClosing),
            AnimationVariant::Squish => Box::new(Squish),
            AnimationVariant::SquishAttention => Box::new(SquishAttention),
            AnimationVariant::SquishOpening => Box::new(SquishOpening),
            AnimationVariant::SquishClosing => Box::new(SquishClosing),
            AnimationVariant::Turn => Box::new(Turn),
            AnimationVariant::TurnOpening => Box::new(TurnOpening),
            AnimationVariant::TurnClosing => Box::new(TurnClosing),
            AnimationVariant::SpotlightHover => Box::new(SpotlightHover),
            AnimationVariant::SpotlightHalfFade => Box::new(SpotlightHalfFade),
            AnimationVariant::SpotlightOpening => Box::new(SpotlightOpening),
            AnimationVariant::SpotlightClosing => Box::new(SpotlightClosing),
            AnimationVariant::Spotlight3dHover => Box::new(Spotlight3dHover),
            AnimationVariant::Spotlight3dOpening => Box::new(Spotlight3dOpening),
            AnimationVariant::Spotlight3dClosing => Box::new(Spotlight3dClosing),
            AnimationVariant::Desaturate => Box::new(Desaturate),
        }
    }

    /// 查表：给定效果类型与风格对应的状态机
    ///
    /// 返回 `None` 表示不播放动画（风格为 `None`，或效果类型为 `None`）。
    pub fn lookup(kind: EffectKind, style: EffectStyle) -> Option<Self> {
        use AnimationVariant as V;
        use EffectKind as K;
        use EffectStyle as S;

        if kind == K::Desaturate {
            return Some(V::Desaturate);
        }

        let variant = match (style, kind) {
            (S::None, _) | (_, K::None) | (_, K::Desaturate) => return None,

            (S::Classic, K::Opening) | (S::Fade, K::Opening) => V::BounceOpening,
            (S::Classic, K::Closing) | (S::Fade, K::Closing) => V::FadeOut,
            (S::Classic, _) => V::Bounce,
            (S::Fade, _) => V::Fading,

            (S::Spotlight, K::Opening) => V::SpotlightOpening,
            (S::Spotlight, K::Closing) => V::SpotlightClosing,
            (S::Spotlight, K::Hover) => V::SpotlightHover,
            (S::Spotlight, _) => V::SpotlightHalfFade,

            (S::Zoom, K::Opening) => V::ZoomOpening,
            (S::Zoom, K::Closing) => V::ZoomClosing,
            (S::Zoom, K::Hover) => V::Zoom,
            (S::Zoom, _) => V::ZoomAttention,

            (S::Squish, K::Opening) => V::SquishOpening,
            (S::Squish, K::Closing) => V::SquishClosing,
            (S::Squish, K::Hover) => V::Squish,
            (S::Squish, _) => V::SquishAttention,

            (S::Turn, K::Opening) => V::TurnOpening,
            (S::Turn, K::Closing) => V::TurnClosing,
            (S::Turn, _) => V::Turn,

            (S::Spotlight3d, K::Opening) => V::Spotlight3dOpening,
            (S::Spotlight3d, K::Closing) => V::Spotlight3dClosing,
            (S::Spotlight3d, K::Hover) => V::Spotlight3dHover,
            (S::Spotlight3d, _) => V::SpotlightHalfFade,

            (S::Glow, K::Opening) => V::GlowOpening,
            (S::Glow, K::Closing) => V::GlowClosing,
            (S::Glow, K::Hover) => V::Glow,
            (S::Glow, _) => V::GlowAttention,

            (S::Simple, K::Opening) => V::SimpleOpening,
            (S::Simple, K::Closing) => V::SimpleClosing,
            (S::Simple, K::Hover) => V::SimpleHover,
            (S::Simple, _) => V::SimpleAttention,
        };
        Some(variant)
    }
}

/// 分派表
///
/// 构造时根据每种效果类型的风格一次性解析出状态机标签，运行期只做查表。
#[derive(Clone, PartialEq, Eq)]
pub struct AnimationTable {
    entries: [(EffectKind, Option<AnimationVariant>); 6],
}

impl AnimationTable {
    /// 根据风格配置构建分派表
    pub fn new(styles: &EffectStyles) -> Self {
        let entries = EffectKind::QUEUEABLE.map(|kind| {
            let style = styles.get(kind).unwrap_or_default();
            (kind, AnimationVariant::lookup(kind, style))
        });
        Self { entries }
    }

    /// 解析效果类型对应的状态机；`None` 表示该类型不播放动画
    pub fn resolve(&self, kind: EffectKind) -> Option<AnimationVariant> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .and_then(|(_, variant)| *variant)
    }
}

impl Default for AnimationTable {
    fn default() -> Self {
        Self::new(&EffectStyles::default())
    }
}

impl fmt::Debug for AnimationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (kind, variant) in &self.entries {
            map.entry(kind, variant);
        }
        map.finish()
    }
}

// ========== 共享辅助 ==========

/// 翻转类动画共用的四分之一周期相位
///
/// 根据计数所在的四分之一周期给出宽度修饰、厚度朝向和镜像标志。
/// 宽度修饰的取值为 [0, 1]，调用方自行施加最小宽度限制。
pub(crate) fn turn_quarter(count: i32, period: i32) -> (f32, bool, bool) {
    let quarter = (period / 4) as f32;
    if count < period / 4 {
        (1.0 - count as f32 / quarter, false, false)
    } else if count < period / 2 {
        ((count - period / 4) as f32 / quarter, true, true)
    } else if count < period * 3 / 4 {
        (1.0 - (count - period / 2) as f32 / quarter, false, true)
    } else {
        ((count - period * 3 / 4) as f32 / quarter, true, false)
    }
}

/// 正弦加速后的计数：`⌊sin(count·π/2/period)·period⌋`
pub(crate) fn eased_count(count: i32, period: i32) -> i32 {
    let t = count as f64 * std::f64::consts::PI / 2.0 / period as f64;
    (t.sin() * period as f64) as i32
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_classic() {
        assert_eq!(
            AnimationVariant::lookup(EffectKind::Opening, EffectStyle::Classic),
            Some(AnimationVariant::BounceOpening)
        );
        assert_eq!(
            AnimationVariant::lookup(EffectKind::Closing, EffectStyle::Classic),
            Some(AnimationVariant::FadeOut)
        );
        assert_eq!(
            AnimationVariant::lookup(EffectKind::Hover, EffectStyle::Classic),
            Some(AnimationVariant::Bounce)
        );
    }

    #[test]
    fn test_lookup_none_style() {
        for kind in [EffectKind::Opening, EffectKind::Hover, EffectKind::Attention] {
            assert_eq!(AnimationVariant::lookup(kind, EffectStyle::None), None);
        }
        assert_eq!(AnimationVariant::lookup(EffectKind::None, EffectStyle::Glow), None);
    }

    #[test]
    fn test_desaturate_ignores_style() {
        assert_eq!(
            AnimationVariant::lookup(EffectKind::Desaturate, EffectStyle::None),
            Some(AnimationVariant::Desaturate)
        );
    }

    #[test]
    fn test_table_resolves_every_kind() {
        let mut styles = EffectStyles::uniform(EffectStyle::Glow);
        styles.closing = EffectStyle::None;
        let table = AnimationTable::new(&styles);

        assert_eq!(table.resolve(EffectKind::Hover), Some(AnimationVariant::Glow));
        assert_eq!(table.resolve(EffectKind::Launching), Some(AnimationVariant::GlowAttention));
        assert_eq!(table.resolve(EffectKind::Closing), None);
        assert_eq!(table.resolve(EffectKind::Desaturate), Some(AnimationVariant::Desaturate));
        assert_eq!(table.resolve(EffectKind::None), None);
    }

    #[test]
    fn test_eased_count() {
        assert_eq!(eased_count(0, 36), 0);
        assert_eq!(eased_count(36, 36), 36);
        // 正弦加速：前半段推进得比线性快
        assert!(eased_count(18, 36) > 18);
    }

    #[test]
    fn test_turn_quarter() {
        assert_eq!(turn_quarter(0, 36), (1.0, false, false));
        let (w, reversed, flip) = turn_quarter(13, 36);
        assert!(reversed && flip);
        assert!((w - 4.0 / 9.0).abs() < 1e-6);
    }
}
