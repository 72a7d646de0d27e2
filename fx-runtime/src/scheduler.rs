//! # Scheduler 模块
//!
//! 效果引擎：持有一个图标实例的效果队列、动画状态与帧调度。
//!
//! ## 运行模型
//!
//! - 队首即应当播放的效果；任意时刻至多一个**运行**（run）。
//! - 运行在第一帧才真正开始：重置动画状态、发出 start 通知、创建状态机。
//! - 计时器是一个"是否武装 + 已累计时间"的组合，由宿主通过 [`EffectEngine::update`]
//!   或 [`EffectEngine::tick`] 驱动；引擎自身不做任何 IO。
//! - 被抢占的运行不会被强行打断：它的状态机每帧检查 `is_queue_head()`，
//!   自行缩短播放，直到下一次完成判定时让位。
//! - 挂起的运行停掉计时器但保留状态机与动画状态；失去队首后由调度重新武装。
//!
//! 完成时的顺序固定为：先清理（清除当前运行、停计时器），再通知，最后重新调度。

use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::{debug, trace};

use crate::anims::{AnimationTable, AnimationVariant, EffectAnimation, FrameContext, FrameStep};
use crate::config::EngineConfig;
use crate::effect::{EffectKind, EffectRequest, EffectStyles};
use crate::error::{EngineError, EngineResult};
use crate::event::EffectEvent;
use crate::geometry::{IconGeometry, Region};
use crate::queue::EffectQueue;
use crate::state::AnimationState;
use crate::widget::IconWidget;

/// 默认帧间隔
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(40);

/// 帧间隔下限，避免零间隔导致 `update` 死循环
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// 调度阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// 没有当前运行
    Idle,
    /// 当前运行是队首，正在播放
    Running,
    /// 当前运行已挂起，计时器停止
    Suspended,
    /// 当前运行已被抢占或停止，正在收尾
    Terminating,
}

/// 当前运行
struct ActiveRun {
    kind: EffectKind,
    variant: AnimationVariant,
    /// 第一帧时创建
    animation: Option<Box<dyn EffectAnimation>>,
    suspended: bool,
    /// 运行期间被移出队列的请求（`stop` 或循环次数用完），由本运行负责收尾
    detached: Option<EffectRequest>,
    interval: Duration,
}

impl ActiveRun {
    fn new(kind: EffectKind, variant: AnimationVariant, interval: Duration) -> Self {
        Self {
            kind,
            variant,
            animation: None,
            suspended: false,
            detached: None,
            interval,
        }
    }

    fn started(&self) -> bool {
        self.animation.is_some()
    }
}

/// 效果引擎
pub struct EffectEngine {
    widget: Weak<dyn IconWidget>,
    queue: EffectQueue,
    state: AnimationState,
    table: AnimationTable,
    run: Option<ActiveRun>,
    armed: bool,
    elapsed: Duration,
    frame_interval: Duration,
    icon_width: i32,
    icon_height: i32,
    events: Vec<EffectEvent>,
}

impl EffectEngine {
    /// 创建引擎
    ///
    /// # 参数
    /// - `widget`: 宿主控件的弱引用
    /// - `config`: 引擎配置（风格与帧间隔）
    pub fn new(widget: Weak<dyn IconWidget>, config: &EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            widget,
            queue: EffectQueue::new(),
            state: AnimationState::default(),
            table: AnimationTable::new(&config.styles),
            run: None,
            armed: false,
            elapsed: Duration::ZERO,
            frame_interval: config.frame_interval(),
            icon_width: 1,
            icon_height: 1,
            events: Vec::new(),
        })
    }

    /// 使用默认配置创建引擎
    pub fn with_defaults(widget: Weak<dyn IconWidget>) -> Self {
        Self {
            widget,
            queue: EffectQueue::new(),
            state: AnimationState::default(),
            table: AnimationTable::default(),
            run: None,
            armed: false,
            elapsed: Duration::ZERO,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            icon_width: 1,
            icon_height: 1,
            events: Vec::new(),
        }
    }

    // ========== 配置 ==========

    /// 更换风格配置，从下一个运行开始生效
    pub fn set_styles(&mut self, styles: &EffectStyles) {
        self.table = AnimationTable::new(styles);
    }

    /// 更换帧间隔，从下一个运行开始生效
    pub fn set_frame_interval(&mut self, interval: Duration) -> EngineResult<()> {
        if interval.is_zero() {
            return Err(EngineError::ZeroFrameInterval);
        }
        self.frame_interval = interval;
        Ok(())
    }

    /// 设置图标尺寸
    ///
    /// 小于等于 0 的值按 1 处理。`resize_hint` 为真时请求控件重新布局。
    pub fn set_icon_size(&mut self, width: i32, height: i32, resize_hint: bool) {
        self.icon_width = width.max(1);
        self.icon_height = height.max(1);
        trace!(width = self.icon_width, height = self.icon_height, "图标尺寸变化");

        if let Some(widget) = self.widget.upgrade() {
            if resize_hint {
                widget.request_resize();
            }
            widget.request_repaint(None);
        }
    }

    // ========== 队列操作 ==========

    /// 以默认循环次数启动效果，不发出通知
    pub fn start(&mut self, kind: EffectKind) {
        self.start_ex(kind, kind.default_loops(), false, false);
    }

    /// 启动效果
    ///
    /// # 参数
    /// - `max_loops`: 循环次数，0 表示无限（直到 `stop`）
    /// - `signal_start` / `signal_end`: 是否发出 start / end 通知
    ///
    /// 效果类型为 `None`、控件已销毁、或同类请求已在队列中时不做任何事。
    pub fn start_ex(&mut self, kind: EffectKind, max_loops: u32, signal_start: bool, signal_end: bool) {
        if kind == EffectKind::None {
            return;
        }
        if !self.widget_alive() {
            debug!(kind = %kind, "控件已销毁，忽略 start");
            return;
        }
        let request = EffectRequest::new(kind, max_loops, signal_start, signal_end);
        if !self.queue.insert(request) {
            trace!(kind = %kind, "效果已在队列中");
            return;
        }
        debug!(kind = %kind, max_loops, queue_len = self.queue.len(), "效果入队");
        self.schedule();
    }

    /// 停止效果
    ///
    /// 不在队列中时不做任何事。正在播放的请求交给当前运行收尾，
    /// 其余请求立即释放。
    pub fn stop(&mut self, kind: EffectKind) {
        let Some(mut request) = self.queue.remove(kind) else {
            trace!(kind = %kind, "效果不在队列中，忽略 stop");
            return;
        };
        debug!(kind = %kind, "效果出队");

        let current = self
            .run
            .as_ref()
            .filter(|run| run.kind == kind)
            .map(ActiveRun::started);
        match current {
            Some(true) => {
                let winding_down = self.run.as_ref().is_some_and(|run| run.detached.is_some());
                if winding_down {
                    // 运行已在收尾旧请求；重新入队的这个请求从未播放，立即释放
                    self.notify_end(&mut request);
                } else if let Some(run) = self.run.as_mut() {
                    run.detached = Some(request);
                }
            }
            Some(false) => {
                // 还没播放过任何一帧，直接撤销
                self.run = None;
                self.armed = false;
                self.notify_end(&mut request);
            }
            None => self.notify_end(&mut request),
        }
        self.schedule();
    }

    // ========== 计时 ==========

    /// 推进时间，执行所有到期的帧
    pub fn update(&mut self, dt: Duration) {
        if !self.armed {
            return;
        }
        self.elapsed += dt;
        while self.armed {
            let interval = self.current_interval();
            if self.elapsed < interval {
                break;
            }
            self.elapsed -= interval;
            self.run_frame();
        }
    }

    /// 立即执行一帧（计时器未武装时不做任何事）
    ///
    /// # 返回
    /// 是否执行了一帧
    pub fn tick(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        self.run_frame();
        true
    }

    // ========== 查询 ==========

    /// 动画状态
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// 当前运行的效果类型
    pub fn current(&self) -> Option<EffectKind> {
        self.run.as_ref().map(|run| run.kind)
    }

    /// 效果队列
    pub fn queue(&self) -> &EffectQueue {
        &self.queue
    }

    /// 计时器是否武装
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// 当前帧间隔
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// 调度阶段
    pub fn phase(&self) -> RunPhase {
        match &self.run {
            None => RunPhase::Idle,
            Some(run) if run.detached.is_some() => RunPhase::Terminating,
            Some(run) if run.suspended => RunPhase::Suspended,
            Some(run) if self.queue.head_kind() != Some(run.kind) => RunPhase::Terminating,
            Some(_) => RunPhase::Running,
        }
    }

    /// 当前几何信息：图标尺寸 + 控件实时的窗口尺寸与 dock 边缘
    pub fn geometry(&self) -> IconGeometry {
        let widget = self.widget.upgrade();
        self.geometry_with(widget.as_deref())
    }

    /// 取出累计的事件
    pub fn take_events(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== 内部 ==========

    fn widget_alive(&self) -> bool {
        self.widget.strong_count() > 0
    }

    fn geometry_with(&self, widget: Option<&dyn IconWidget>) -> IconGeometry {
        let (window, edge) = widget
            .map(|w| (w.widget_geometry(), w.dock_edge()))
            .unwrap_or_default();
        IconGeometry {
            icon_width: self.icon_width,
            icon_height: self.icon_height,
            window_width: window.width,
            window_height: window.height,
            edge,
        }
    }

    fn current_interval(&self) -> Duration {
        self.run
            .as_ref()
            .map_or(self.frame_interval, |run| run.interval)
            .max(MIN_FRAME_INTERVAL)
    }

    fn arm(&mut self) {
        self.armed = true;
        self.elapsed = Duration::ZERO;
    }

    fn notify_end(&mut self, request: &mut EffectRequest) {
        if request.take_end_signal() && self.widget_alive() {
            self.events.push(EffectEvent::AnimationEnded(request.kind));
        }
    }

    /// 调度：在每次队列变动和每次运行结束后执行
    fn schedule(&mut self) {
        loop {
            if let Some(run) = self.run.as_ref() {
                if self.queue.head_kind() == Some(run.kind) {
                    return;
                }
                if run.started() {
                    if run.suspended {
                        trace!(kind = %run.kind, "恢复挂起的运行");
                        if let Some(run) = self.run.as_mut() {
                            run.suspended = false;
                        }
                        self.arm();
                    }
                    return;
                }
                // 尚未开始的运行直接让位给新的队首，请求仍留在队列中
                debug!(kind = %run.kind, "未开始的运行被抢占");
                self.run = None;
                self.armed = false;
            }

            let Some(head) = self.queue.head_kind() else {
                return;
            };

            let Some(variant) = self.table.resolve(head) else {
                // 未配置动画：立即完成
                debug!(kind = %head, "未配置动画，立即完成");
                if let Some(mut request) = self.queue.remove(head) {
                    if request.take_start_signal() && self.widget_alive() {
                        self.events.push(EffectEvent::AnimationStarted(head));
                    }
                    self.notify_end(&mut request);
                }
                continue;
            };

            debug!(kind = %head, variant = ?variant, "开始运行");
            self.run = Some(ActiveRun::new(head, variant, self.frame_interval));
            self.arm();

            let painted = self
                .widget
                .upgrade()
                .is_some_and(|widget| widget.has_painted());
            if !painted {
                // 控件还没绘制过：同步执行一帧，保证第一次绘制就带上效果
                self.run_frame();
            }
            return;
        }
    }

    /// 执行当前运行的一帧
    fn run_frame(&mut self) {
        let widget = self.widget.upgrade();
        let alive = widget.is_some();
        let geometry = self.geometry_with(widget.as_deref());

        let Some(run) = self.run.as_mut() else {
            self.armed = false;
            return;
        };
        let is_head = self.queue.head_kind() == Some(run.kind);

        if run.animation.is_none() {
            self.state.reset();
            let request = match run.detached.as_mut() {
                Some(request) => Some(request),
                None => self.queue.get_mut(run.kind),
            };
            if request.is_some_and(EffectRequest::take_start_signal) && alive {
                self.events.push(EffectEvent::AnimationStarted(run.kind));
            }

            let mut animation = run.variant.instantiate();
            let mut cx = FrameContext::new(&mut self.state, geometry, is_head);
            animation.init(&mut cx);
            run.animation = Some(animation);
        }

        let Some(animation) = run.animation.as_mut() else {
            return;
        };
        let mut cx = FrameContext::new(&mut self.state, geometry, is_head);
        let step = animation.frame(&mut cx);

        if cx.needs_repaint() {
            if let Some(widget) = &widget {
                let area = Region::from_size(geometry.window_width, geometry.window_height);
                widget.request_repaint(Some(area));
            }
        }
        trace!(kind = %run.kind, count = self.state.count, step = ?step, "帧");

        match step {
            FrameStep::Continue => {}
            FrameStep::ContinueAfter(interval) => run.interval = interval,
            FrameStep::Suspend => {
                run.suspended = true;
                self.armed = false;
                trace!(kind = %run.kind, "运行挂起");
                if !is_head {
                    self.schedule();
                }
            }
            FrameStep::LoopEnd => self.complete_loop(widget),
        }
    }

    /// 循环完成判定
    ///
    /// 有限循环次数用完时把请求移出队列；不再是队首（被抢占或已停止）时结束运行。
    fn complete_loop(&mut self, widget: Option<Rc<dyn IconWidget>>) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let kind = run.kind;

        if run.detached.is_none() {
            let max_reached = self
                .queue
                .get_mut(kind)
                .is_some_and(EffectRequest::complete_loop);
            if max_reached {
                run.detached = self.queue.remove(kind);
            }
        }

        let repeat = run.detached.is_none() && self.queue.head_kind() == Some(kind);
        if repeat {
            trace!(kind = %kind, "重复播放");
            return;
        }

        // 先清理
        let Some(mut run) = self.run.take() else {
            return;
        };
        self.armed = false;
        if let Some(mut animation) = run.animation.take() {
            animation.finish(&mut self.state);
        }
        debug!(kind = %kind, "运行结束");

        // 再通知
        if let Some(mut request) = run.detached.take() {
            self.notify_end(&mut request);
        }

        if widget.is_some() {
            self.schedule();
        }
    }
}

impl fmt::Debug for EffectEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectEngine")
            .field("queue", &self.queue.kinds())
            .field("current", &self.current())
            .field("phase", &self.phase())
            .field("armed", &self.armed)
            .field("table", &self.table)
            .field("icon_size", &(self.icon_width, self.icon_height))
            .field("pending_events", &self.events.len())
            .finish()
    }
}
