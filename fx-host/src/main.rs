//! # fx-render
//!
//! 离屏渲染工具：把一个图标效果逐帧渲染为 PNG 序列。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p fx-host -- --effect opening --style classic --out frames
//! cargo run -p fx-host -- --icon app.png --effect hover --style spotlight --frames 80
//! cargo run -p fx-host -- --config effects.json --edge left --window 72x96 --progress 0.4
//! ```

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use fx_host::render::{color_from_rgba, rounded_rect_path};
use fx_host::resources::{load_pixmap, save_png};
use fx_host::{EffectsConfig, IconEffects};
use fx_runtime::{DockEdge, EffectEvent, EffectKind, EffectStyle, IconWidget, Region};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};
use tracing::{Level, debug, info, warn};

#[derive(Parser)]
#[command(name = "fx-render")]
#[command(about = "Dock 图标效果离屏渲染工具 - 输出 PNG 帧序列")]
#[command(version)]
struct Cli {
    /// 效果配置文件（JSON）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 图标图片；省略时使用内置的占位图标
    #[arg(short, long)]
    icon: Option<PathBuf>,

    /// 效果类型
    #[arg(short, long, default_value = "hover")]
    effect: EffectKind,

    /// 覆盖该效果类型的风格
    #[arg(short, long)]
    style: Option<EffectStyle>,

    /// Dock 所在边缘
    #[arg(long, default_value = "bottom")]
    edge: DockEdge,

    /// 最多渲染的帧数
    #[arg(short, long, default_value = "60")]
    frames: u32,

    /// 循环次数，0 为无限；省略时使用效果类型的默认值
    #[arg(long)]
    loops: Option<u32>,

    /// 图标边长（像素）
    #[arg(long, default_value = "48")]
    size: i32,

    /// 窗口尺寸，格式 WxH
    #[arg(long, default_value = "96x96", value_parser = parse_window)]
    window: (i32, i32),

    /// 绘制活动指示器
    #[arg(long)]
    active: bool,

    /// 指示箭头数量
    #[arg(long, default_value = "0")]
    arrows: u32,

    /// 进度 (0.0 - 1.0)
    #[arg(long)]
    progress: Option<f32>,

    /// 输出目录
    #[arg(short, long, default_value = "frames")]
    out: PathBuf,

    /// 日志详细程度（-v debug，-vv trace）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_window(s: &str) -> Result<(i32, i32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("窗口尺寸格式应为 WxH: '{}'", s))?;
    let w: i32 = w.trim().parse().map_err(|e| format!("无效的宽度 '{}': {}", w, e))?;
    let h: i32 = h.trim().parse().map_err(|e| format!("无效的高度 '{}': {}", h, e))?;
    if w <= 0 || h <= 0 {
        return Err(format!("窗口尺寸必须为正: '{}'", s));
    }
    Ok((w, h))
}

/// 无窗口的控件：固定尺寸与边缘，只统计重绘请求
struct HeadlessWidget {
    size: Region,
    edge: DockEdge,
    repaints: Cell<u32>,
}

impl IconWidget for HeadlessWidget {
    fn request_repaint(&self, _region: Option<Region>) {
        self.repaints.set(self.repaints.get() + 1);
    }

    fn widget_geometry(&self) -> Region {
        self.size
    }

    fn dock_edge(&self) -> DockEdge {
        self.edge
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 占位图标：蓝色圆角方块，左上角有一个白点，便于观察翻转和旋转
fn placeholder_icon(size: u32) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(size, size).context("无法分配占位图标")?;
    let s = size as f32;

    let mut paint = Paint::default();
    paint.anti_alias = true;

    if let Some(body) = rounded_rect_path(0.0, 0.0, s, s, s / 6.0) {
        paint.set_color(color_from_rgba([52, 120, 246, 255]));
        pixmap.fill_path(&body, &paint, FillRule::Winding, Transform::identity(), None);
    }
    if let Some(dot) = PathBuilder::from_circle(s * 0.3, s * 0.3, s / 8.0) {
        paint.set_color(color_from_rgba([255, 255, 255, 255]));
        pixmap.fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
    }

    Ok(pixmap)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => EffectsConfig::load_strict(path)
            .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
        None => EffectsConfig::default(),
    };
    if let Some(style) = cli.style {
        // 显式风格优先于打包值
        let mut styles = config.effective_styles()?;
        styles.set(cli.effect, style);
        config.styles = styles;
        config.icon_effect = None;
    }

    let size = cli.size.max(1);
    let icon = match &cli.icon {
        Some(path) => load_pixmap(path, "icon")?,
        None => placeholder_icon(size as u32)?,
    };

    let widget = Rc::new(HeadlessWidget {
        size: Region::from_size(cli.window.0, cli.window.1),
        edge: cli.edge,
        repaints: Cell::new(0),
    });
    let dyn_widget: Rc<dyn IconWidget> = widget.clone();

    let mut fx = IconEffects::new(Rc::downgrade(&dyn_widget), config)?;
    fx.set_icon_size(size, size, false);
    fx.set_active(cli.active);
    fx.set_indicator_count(cli.arrows);
    if let Some(progress) = cli.progress {
        fx.set_progress(progress);
    }

    let loops = cli.loops.unwrap_or_else(|| cli.effect.default_loops());
    fx.start_ex(cli.effect, loops, true, true);

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("无法创建输出目录 {}", cli.out.display()))?;

    info!(
        effect = %cli.effect,
        edge = ?cli.edge,
        frames = cli.frames,
        out = %cli.out.display(),
        "开始渲染"
    );

    let mut rendered = 0;
    for frame in 0..cli.frames {
        let pixmap = fx.render_frame(&icon)?;
        let path = cli.out.join(format!("frame_{:04}.png", frame));
        save_png(&pixmap, &path)?;
        rendered += 1;
        debug!(frame, phase = ?fx.phase(), "帧已保存");

        let mut ended = false;
        for event in fx.take_events() {
            info!(?event, frame, "效果事件");
            ended |= event == EffectEvent::AnimationEnded(cli.effect);
        }
        if ended {
            break;
        }

        fx.tick();
    }

    if fx.engine().current().is_some() {
        warn!(rendered, "达到帧数上限时效果仍在运行");
    }
    info!(rendered, repaints = widget.repaints.get(), "渲染完成");
    Ok(())
}
