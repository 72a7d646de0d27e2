//! # Effect 模块
//!
//! 效果类型、效果风格与效果请求定义。
//! 这是效果优先级、默认循环次数与风格编号的**唯一来源**。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StyleError;

/// 效果类型
///
/// ## 语义说明
///
/// - `Opening` / `Closing`：程序启动 / 关闭
/// - `Hover`：鼠标悬停
/// - `Launching`：程序正在启动中
/// - `Attention`：窗口请求注意
/// - `Desaturate`：去饱和（如最小化的窗口）
/// - `None`：无效果，永远不会进入队列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    /// 无效果
    None,
    /// 打开
    Opening,
    /// 关闭
    Closing,
    /// 悬停
    Hover,
    /// 启动中
    Launching,
    /// 请求注意
    Attention,
    /// 去饱和
    Desaturate,
}

impl EffectKind {
    /// 所有可入队的效果类型
    pub const QUEUEABLE: [EffectKind; 6] = [
        EffectKind::Opening,
        EffectKind::Closing,
        EffectKind::Hover,
        EffectKind::Launching,
        EffectKind::Attention,
        EffectKind::Desaturate,
    ];

    /// 静态优先级，数值越大越优先
    ///
    /// Closing > Opening > Launching > Attention > Hover > 其它
    pub fn priority(self) -> u8 {
        match self {
            EffectKind::Closing => 5,
            EffectKind::Opening => 4,
            EffectKind::Launching => 3,
            EffectKind::Attention => 2,
            EffectKind::Hover => 1,
            EffectKind::Desaturate | EffectKind::None => 0,
        }
    }

    /// `start(kind)` 使用的默认循环次数（0 = 无限循环，直到 `stop`）
    pub fn default_loops(self) -> u32 {
        match self {
            EffectKind::Opening | EffectKind::Closing | EffectKind::Launching => 1,
            _ => 0,
        }
    }

    /// 效果名称（小写）
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::None => "none",
            EffectKind::Opening => "opening",
            EffectKind::Closing => "closing",
            EffectKind::Hover => "hover",
            EffectKind::Launching => "launching",
            EffectKind::Attention => "attention",
            EffectKind::Desaturate => "desaturate",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(EffectKind::None),
            "opening" | "open" => Ok(EffectKind::Opening),
            "closing" | "close" => Ok(EffectKind::Closing),
            "hover" => Ok(EffectKind::Hover),
            "launching" | "launch" => Ok(EffectKind::Launching),
            "attention" => Ok(EffectKind::Attention),
            "desaturate" => Ok(EffectKind::Desaturate),
            _ => Err(StyleError::UnknownKind { name: s.to_string() }),
        }
    }
}

/// 效果风格
///
/// 每种效果类型可以独立选择一种风格；风格决定具体播放哪个动画状态机。
/// 数值编号与打包配置值中的半字节一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectStyle {
    /// 经典弹跳
    #[default]
    Classic,
    /// 淡入淡出
    Fade,
    /// 聚光灯
    Spotlight,
    /// 缩放
    Zoom,
    /// 挤压
    Squish,
    /// 翻转
    Turn,
    /// 3D 聚光灯翻转
    #[serde(rename = "spotlight3d")]
    Spotlight3d,
    /// 发光
    Glow,
    /// 简约
    Simple,
    /// 不播放动画
    None,
}

impl EffectStyle {
    /// 从打包配置中的编号解析
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(EffectStyle::Classic),
            1 => Some(EffectStyle::Fade),
            2 => Some(EffectStyle::Spotlight),
            3 => Some(EffectStyle::Zoom),
            4 => Some(EffectStyle::Squish),
            5 => Some(EffectStyle::Turn),
            6 => Some(EffectStyle::Spotlight3d),
            7 => Some(EffectStyle::Glow),
            8 => Some(EffectStyle::Simple),
            15 => Some(EffectStyle::None),
            _ => None,
        }
    }

    /// 打包配置中的编号
    pub fn code(self) -> u32 {
        match self {
            EffectStyle::Classic => 0,
            EffectStyle::Fade => 1,
            EffectStyle::Spotlight => 2,
            EffectStyle::Zoom => 3,
            EffectStyle::Squish => 4,
            EffectStyle::Turn => 5,
            EffectStyle::Spotlight3d => 6,
            EffectStyle::Glow => 7,
            EffectStyle::Simple => 8,
            EffectStyle::None => 15,
        }
    }
}

impl FromStr for EffectStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" | "bounce" => Ok(EffectStyle::Classic),
            "fade" => Ok(EffectStyle::Fade),
            "spotlight" => Ok(EffectStyle::Spotlight),
            "zoom" => Ok(EffectStyle::Zoom),
            "squish" => Ok(EffectStyle::Squish),
            "turn" => Ok(EffectStyle::Turn),
            "spotlight3d" => Ok(EffectStyle::Spotlight3d),
            "glow" => Ok(EffectStyle::Glow),
            "simple" => Ok(EffectStyle::Simple),
            "none" => Ok(EffectStyle::None),
            _ => Err(StyleError::UnknownStyleName {
                name: s.to_string(),
            }),
        }
    }
}

/// 每种效果类型各自选择的风格
///
/// `Desaturate` 没有风格可选，始终使用去饱和动画。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EffectStyles {
    #[serde(default)]
    pub hover: EffectStyle,
    #[serde(default)]
    pub opening: EffectStyle,
    #[serde(default)]
    pub closing: EffectStyle,
    #[serde(default)]
    pub launching: EffectStyle,
    #[serde(default)]
    pub attention: EffectStyle,
}

/// 打包值中各效果类型占用的半字节位置（从低位开始）
const PACKED_ORDER: [EffectKind; 5] = [
    EffectKind::Hover,
    EffectKind::Opening,
    EffectKind::Closing,
    EffectKind::Launching,
    EffectKind::Attention,
];

impl EffectStyles {
    /// 所有效果类型使用同一种风格
    pub fn uniform(style: EffectStyle) -> Self {
        Self {
            hover: style,
            opening: style,
            closing: style,
            launching: style,
            attention: style,
        }
    }

    /// 从打包值解析
    ///
    /// 每种效果类型占 4 位：hover 0-3、opening 4-7、closing 8-11、
    /// launching 12-15、attention 16-19。
    pub fn from_packed(packed: u32) -> Result<Self, StyleError> {
        let mut styles = Self::default();
        for (i, kind) in PACKED_ORDER.iter().enumerate() {
            let value = (packed >> (i * 4)) & 0xF;
            let style =
                EffectStyle::from_code(value).ok_or(StyleError::UnknownStyle { kind: *kind, value })?;
            styles.set(*kind, style);
        }
        Ok(styles)
    }

    /// 编码为打包值
    pub fn to_packed(&self) -> u32 {
        PACKED_ORDER
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                let code = self.get(*kind).map(EffectStyle::code).unwrap_or(0);
                code << (i * 4)
            })
            .fold(0, |acc, v| acc | v)
    }

    /// 查询某效果类型的风格；`Desaturate` / `None` 没有风格
    pub fn get(&self, kind: EffectKind) -> Option<EffectStyle> {
        match kind {
            EffectKind::Hover => Some(self.hover),
            EffectKind::Opening => Some(self.opening),
            EffectKind::Closing => Some(self.closing),
            EffectKind::Launching => Some(self.launching),
            EffectKind::Attention => Some(self.attention),
            EffectKind::Desaturate | EffectKind::None => None,
        }
    }

    /// 设置某效果类型的风格（对没有风格的类型忽略）
    pub fn set(&mut self, kind: EffectKind, style: EffectStyle) {
        match kind {
            EffectKind::Hover => self.hover = style,
            EffectKind::Opening => self.opening = style,
            EffectKind::Closing => self.closing = style,
            EffectKind::Launching => self.launching = style,
            EffectKind::Attention => self.attention = style,
            EffectKind::Desaturate | EffectKind::None => {}
        }
    }
}

/// 效果请求
///
/// 由 `start_ex` 创建，归效果队列所有；自然结束或 `stop` 时销毁。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectRequest {
    /// 效果类型
    pub kind: EffectKind,
    /// 剩余循环次数，0 表示无限
    pub max_loops: u32,
    /// 是否发出 animation-start 通知（发出后清除）
    pub emit_start: bool,
    /// 是否发出 animation-end 通知（发出后清除）
    pub emit_end: bool,
}

impl EffectRequest {
    /// 创建效果请求
    pub fn new(kind: EffectKind, max_loops: u32, emit_start: bool, emit_end: bool) -> Self {
        Self {
            kind,
            max_loops,
            emit_start,
            emit_end,
        }
    }

    /// 取出 start 通知标记，保证每个请求至多通知一次
    pub fn take_start_signal(&mut self) -> bool {
        std::mem::take(&mut self.emit_start)
    }

    /// 取出 end 通知标记
    pub fn take_end_signal(&mut self) -> bool {
        std::mem::take(&mut self.emit_end)
    }

    /// 完成一轮循环
    ///
    /// # 返回
    /// 有限循环次数是否已用完
    pub fn complete_loop(&mut self) -> bool {
        if self.max_loops > 0 {
            self.max_loops -= 1;
            return self.max_loops == 0;
        }
        false
    }
}
