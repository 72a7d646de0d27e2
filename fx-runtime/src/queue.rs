//! # Queue 模块
//!
//! 按优先级排序的效果请求队列。队首即当前应当播放的效果。
//!
//! 插入是稳定的优先级排序：同优先级的请求按插入顺序排队。
//! 同一种效果类型在队列中至多存在一个请求。

use crate::effect::{EffectKind, EffectRequest};

/// 效果请求队列
#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    items: Vec<EffectRequest>,
}

impl EffectQueue {
    /// 创建空队列
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入请求
    ///
    /// # 返回
    /// - `true`: 插入成功
    /// - `false`: 已存在同类型请求（去重），队列不变
    pub fn insert(&mut self, request: EffectRequest) -> bool {
        if self.contains(request.kind) {
            return false;
        }
        let priority = request.kind.priority();
        let pos = self
            .items
            .iter()
            .position(|r| r.kind.priority() < priority)
            .unwrap_or(self.items.len());
        self.items.insert(pos, request);
        true
    }

    /// 移除指定类型的请求
    pub fn remove(&mut self, kind: EffectKind) -> Option<EffectRequest> {
        let pos = self.items.iter().position(|r| r.kind == kind)?;
        Some(self.items.remove(pos))
    }

    /// 队首请求
    pub fn head(&self) -> Option<&EffectRequest> {
        self.items.first()
    }

    /// 队首效果类型
    pub fn head_kind(&self) -> Option<EffectKind> {
        self.items.first().map(|r| r.kind)
    }

    /// 是否包含指定类型
    pub fn contains(&self, kind: EffectKind) -> bool {
        self.items.iter().any(|r| r.kind == kind)
    }

    /// 获取指定类型请求的可变引用
    pub fn get_mut(&mut self, kind: EffectKind) -> Option<&mut EffectRequest> {
        self.items.iter_mut().find(|r| r.kind == kind)
    }

    /// 队列长度
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 按队列顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &EffectRequest> {
        self.items.iter()
    }

    /// 按队列顺序列出效果类型
    pub fn kinds(&self) -> Vec<EffectKind> {
        self.items.iter().map(|r| r.kind).collect()
    }

    /// 队列是否按优先级非升序排列
    pub fn is_sorted(&self) -> bool {
        self.items
            .windows(2)
            .all(|w| w[0].kind.priority() >= w[1].kind.priority())
    }
}
