// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 条目的最终下载结果
///
/// 重试耗尽与"非视频条目"不作区分，均归类为 Skipped。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadOutcome {
    /// 已成功保存到目标目录
    Saved,
    /// 重试耗尽后跳过
    Skipped,
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DownloadOutcome::Saved => write!(f, "saved"),
            DownloadOutcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// 单个条目的处理结果
///
/// 尝试次数仅用于即时的控制决策与上报，不做持久化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemResult {
    /// 最终结果分类
    pub outcome: DownloadOutcome,
    /// 实际执行的尝试次数
    pub attempts: u32,
}

impl ItemResult {
    pub fn is_saved(&self) -> bool {
        self.outcome == DownloadOutcome::Saved
    }
}
