// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::keyword::Keyword;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

/// 战役实体
///
/// 一个（关键词，保存目录）配对，作用域为一个隔离的
/// 浏览上下文。战役独占其发现的条目集合；上下文在所有
/// 条目处理完毕后关闭。
#[derive(Debug)]
pub struct Campaign {
    /// 战役唯一标识符
    pub id: Uuid,
    /// 搜索关键词
    pub keyword: Keyword,
    /// 本战役的保存目录
    pub save_dir: PathBuf,
    /// 发现阶段收集到的条目集合
    pub items: DiscoveredItems,
}

impl Campaign {
    /// 创建新的战役实例
    pub fn new(keyword: Keyword, save_dir: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            keyword,
            save_dir,
            items: DiscoveredItems::default(),
        }
    }

    /// 生成战役报告
    pub fn report(&self, saved: usize, skipped: usize) -> CampaignReport {
        CampaignReport {
            keyword: self.keyword.clone(),
            discovered: self.items.len(),
            saved,
            skipped,
        }
    }
}

/// 有序去重的条目集合
///
/// 对发现顺序保持稳定的集合语义：首次出现者保留，
/// 同一 URL 不会出现两次。
#[derive(Debug, Default)]
pub struct DiscoveredItems {
    urls: Vec<String>,
}

impl DiscoveredItems {
    /// 创建带预分配容量的空集合
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            urls: Vec::with_capacity(capacity),
        }
    }

    /// 追加一个 URL
    ///
    /// 已存在时不追加，返回 false。
    pub fn insert(&mut self, url: String) -> bool {
        if self.urls.iter().any(|existing| *existing == url) {
            return false;
        }
        self.urls.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|existing| existing == url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// 按发现顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

}

/// 单个战役的统计报告
#[derive(Debug, Clone, Serialize)]
pub struct CampaignReport {
    /// 关键词
    pub keyword: Keyword,
    /// 发现的条目数
    pub discovered: usize,
    /// 成功保存的条目数
    pub saved: usize,
    /// 跳过的条目数
    pub skipped: usize,
}

/// 整次运行的汇总报告
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// 运行开始时间
    pub started_at: DateTime<Utc>,
    /// 运行结束时间
    pub finished_at: DateTime<Utc>,
    /// 各战役的报告，按关键词顺序
    pub campaigns: Vec<CampaignReport>,
    /// 因会话故障整体中止的战役数
    pub aborted: usize,
}

impl RunReport {
    pub fn total_saved(&self) -> usize {
        self.campaigns.iter().map(|c| c.saved).sum()
    }

    pub fn total_skipped(&self) -> usize {
        self.campaigns.iter().map(|c| c.skipped).sum()
    }

    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovered_items_dedup_preserves_order() {
        let mut items = DiscoveredItems::with_capacity(4);

        assert!(items.insert("/video/1".to_string()));
        assert!(!items.insert("/video/1".to_string()));
        assert!(items.insert("/video/2".to_string()));

        assert_eq!(items.len(), 2);
        assert!(items.contains("/video/1"));
        let urls: Vec<&str> = items.iter().collect();
        assert_eq!(urls, vec!["/video/1", "/video/2"]);
    }

    #[test]
    fn test_campaign_report_counts() {
        let mut campaign = Campaign::new(Keyword::new("a"), PathBuf::from("videos/a"));
        campaign.items.insert("/video/1".to_string());
        campaign.items.insert("/video/2".to_string());

        let report = campaign.report(1, 1);
        assert_eq!(report.discovered, 2);
        assert_eq!(report.saved, 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_run_report_totals() {
        let report = RunReport {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            campaigns: vec![
                CampaignReport {
                    keyword: Keyword::new("a"),
                    discovered: 3,
                    saved: 2,
                    skipped: 1,
                },
                CampaignReport {
                    keyword: Keyword::new("b"),
                    discovered: 1,
                    saved: 0,
                    skipped: 1,
                },
            ],
            aborted: 1,
        };

        assert_eq!(report.total_saved(), 2);
        assert_eq!(report.total_skipped(), 2);
    }
}
