// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::Settings;
use crate::domain::models::campaign::{Campaign, CampaignReport, RunReport};
use crate::domain::models::keyword::Keyword;
use crate::domain::services::discovery_service::DiscoveryService;
use crate::domain::services::download_service::DownloadService;
use crate::engines::traits::{BrowserEngine, BrowsingContext, ViewportSize};
use crate::utils::pacer::Pacer;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// 战役控制器
///
/// 按顺序迭代关键词列表，为每个关键词管理会话生命周期：
/// 打开隔离的浏览上下文 → 链接发现 → 逐条目下载编排 →
/// 关闭上下文 → 战役间节奏等待。单个战役的会话故障只
/// 中止该关键词，不影响后续关键词。
pub struct CampaignService {
    settings: Settings,
    engine: Arc<dyn BrowserEngine>,
    discovery: DiscoveryService,
    downloads: DownloadService,
    pacer: Pacer,
}

impl CampaignService {
    /// 创建新的战役控制器实例
    pub fn new(
        settings: Settings,
        engine: Arc<dyn BrowserEngine>,
        discovery: DiscoveryService,
        downloads: DownloadService,
    ) -> Self {
        Self {
            settings,
            engine,
            discovery,
            downloads,
            pacer: Pacer::new(),
        }
    }

    /// 运行全部关键词战役
    ///
    /// 返回整次运行的汇总报告。没有部分运行的续传状态；
    /// 重新运行依赖下载引擎的 skip_existing 行为保持幂等。
    pub async fn run(&self) -> Result<RunReport> {
        let started_at = Utc::now();
        let keywords: Vec<Keyword> = self
            .settings
            .keywords
            .iter()
            .map(|k| Keyword::new(k.clone()))
            .collect();

        let total = keywords.len();
        let mut campaigns = Vec::with_capacity(total);
        let mut aborted = 0;

        for (index, keyword) in keywords.iter().enumerate() {
            info!("===== KEYWORD: {} =====", keyword);

            match self.run_campaign(keyword).await {
                Ok(report) => campaigns.push(report),
                Err(e) => {
                    // A bad session aborts only this keyword's campaign.
                    error!("Campaign for '{}' aborted: {:#}", keyword, e);
                    aborted += 1;
                }
            }

            if index + 1 < total {
                self.pacer.wait(self.settings.pacing.between_campaigns).await;
            }
        }

        let report = RunReport {
            started_at,
            finished_at: Utc::now(),
            campaigns,
            aborted,
        };
        info!(
            "[DONE] All keywords processed: {} saved, {} skipped, {} campaigns aborted",
            report.total_saved(),
            report.total_skipped(),
            report.aborted
        );
        Ok(report)
    }

    /// 运行单个关键词的战役
    #[instrument(skip(self), fields(keyword = %keyword))]
    async fn run_campaign(&self, keyword: &Keyword) -> Result<CampaignReport> {
        let save_dir = Path::new(&self.settings.storage.base_dir).join(keyword.slug());
        tokio::fs::create_dir_all(&save_dir)
            .await
            .with_context(|| format!("creating save directory {}", save_dir.display()))?;

        let viewport = ViewportSize {
            width: self.settings.browser.viewport_width,
            height: self.settings.browser.viewport_height,
        };
        let context = self
            .engine
            .new_context(viewport, &self.settings.browser.user_agent)
            .await?;
        debug!("Opened browsing context {}", context.id());

        let result = self
            .run_campaign_in_context(keyword, save_dir, context.as_ref())
            .await;

        // The context is closed before the next keyword starts,
        // whatever the campaign outcome was.
        if let Err(e) = context.close().await {
            warn!("Failed to close browsing context {}: {}", context.id(), e);
        }

        result
    }

    async fn run_campaign_in_context(
        &self,
        keyword: &Keyword,
        save_dir: PathBuf,
        context: &dyn BrowsingContext,
    ) -> Result<CampaignReport> {
        let page = context.new_page().await?;

        let mut campaign = Campaign::new(keyword.clone(), save_dir);
        campaign.items = self.discovery.discover(page.as_ref(), keyword).await?;
        info!(
            campaign_id = %campaign.id,
            "Found {} items for '{}'",
            campaign.items.len(),
            keyword
        );

        let mut saved = 0;
        let mut skipped = 0;
        for url in campaign.items.iter() {
            let result = self.downloads.process_item(url, &campaign.save_dir).await;
            if result.is_saved() {
                saved += 1;
            } else {
                skipped += 1;
            }
            // Paced after every item, whatever the outcome.
            self.pacer.wait(self.settings.pacing.between_items).await;
        }

        Ok(campaign.report(saved, skipped))
    }
}
