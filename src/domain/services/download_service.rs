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

use crate::domain::models::download::{DownloadOutcome, ItemResult};
use crate::engines::traits::MediaDownloader;
use crate::utils::retry_policy::RetryPolicy;
use std::path::Path;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

/// 下载编排服务
///
/// 对每个条目执行带重试的下载：首次成功即停止；
/// 失败按注入的重试策略冷却后再试；重试耗尽后标记
/// 为跳过并继续，从不升级为致命错误。
pub struct DownloadService {
    downloader: Arc<dyn MediaDownloader>,
    policy: RetryPolicy,
}

impl DownloadService {
    /// 创建新的下载编排服务实例
    ///
    /// # 参数
    ///
    /// * `downloader` - 下载引擎
    /// * `policy` - 重试策略
    pub fn new(downloader: Arc<dyn MediaDownloader>, policy: RetryPolicy) -> Self {
        Self { downloader, policy }
    }

    /// 处理单个条目
    ///
    /// 每次尝试、重试原因、保存与跳过均有日志，
    /// 不存在静默失败。
    #[instrument(skip(self, save_dir), fields(url = %url))]
    pub async fn process_item(&self, url: &str, save_dir: &Path) -> ItemResult {
        let mut attempt = 0;
        loop {
            attempt += 1;
            info!("Download attempt {} -> {}", attempt, url);

            match self.downloader.download(url, save_dir).await {
                Ok(()) => {
                    info!("Saved {}", url);
                    return ItemResult {
                        outcome: DownloadOutcome::Saved,
                        attempts: attempt,
                    };
                }
                Err(e) => {
                    warn!("Download attempt {} failed: {}", attempt, e);
                    if !self.policy.should_retry(attempt) {
                        // Unretrievable or not a video; either way not fatal.
                        info!("Skipping {} after {} attempts", url, attempt);
                        return ItemResult {
                            outcome: DownloadOutcome::Skipped,
                            attempts: attempt,
                        };
                    }
                    sleep(self.policy.backoff_for(attempt)).await;
                }
            }
        }
    }
}
