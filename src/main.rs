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

use grabrs::config::settings::Settings;
use grabrs::domain::services::campaign_service::CampaignService;
use grabrs::domain::services::discovery_service::DiscoveryService;
use grabrs::domain::services::download_service::DownloadService;
use grabrs::engines::chromium_engine::ChromiumEngine;
use grabrs::engines::traits::BrowserEngine;
use grabrs::engines::ytdlp_engine::YtdlpEngine;
use grabrs::utils::retry_policy::RetryPolicy;
use grabrs::utils::telemetry;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动运行
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting grabrs...");

    // 2. Load and validate configuration before opening any session
    let settings = Settings::new()?;
    settings.validate()?;
    info!(
        "Configuration loaded: {} keywords, max {} items each",
        settings.keywords.len(),
        settings.discovery.max_items_per_keyword
    );

    // 3. Ensure the base save directory exists
    tokio::fs::create_dir_all(&settings.storage.base_dir).await?;

    // 4. Launch the browser
    let engine = Arc::new(ChromiumEngine::launch(&settings.browser).await?);

    // 5. Initialize Components
    let downloader = Arc::new(YtdlpEngine::new(settings.download.clone()));
    let policy = RetryPolicy::fixed(
        settings.download.max_attempts,
        Duration::from_secs_f64(settings.download.retry_delay_secs),
    );
    let discovery = DiscoveryService::new(settings.discovery.clone(), settings.pacing.clone());
    let downloads = DownloadService::new(downloader, policy);
    let controller = CampaignService::new(settings, engine.clone(), discovery, downloads);

    // 6. Run all campaigns
    let report = controller.run().await?;

    engine.close().await?;
    info!("Run report: {}", serde_json::to_string(&report)?);
    info!(
        "Run finished in {}s: {} campaigns, {} saved, {} skipped, {} aborted",
        report.duration().num_seconds(),
        report.campaigns.len(),
        report.total_saved(),
        report.total_skipped(),
        report.aborted
    );
    Ok(())
}
