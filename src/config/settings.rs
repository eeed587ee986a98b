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

use crate::utils::pacer::DelayRange;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含关键词列表、发现、下载、节奏、浏览器与存储等
/// 所有配置项。加载后不可变，在构造时注入各个服务。
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 待处理的关键词列表，按顺序逐个执行
    pub keywords: Vec<String>,
    /// 链接发现配置
    pub discovery: DiscoverySettings,
    /// 下载配置
    pub download: DownloadSettings,
    /// 节奏控制配置
    pub pacing: PacingSettings,
    /// 浏览器配置
    pub browser: BrowserSettings,
    /// 存储配置
    pub storage: StorageSettings,
}

/// 链接发现配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySettings {
    /// 平台搜索端点，关键词经百分号编码后直接拼接
    pub search_url: String,
    /// 条目链接的CSS选择器
    pub item_selector: String,
    /// 每个关键词最多收集的条目数
    pub max_items_per_keyword: usize,
    /// 触发懒加载的滚动步数
    pub scroll_steps: u32,
    /// 每步滚动的像素增量
    pub scroll_delta_px: i64,
}

/// 下载配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadSettings {
    /// 下载器可执行文件
    pub binary: String,
    /// 格式策略
    pub format: String,
    /// 容器合并格式
    pub merge_format: String,
    /// 每个条目的最大尝试次数
    pub max_attempts: u32,
    /// 重试冷却时间（秒）
    pub retry_delay_secs: f64,
    /// 重复运行时是否跳过已存在的文件
    pub skip_existing: bool,
}

/// 节奏控制配置设置
///
/// 各区间相互独立可调。
#[derive(Debug, Clone, Deserialize)]
pub struct PacingSettings {
    /// 页面加载后、首次交互前
    pub after_navigation: DelayRange,
    /// 两次滚动之间
    pub between_scrolls: DelayRange,
    /// 两个条目之间
    pub between_items: DelayRange,
    /// 两个关键词战役之间
    pub between_campaigns: DelayRange,
}

/// 浏览器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// 是否无头模式
    pub headless: bool,
    /// 身份字符串（User-Agent）
    pub user_agent: String,
    /// 视口宽度
    pub viewport_width: u32,
    /// 视口高度
    pub viewport_height: u32,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 保存目录的基础路径，每个关键词一个子目录
    pub base_dir: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从配置文件与环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("keywords", Vec::<String>::new())?
            // Default discovery settings
            .set_default("discovery.search_url", "https://www.tiktok.com/search?q=")?
            .set_default("discovery.item_selector", "a[href*=\"/video/\"]")?
            .set_default("discovery.max_items_per_keyword", 10)?
            .set_default("discovery.scroll_steps", 4)?
            .set_default("discovery.scroll_delta_px", 3000)?
            // Default download settings
            .set_default("download.binary", "yt-dlp")?
            .set_default("download.format", "bestvideo+bestaudio/best")?
            .set_default("download.merge_format", "mp4")?
            .set_default("download.max_attempts", 3)?
            .set_default("download.retry_delay_secs", 3.0)?
            .set_default("download.skip_existing", true)?
            // Default pacing settings
            .set_default("pacing.after_navigation.min_secs", 4.0)?
            .set_default("pacing.after_navigation.max_secs", 6.0)?
            .set_default("pacing.between_scrolls.min_secs", 2.0)?
            .set_default("pacing.between_scrolls.max_secs", 3.0)?
            .set_default("pacing.between_items.min_secs", 4.0)?
            .set_default("pacing.between_items.max_secs", 7.0)?
            .set_default("pacing.between_campaigns.min_secs", 8.0)?
            .set_default("pacing.between_campaigns.max_secs", 12.0)?
            // Default browser settings
            .set_default("browser.headless", false)?
            .set_default(
                "browser.user_agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                 AppleWebKit/537.36 (KHTML, like Gecko) \
                 Chrome/120 Safari/537.36",
            )?
            .set_default("browser.viewport_width", 1280)?
            .set_default("browser.viewport_height", 800)?
            // Default storage settings
            .set_default("storage.base_dir", "videos")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("GRABRS").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 快速失败的配置校验
    ///
    /// 在打开任何浏览器会话之前执行。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keywords.is_empty() {
            return Err(ConfigError::Message("keyword list is empty".to_string()));
        }
        if self.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Message(
                "keyword list contains a blank entry".to_string(),
            ));
        }
        if self.storage.base_dir.trim().is_empty() {
            return Err(ConfigError::Message("storage.base_dir is empty".to_string()));
        }
        if self.discovery.max_items_per_keyword == 0 {
            return Err(ConfigError::Message(
                "discovery.max_items_per_keyword must be positive".to_string(),
            ));
        }
        if self.download.max_attempts == 0 {
            return Err(ConfigError::Message(
                "download.max_attempts must be positive".to_string(),
            ));
        }
        if self.download.retry_delay_secs < 0.0 {
            return Err(ConfigError::Message(
                "download.retry_delay_secs must not be negative".to_string(),
            ));
        }
        let ranges = [
            ("pacing.after_navigation", self.pacing.after_navigation),
            ("pacing.between_scrolls", self.pacing.between_scrolls),
            ("pacing.between_items", self.pacing.between_items),
            ("pacing.between_campaigns", self.pacing.between_campaigns),
        ];
        for (name, range) in ranges {
            if !range.is_valid() {
                return Err(ConfigError::Message(format!("{} range is invalid", name)));
            }
        }
        if self.browser.viewport_width == 0 || self.browser.viewport_height == 0 {
            return Err(ConfigError::Message(
                "browser viewport must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
