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

use crate::config::settings::{DiscoverySettings, PacingSettings};
use crate::domain::models::campaign::DiscoveredItems;
use crate::domain::models::keyword::Keyword;
use crate::engines::traits::{BrowserPage, EngineError};
use crate::utils::pacer::Pacer;
use tracing::{info, instrument};

/// 链接发现服务
///
/// 驱动一个页面完成关键词搜索、滚动触发的懒加载与
/// 链接提取，产出有界、有序、去重的条目 URL 集合。
/// 导航或查询失败不在本层重试，直接向上传播并中止
/// 当前战役。
pub struct DiscoveryService {
    settings: DiscoverySettings,
    pacing: PacingSettings,
    pacer: Pacer,
}

impl DiscoveryService {
    /// 创建新的链接发现服务实例
    pub fn new(settings: DiscoverySettings, pacing: PacingSettings) -> Self {
        Self {
            settings,
            pacing,
            pacer: Pacer::new(),
        }
    }

    /// 构建关键词的搜索 URL（百分号编码）
    pub(crate) fn search_url(&self, keyword: &Keyword) -> String {
        format!(
            "{}{}",
            self.settings.search_url,
            urlencoding::encode(keyword.as_str())
        )
    }

    /// 发现关键词对应的条目链接
    ///
    /// 无匹配条目不是错误，返回空集合。
    #[instrument(skip(self, page), fields(keyword = %keyword))]
    pub async fn discover(
        &self,
        page: &dyn BrowserPage,
        keyword: &Keyword,
    ) -> Result<DiscoveredItems, EngineError> {
        let url = self.search_url(keyword);
        info!("Navigating to search page: {}", url);
        page.goto(&url).await?;

        // Give dynamic content time to start rendering
        self.pacer.wait(self.pacing.after_navigation).await;

        for _ in 0..self.settings.scroll_steps {
            page.scroll_by(0, self.settings.scroll_delta_px).await?;
            self.pacer.wait(self.pacing.between_scrolls).await;
        }

        let elements = page.query_all(&self.settings.item_selector).await?;
        let max = self.settings.max_items_per_keyword;

        // The scan window is bounded by element position, not by the
        // unique count: a duplicate consumes its slot.
        let mut items = DiscoveredItems::with_capacity(max);
        for element in elements.iter().take(max) {
            if let Some(href) = element.attribute("href").await? {
                if !href.is_empty() {
                    items.insert(href);
                }
            }
        }

        info!("Discovered {} unique items", items.len());
        Ok(items)
    }
}
