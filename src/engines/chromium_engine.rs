// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::BrowserSettings;
use crate::engines::traits::{
    BrowserEngine, BrowserPage, BrowsingContext, EngineError, PageElement, ViewportSize,
};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Chromium引擎
///
/// 基于chromiumoxide实现的浏览器自动化引擎。
/// 启动时注入反自动化检测参数，按战役创建隔离的
/// 浏览上下文（CDP browser context，独立 cookie 与缓存）。
pub struct ChromiumEngine {
    // close 需要 &mut Browser，用 Mutex 保护句柄；
    // 运行模型本身是单流程的，不存在跨战役并发。
    browser: Arc<Mutex<Browser>>,
    handler: JoinHandle<()>,
}

impl ChromiumEngine {
    /// 启动浏览器进程
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, EngineError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(Duration::from_secs(30))
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");

        if !settings.headless {
            builder = builder.with_head();
        }

        let config = builder.build().map_err(EngineError::LaunchFailed)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| EngineError::LaunchFailed(e.to_string()))?;

        // Spawn a handler to process browser events
        let handler = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        info!("Chromium launched (headless: {})", settings.headless);

        Ok(Self {
            browser: Arc::new(Mutex::new(browser)),
            handler,
        })
    }
}

#[async_trait]
impl BrowserEngine for ChromiumEngine {
    async fn new_context(
        &self,
        viewport: ViewportSize,
        user_agent: &str,
    ) -> Result<Box<dyn BrowsingContext>, EngineError> {
        let context_id = {
            let browser = self.browser.lock().await;
            browser
                .execute(CreateBrowserContextParams::default())
                .await
                .map_err(|e| EngineError::Other(format!("Failed to create context: {}", e)))?
                .result
                .browser_context_id
        };

        let id = Uuid::new_v4().to_string();
        debug!("Created browsing context {}", id);

        Ok(Box::new(ChromiumContext {
            id,
            context_id,
            browser: self.browser.clone(),
            viewport,
            user_agent: user_agent.to_string(),
        }))
    }

    async fn close(&self) -> Result<(), EngineError> {
        {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?;
            browser
                .wait()
                .await
                .map_err(|e| EngineError::Other(e.to_string()))?;
        }
        self.handler.abort();
        info!("Chromium closed");
        Ok(())
    }
}

/// Chromium浏览上下文
struct ChromiumContext {
    id: String,
    context_id: BrowserContextId,
    browser: Arc<Mutex<Browser>>,
    viewport: ViewportSize,
    user_agent: String,
}

#[async_trait]
impl BrowsingContext for ChromiumContext {
    fn id(&self) -> &str {
        &self.id
    }

    async fn new_page(&self) -> Result<Box<dyn BrowserPage>, EngineError> {
        let params = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(self.context_id.clone())
            .build()
            .map_err(EngineError::Other)?;

        let page = {
            let browser = self.browser.lock().await;
            browser
                .new_page(params)
                .await
                .map_err(|e| EngineError::Other(format!("Failed to open page: {}", e)))?
        };

        page.set_user_agent(&self.user_agent)
            .await
            .map_err(|e| EngineError::Other(e.to_string()))?;

        let metrics = SetDeviceMetricsOverrideParams::builder()
            .width(self.viewport.width as i64)
            .height(self.viewport.height as i64)
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(EngineError::Other)?;
        page.execute(metrics)
            .await
            .map_err(|e| EngineError::Other(e.to_string()))?;

        Ok(Box::new(ChromiumPage { page }))
    }

    async fn close(&self) -> Result<(), EngineError> {
        // Disposing the context closes every page that belongs to it.
        let browser = self.browser.lock().await;
        browser
            .execute(DisposeBrowserContextParams::new(self.context_id.clone()))
            .await
            .map_err(|e| EngineError::Other(format!("Failed to dispose context: {}", e)))?;
        debug!("Disposed browsing context {}", self.id);
        Ok(())
    }
}

/// Chromium页面
struct ChromiumPage {
    page: Page,
}

#[async_trait]
impl BrowserPage for ChromiumPage {
    async fn goto(&self, url: &str) -> Result<(), EngineError> {
        // goto resolves once the document has loaded; dynamic content
        // is given time by the pacing layer afterwards.
        self.page
            .goto(url)
            .await
            .map_err(|e| EngineError::NavigationFailed(e.to_string()))?;
        Ok(())
    }

    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<(), EngineError> {
        let script = format!("window.scrollBy({}, {});", dx, dy);
        self.page
            .evaluate(script)
            .await
            .map_err(|e| EngineError::Other(format!("Scroll failed: {}", e)))?;
        Ok(())
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>, EngineError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(|e| EngineError::QueryFailed(e.to_string()))?;

        Ok(elements
            .into_iter()
            .map(|element| Box::new(ChromiumElement { element }) as Box<dyn PageElement>)
            .collect())
    }
}

/// Chromium页面元素
struct ChromiumElement {
    element: Element,
}

#[async_trait]
impl PageElement for ChromiumElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>, EngineError> {
        self.element
            .attribute(name)
            .await
            .map_err(|e| EngineError::QueryFailed(e.to_string()))
    }
}
