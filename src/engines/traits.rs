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

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 浏览器引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 浏览器启动失败
    #[error("Browser launch failed: {0}")]
    LaunchFailed(String),
    /// 导航失败
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),
    /// 元素查询失败
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 视口尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

/// 浏览器引擎特质
///
/// 核心只依赖这组窄接口；导航与查询失败以错误形式向上
/// 传播，由战役控制器决定处置方式。
#[async_trait]
pub trait BrowserEngine: Send + Sync {
    /// 创建隔离的浏览上下文（独立 cookie 与身份）
    async fn new_context(
        &self,
        viewport: ViewportSize,
        user_agent: &str,
    ) -> Result<Box<dyn BrowsingContext>, EngineError>;

    /// 关闭浏览器
    async fn close(&self) -> Result<(), EngineError>;
}

/// 浏览上下文特质
#[async_trait]
pub trait BrowsingContext: Send + Sync {
    /// 上下文标识符，用于验证战役间的会话隔离
    fn id(&self) -> &str;

    /// 打开新页面
    async fn new_page(&self) -> Result<Box<dyn BrowserPage>, EngineError>;

    /// 关闭上下文及其全部页面
    async fn close(&self) -> Result<(), EngineError>;
}

/// 页面特质
#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// 导航到指定 URL，等待基础文档就绪（无需全部资源加载完成）
    async fn goto(&self, url: &str) -> Result<(), EngineError>;

    /// 按像素增量滚动页面
    async fn scroll_by(&self, dx: i64, dy: i64) -> Result<(), EngineError>;

    /// 按选择器查询全部元素，按文档顺序返回
    async fn query_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>, EngineError>;
}

/// 页面元素特质
#[async_trait]
pub trait PageElement: Send + Sync {
    /// 读取属性值，属性不存在时返回 None
    async fn attribute(&self, name: &str) -> Result<Option<String>, EngineError>;
}

/// 下载引擎错误类型
#[derive(Error, Debug)]
pub enum DownloadError {
    /// 下载器进程启动失败
    #[error("Downloader spawn failed: {0}")]
    SpawnFailed(#[from] std::io::Error),
    /// 下载失败
    #[error("Download failed: {0}")]
    Failed(String),
}

/// 媒体下载引擎特质
///
/// 成功时下载器将以平台条目标识命名的文件写入 `save_dir`，
/// 音视频合并为单一容器格式。
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// 下载单个媒体条目到目标目录
    async fn download(&self, url: &str, save_dir: &Path) -> Result<(), DownloadError>;
}
