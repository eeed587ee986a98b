// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DownloadSettings;
use crate::engines::traits::{DownloadError, MediaDownloader};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// yt-dlp 下载引擎
///
/// 以子进程方式驱动 yt-dlp 可执行文件。输出以平台条目
/// 标识命名（`%(id)s.%(ext)s`），请求最优的音视频合并流，
/// 无合并流时回退到最优单流。
pub struct YtdlpEngine {
    settings: DownloadSettings,
}

impl YtdlpEngine {
    /// 创建新的下载引擎实例
    pub fn new(settings: DownloadSettings) -> Self {
        Self { settings }
    }

    /// 构建 yt-dlp 调用参数
    pub(crate) fn build_args(&self, url: &str, save_dir: &Path) -> Vec<OsString> {
        let template = save_dir.join("%(id)s.%(ext)s");

        let mut args: Vec<OsString> = vec![
            "--output".into(),
            template.into_os_string(),
            "--format".into(),
            self.settings.format.clone().into(),
            "--merge-output-format".into(),
            self.settings.merge_format.clone().into(),
            "--no-playlist".into(),
            "--quiet".into(),
            "--no-warnings".into(),
        ];

        if self.settings.skip_existing {
            // Reruns leave already-saved files untouched.
            args.push("--no-overwrites".into());
        }

        args.push(url.into());
        args
    }
}

#[async_trait]
impl MediaDownloader for YtdlpEngine {
    async fn download(&self, url: &str, save_dir: &Path) -> Result<(), DownloadError> {
        let args = self.build_args(url, save_dir);
        debug!("Invoking {} for {}", self.settings.binary, url);

        let output = Command::new(&self.settings.binary)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(DownloadError::Failed(summarize_stderr(&stderr)))
    }
}

/// 提取 stderr 中最后一行有效错误信息
fn summarize_stderr(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("downloader exited with non-zero status")
        .to_string()
}
