#[cfg(test)]
mod tests {
    use crate::domain::models::download::DownloadOutcome;
    use crate::domain::services::download_service::DownloadService;
    use crate::engines::traits::{DownloadError, MediaDownloader};
    use crate::utils::retry_policy::RetryPolicy;
    use async_trait::async_trait;
    use mockall::mock;
    use std::path::Path;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    mock! {
        pub Downloader {}

        #[async_trait]
        impl MediaDownloader for Downloader {
            async fn download(&self, url: &str, save_dir: &Path) -> Result<(), DownloadError>;
        }
    }

    fn flat_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::fixed(max_attempts, Duration::from_secs(3))
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_stops_immediately() {
        let mut downloader = MockDownloader::new();
        downloader.expect_download().times(1).returning(|_, _| Ok(()));

        let service = DownloadService::new(Arc::new(downloader), flat_policy(3));
        let result = service
            .process_item("https://example.com/video/1", Path::new("videos/a"))
            .await;

        assert_eq!(result.outcome, DownloadOutcome::Saved);
        assert_eq!(result.attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fails_twice_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let seen = calls.clone();

        let mut downloader = MockDownloader::new();
        downloader.expect_download().times(3).returning(move |_, _| {
            if seen.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(DownloadError::Failed("HTTP Error 429".to_string()))
            } else {
                Ok(())
            }
        });

        let service = DownloadService::new(Arc::new(downloader), flat_policy(3));
        let start = tokio::time::Instant::now();
        let result = service
            .process_item("https://example.com/video/1", Path::new("videos/a"))
            .await;

        assert_eq!(result.outcome, DownloadOutcome::Saved);
        assert_eq!(result.attempts, 3);
        // 两次 3 秒冷却
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_marks_skipped_without_raising() {
        let mut downloader = MockDownloader::new();
        downloader
            .expect_download()
            .times(3)
            .returning(|_, _| Err(DownloadError::Failed("not a video".to_string())));

        let service = DownloadService::new(Arc::new(downloader), flat_policy(3));
        let start = tokio::time::Instant::now();
        let result = service
            .process_item("https://example.com/video/1", Path::new("videos/a"))
            .await;

        assert_eq!(result.outcome, DownloadOutcome::Skipped);
        assert_eq!(result.attempts, 3);
        // 最后一次失败后不再冷却
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt_policy() {
        let mut downloader = MockDownloader::new();
        downloader
            .expect_download()
            .times(1)
            .returning(|_, _| Err(DownloadError::Failed("boom".to_string())));

        let service = DownloadService::new(Arc::new(downloader), flat_policy(1));
        let result = service
            .process_item("https://example.com/video/1", Path::new("videos/a"))
            .await;

        assert_eq!(result.outcome, DownloadOutcome::Skipped);
        assert_eq!(result.attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exponential_policy_is_drop_in() {
        let mut policy =
            RetryPolicy::exponential(3, Duration::from_secs(1), Duration::from_secs(60));
        policy.enable_jitter = false;

        let mut downloader = MockDownloader::new();
        downloader
            .expect_download()
            .times(3)
            .returning(|_, _| Err(DownloadError::Failed("boom".to_string())));

        let service = DownloadService::new(Arc::new(downloader), policy);
        let start = tokio::time::Instant::now();
        let result = service
            .process_item("https://example.com/video/1", Path::new("videos/a"))
            .await;

        assert_eq!(result.outcome, DownloadOutcome::Skipped);
        // 冷却 1s + 2s
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }
}
