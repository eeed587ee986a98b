#[cfg(test)]
mod tests {
    use crate::config::settings::DownloadSettings;
    use crate::engines::traits::{DownloadError, MediaDownloader};
    use crate::engines::ytdlp_engine::YtdlpEngine;
    use std::path::Path;

    fn test_settings() -> DownloadSettings {
        DownloadSettings {
            binary: "yt-dlp".to_string(),
            format: "bestvideo+bestaudio/best".to_string(),
            merge_format: "mp4".to_string(),
            max_attempts: 3,
            retry_delay_secs: 3.0,
            skip_existing: true,
        }
    }

    #[test]
    fn test_build_args_output_template_and_policy() {
        let engine = YtdlpEngine::new(test_settings());
        let args = engine.build_args("https://example.com/video/42", Path::new("videos/cats"));
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        let output_pos = args.iter().position(|a| a == "--output").unwrap();
        assert!(args[output_pos + 1].starts_with("videos/cats"));
        assert!(args[output_pos + 1].ends_with("%(id)s.%(ext)s"));

        let format_pos = args.iter().position(|a| a == "--format").unwrap();
        assert_eq!(args[format_pos + 1], "bestvideo+bestaudio/best");

        let merge_pos = args.iter().position(|a| a == "--merge-output-format").unwrap();
        assert_eq!(args[merge_pos + 1], "mp4");

        assert!(args.contains(&"--no-playlist".to_string()));
        assert!(args.contains(&"--quiet".to_string()));
        assert!(args.contains(&"--no-warnings".to_string()));

        // URL 必须是最后一个参数
        assert_eq!(args.last().unwrap(), "https://example.com/video/42");
    }

    #[test]
    fn test_build_args_skip_existing_flag() {
        let mut settings = test_settings();
        settings.skip_existing = false;

        let engine = YtdlpEngine::new(settings);
        let args = engine.build_args("https://example.com/video/1", Path::new("videos"));
        assert!(!args.iter().any(|a| a == "--no-overwrites"));

        let engine = YtdlpEngine::new(test_settings());
        let args = engine.build_args("https://example.com/video/1", Path::new("videos"));
        assert!(args.iter().any(|a| a == "--no-overwrites"));
    }

    #[tokio::test]
    async fn test_download_missing_binary_is_spawn_error() {
        let mut settings = test_settings();
        settings.binary = "definitely-not-a-real-binary-grabrs".to_string();

        let engine = YtdlpEngine::new(settings);
        let dir = tempfile::tempdir().unwrap();
        let result = engine
            .download("https://example.com/video/1", dir.path())
            .await;

        assert!(matches!(result, Err(DownloadError::SpawnFailed(_))));
    }
}
