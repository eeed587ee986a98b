// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// 延迟区间（秒）
///
/// 描述一次随机等待的上下界，两端均为闭区间。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DelayRange {
    /// 最小等待时间（秒）
    pub min_secs: f64,
    /// 最大等待时间（秒）
    pub max_secs: f64,
}

impl DelayRange {
    /// 创建新的延迟区间
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// 区间是否合法（非负且上界不小于下界）
    pub fn is_valid(&self) -> bool {
        self.min_secs >= 0.0 && self.max_secs >= self.min_secs
    }
}

/// 节奏控制器
///
/// 在敏感操作之间插入随机等待，模拟人工浏览节奏，
/// 避免触发平台的限流与自动化检测。
#[derive(Debug, Clone, Copy, Default)]
pub struct Pacer;

impl Pacer {
    /// 创建新的节奏控制器实例
    pub fn new() -> Self {
        Self
    }

    /// 从区间内均匀采样一个等待时长
    ///
    /// 采样与休眠分离，便于单元测试。退化区间（上界不大于
    /// 下界）直接返回下界。
    pub fn sample(&self, range: DelayRange) -> Duration {
        if range.max_secs <= range.min_secs {
            return Duration::from_secs_f64(range.min_secs.max(0.0));
        }
        let secs = rand::random_range(range.min_secs..=range.max_secs);
        Duration::from_secs_f64(secs)
    }

    /// 随机等待
    ///
    /// 挂起当前流程一段从 `[min, max]` 均匀抽取的时长。
    /// 无返回值，无失败模式。
    pub async fn wait(&self, range: DelayRange) {
        let delay = self.sample(range);
        debug!("Pacing for {:.2}s", delay.as_secs_f64());
        sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_within_bounds() {
        let pacer = Pacer::new();
        let range = DelayRange::new(2.0, 3.0);

        for _ in 0..1000 {
            let delay = pacer.sample(range);
            assert!(delay >= Duration::from_secs_f64(2.0));
            assert!(delay <= Duration::from_secs_f64(3.0));
        }
    }

    #[test]
    fn test_sample_degenerate_range() {
        let pacer = Pacer::new();

        let delay = pacer.sample(DelayRange::new(3.0, 3.0));
        assert_eq!(delay, Duration::from_secs_f64(3.0));

        // 上界小于下界时退化为下界
        let delay = pacer.sample(DelayRange::new(5.0, 1.0));
        assert_eq!(delay, Duration::from_secs_f64(5.0));
    }

    #[test]
    fn test_range_validity() {
        assert!(DelayRange::new(4.0, 6.0).is_valid());
        assert!(DelayRange::new(0.0, 0.0).is_valid());
        assert!(!DelayRange::new(6.0, 4.0).is_valid());
        assert!(!DelayRange::new(-1.0, 4.0).is_valid());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_advances_clock() {
        let pacer = Pacer::new();
        let start = tokio::time::Instant::now();

        pacer.wait(DelayRange::new(2.0, 2.0)).await;

        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }
}
