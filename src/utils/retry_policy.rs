// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 重试策略配置
///
/// 注入到下载编排器中，决定每个条目允许的尝试次数
/// 以及两次尝试之间的冷却时长。固定延迟与指数退避
/// 可以互换，不影响编排逻辑。
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大尝试次数（含首次尝试）
    pub max_attempts: u32,
    /// 初始冷却时间
    pub initial_backoff: Duration,
    /// 最大冷却时间
    pub max_backoff: Duration,
    /// 退避乘数
    pub backoff_multiplier: f64,
    /// 抖动因子 (0.0-1.0)
    pub jitter_factor: f64,
    /// 是否启用指数退避
    pub exponential_backoff: bool,
    /// 是否启用抖动
    pub enable_jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // 默认策略：3 次尝试，固定 3 秒冷却
        Self::fixed(3, Duration::from_secs(3))
    }
}

impl RetryPolicy {
    /// 创建固定延迟策略（无抖动）
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff: delay,
            max_backoff: delay,
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
            exponential_backoff: false,
            enable_jitter: false,
        }
    }

    /// 创建指数退避策略（带抖动）
    pub fn exponential(max_attempts: u32, initial: Duration, max: Duration) -> Self {
        Self {
            max_attempts,
            initial_backoff: initial,
            max_backoff: max,
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
            exponential_backoff: true,
            enable_jitter: true,
        }
    }

    /// 判断在已尝试 `attempt` 次之后是否应继续重试
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// 计算第 `attempt` 次失败后的冷却时长
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        if !self.exponential_backoff {
            return self.initial_backoff;
        }

        let backoff_secs = self.initial_backoff.as_secs_f64()
            * self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);

        let capped_backoff = backoff_secs.min(self.max_backoff.as_secs_f64());

        let final_backoff = if self.enable_jitter {
            let jitter_range = capped_backoff * self.jitter_factor;
            if jitter_range > 0.0 {
                let jitter = rand::random_range(-jitter_range..jitter_range);
                (capped_backoff + jitter).max(0.0)
            } else {
                capped_backoff
            }
        } else {
            capped_backoff
        };

        Duration::from_secs_f64(final_backoff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_backoff_is_flat() {
        let policy = RetryPolicy::fixed(3, Duration::from_secs(3));

        assert_eq!(policy.backoff_for(1), Duration::from_secs(3));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(3));
        assert_eq!(policy.backoff_for(5), Duration::from_secs(3));
    }

    #[test]
    fn test_exponential_backoff_growth() {
        let mut policy =
            RetryPolicy::exponential(5, Duration::from_secs(1), Duration::from_secs(60));
        policy.enable_jitter = false; // 禁用抖动以获得精确值

        assert_eq!(policy.backoff_for(1), Duration::from_secs(1));
        assert_eq!(policy.backoff_for(2), Duration::from_secs(2)); // 1 * 2^1
        assert_eq!(policy.backoff_for(3), Duration::from_secs(4)); // 1 * 2^2
    }

    #[test]
    fn test_backoff_max_limit() {
        let mut policy =
            RetryPolicy::exponential(10, Duration::from_secs(1), Duration::from_secs(5));
        policy.enable_jitter = false;

        // 超过上限时被截断
        assert_eq!(policy.backoff_for(10), Duration::from_secs(5));
    }

    #[test]
    fn test_backoff_with_jitter_bounds() {
        let policy = RetryPolicy::exponential(5, Duration::from_secs(2), Duration::from_secs(60));

        for _ in 0..100 {
            let backoff = policy.backoff_for(2);
            // 4 秒 ±10% 抖动
            assert!(backoff >= Duration::from_secs_f64(3.6));
            assert!(backoff <= Duration::from_secs_f64(4.4));
        }
    }

    #[test]
    fn test_should_retry() {
        let policy = RetryPolicy::fixed(3, Duration::from_secs(3));

        assert!(policy.should_retry(0));
        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3)); // max_attempts = 3
        assert!(!policy.should_retry(4));
    }
}
