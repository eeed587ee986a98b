// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了
/// 发现与下载管线的业务规则，只依赖引擎层的抽象接口。
///
/// 包含的服务：
/// - 战役服务（campaign_service）：按关键词顺序编排整次运行
/// - 发现服务（discovery_service）：搜索页导航、滚动与链接提取
/// - 下载服务（download_service）：带重试策略的逐条目下载编排
pub mod campaign_service;
pub mod discovery_service;
pub mod download_service;
#[cfg(test)]
mod download_service_test;
