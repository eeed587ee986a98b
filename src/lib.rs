// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体和领域服务
pub mod domain;

/// 引擎模块
///
/// 实现浏览器自动化引擎与媒体下载引擎
pub mod engines;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
