// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 关键词（keyword）：搜索词条及其目录名派生
/// - 战役（campaign）：一个关键词的完整发现与下载周期
/// - 下载（download）：条目下载结果的分类
///
/// 这些模型构成了系统的数据基础，定义了业务概念的
/// 结构和行为。
pub mod campaign;
pub mod download;
pub mod keyword;
