// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：核心业务实体和数据结构
/// - 服务（services）：发现、下载编排与战役控制
///
/// 领域层只依赖引擎层的抽象接口，不依赖任何具体的
/// 浏览器或下载实现，便于用内存替身进行测试。
pub mod models;
pub mod services;
