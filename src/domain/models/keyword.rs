// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 搜索关键词
///
/// 表示一次战役的搜索词条。身份由文本精确相等决定，
/// 在进程启动时提供，运行期间不可变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keyword(String);

impl Keyword {
    /// 创建新的关键词
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// 关键词原文
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 生成文件系统安全的目录名
    ///
    /// 确定性转换：小写化，空白字符替换为下划线，
    /// 路径分隔符被剔除。
    pub fn slug(&self) -> String {
        self.0
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .filter(|c| *c != '/' && *c != '\\' && *c != '\0')
            .collect()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Keyword {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}
