//! Moderation Context - 严重等级

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 敏感内容严重等级
///
/// 权重固定绑定在等级上，编译期确定，不可修改：
/// - MILD = 1
/// - MODERATE = 2
/// - SEVERE = 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityLevel {
    Mild,
    Moderate,
    Severe,
}

impl SeverityLevel {
    /// 所有等级（从轻到重）
    pub const ALL: [SeverityLevel; 3] = [Self::Mild, Self::Moderate, Self::Severe];

    /// 每次命中的权重
    pub const fn weight(self) -> u32 {
        match self {
            Self::Mild => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "MILD",
            Self::Moderate => "MODERATE",
            Self::Severe => "SEVERE",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MILD" => Ok(Self::Mild),
            "MODERATE" => Ok(Self::Moderate),
            "SEVERE" => Ok(Self::Severe),
            other => Err(format!("未知的严重等级: {}", other)),
        }
    }
}
