use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 发布状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/common.ts")]
pub enum PublicationState {
    #[default]
    Draft, // 草稿
    Published, // 已发布
}

impl PublicationState {
    pub const DRAFT: &'static str = "draft";
    pub const PUBLISHED: &'static str = "published";

    pub fn is_published(&self) -> bool {
        matches!(self, PublicationState::Published)
    }
}

impl<'de> Deserialize<'de> for PublicationState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的发布状态: '{s}'. 支持的状态: draft, published"
            ))
        })
    }
}

impl std::fmt::Display for PublicationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublicationState::Draft => write!(f, "{}", Self::DRAFT),
            PublicationState::Published => write!(f, "{}", Self::PUBLISHED),
        }
    }
}

impl std::str::FromStr for PublicationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::DRAFT => Ok(PublicationState::Draft),
            Self::PUBLISHED => Ok(PublicationState::Published),
            _ => Err(format!("Invalid publication state: {s}")),
        }
    }
}
