use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PublicationState;

// 教学内容类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub enum ContentKind {
    ClassworkMaterial,   // 课堂资料
    ClassworkAssignment, // 课堂作业
    Quiz,                // 测验
}

impl ContentKind {
    pub const CLASSWORK_MATERIAL: &'static str = "classwork_material";
    pub const CLASSWORK_ASSIGNMENT: &'static str = "classwork_assignment";
    pub const QUIZ: &'static str = "quiz";

    pub fn all() -> &'static [ContentKind] {
        &[
            ContentKind::ClassworkMaterial,
            ContentKind::ClassworkAssignment,
            ContentKind::Quiz,
        ]
    }
}

impl<'de> Deserialize<'de> for ContentKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的内容类型: '{s}'. 支持的类型: classwork_material, classwork_assignment, quiz"
            ))
        })
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::ClassworkMaterial => write!(f, "{}", Self::CLASSWORK_MATERIAL),
            ContentKind::ClassworkAssignment => write!(f, "{}", Self::CLASSWORK_ASSIGNMENT),
            ContentKind::Quiz => write!(f, "{}", Self::QUIZ),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::CLASSWORK_MATERIAL => Ok(ContentKind::ClassworkMaterial),
            Self::CLASSWORK_ASSIGNMENT => Ok(ContentKind::ClassworkAssignment),
            Self::QUIZ => Ok(ContentKind::Quiz),
            _ => Err(format!("Invalid content kind: {s}")),
        }
    }
}

// 课堂资料、课堂作业或测验
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/content.ts")]
pub struct ContentItem {
    pub id: i64,
    pub org_id: i64,
    // 所属课程
    pub course_id: i64,
    pub kind: ContentKind,
    pub title: String,
    pub description: Option<String>,
    pub publication_state: PublicationState,
    // 类型相关的标量属性（满分、时长、附件链接等），复制时原样拷贝
    pub attributes: serde_json::Value,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
