use super::entities::{ContentItem, ContentKind};
use crate::models::PublicationState;

// 新教学内容（用于存储层）
#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub org_id: i64,
    pub course_id: i64,
    pub kind: ContentKind,
    pub title: String,
    pub description: Option<String>,
    pub publication_state: PublicationState,
    pub attributes: serde_json::Value,
    pub created_by: i64,
}

impl NewContentItem {
    /// 以已有内容为模板，生成绑定到另一课程的副本
    pub fn copy_of(item: &ContentItem, course_id: i64, created_by: i64) -> Self {
        Self {
            org_id: item.org_id,
            course_id,
            kind: item.kind,
            title: item.title.clone(),
            description: item.description.clone(),
            publication_state: item.publication_state,
            attributes: item.attributes.clone(),
            created_by,
        }
    }
}
