//! 教学内容存储操作

use super::SeaOrmStorage;
use crate::entity::content_items::{ActiveModel, Column, Entity as ContentItems};
use crate::entity::encode_json;
use crate::errors::{AcademyError, Result};
use crate::models::contents::{entities::ContentItem, requests::NewContentItem};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建教学内容
    pub async fn create_content_item_impl(&self, item: NewContentItem) -> Result<ContentItem> {
        let model = ActiveModel {
            org_id: Set(item.org_id),
            course_id: Set(item.course_id),
            kind: Set(item.kind.to_string()),
            title: Set(item.title),
            description: Set(item.description),
            publication_state: Set(item.publication_state.to_string()),
            attributes: Set(encode_json(&item.attributes)?),
            created_by: Set(item.created_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建教学内容失败: {e}")))?;

        result.into_content_item()
    }

    pub async fn get_content_item_impl(
        &self,
        org_id: i64,
        item_id: i64,
    ) -> Result<Option<ContentItem>> {
        let result = ContentItems::find_by_id(item_id)
            .filter(Column::OrgId.eq(org_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询教学内容失败: {e}")))?;

        result.map(|m| m.into_content_item()).transpose()
    }

    pub async fn list_course_content_items_impl(
        &self,
        org_id: i64,
        course_id: i64,
    ) -> Result<Vec<ContentItem>> {
        let models = ContentItems::find()
            .filter(Column::OrgId.eq(org_id))
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                AcademyError::database_operation(format!("查询教学内容列表失败: {e}"))
            })?;

        models.into_iter().map(|m| m.into_content_item()).collect()
    }

    pub async fn delete_content_item_impl(&self, org_id: i64, item_id: i64) -> Result<bool> {
        let result = ContentItems::delete_many()
            .filter(Column::Id.eq(item_id))
            .filter(Column::OrgId.eq(org_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除教学内容失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
