//! 课次存储操作

use super::SeaOrmStorage;
use crate::entity::encode_json;
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::errors::{AcademyError, Result};
use crate::models::lessons::{
    entities::Lesson,
    requests::{LessonChanges, NewLesson},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建课次
    pub async fn create_lesson_impl(&self, lesson: NewLesson) -> Result<Lesson> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            org_id: Set(lesson.org_id),
            course_id: Set(lesson.course_id),
            start_time: Set(lesson.start_time.timestamp()),
            end_time: Set(lesson.end_time.timestamp()),
            description: Set(lesson.description),
            publication_state: Set(lesson.publication_state.to_string()),
            absent_student_ids: Set("[]".to_string()),
            lecturer_comment: Set(None),
            content: Set(encode_json(&lesson.content)?),
            created_by: Set(lesson.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("创建课次失败: {e}")))?;

        result.into_lesson()
    }

    /// 通过 ID 获取课次
    pub async fn get_lesson_impl(&self, org_id: i64, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .filter(Column::OrgId.eq(org_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课次失败: {e}")))?;

        result.map(|m| m.into_lesson()).transpose()
    }

    /// 列出课程的全部课次
    pub async fn list_course_lessons_impl(
        &self,
        org_id: i64,
        course_id: i64,
    ) -> Result<Vec<Lesson>> {
        let models = Lessons::find()
            .filter(Column::OrgId.eq(org_id))
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课次列表失败: {e}")))?;

        models.into_iter().map(|m| m.into_lesson()).collect()
    }

    /// 更新课次
    pub async fn update_lesson_impl(
        &self,
        org_id: i64,
        lesson_id: i64,
        changes: LessonChanges,
    ) -> Result<Option<Lesson>> {
        // 先检查课次是否存在
        if self.get_lesson_impl(org_id, lesson_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(lesson_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(start_time) = changes.start_time {
            model.start_time = Set(start_time.timestamp());
        }
        if let Some(end_time) = changes.end_time {
            model.end_time = Set(end_time.timestamp());
        }
        if let Some(description) = changes.description {
            model.description = Set(Some(description));
        }
        if let Some(state) = changes.publication_state {
            model.publication_state = Set(state.to_string());
        }
        if let Some(comment) = changes.lecturer_comment {
            model.lecturer_comment = Set(Some(comment));
        }
        if let Some(absent) = changes.absent_student_ids {
            model.absent_student_ids = Set(encode_json(&absent)?);
        }
        if let Some(content) = changes.content {
            model.content = Set(encode_json(&content)?);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("更新课次失败: {e}")))?;

        self.get_lesson_impl(org_id, lesson_id).await
    }

    /// 删除课次
    pub async fn delete_lesson_impl(&self, org_id: i64, lesson_id: i64) -> Result<bool> {
        let result = Lessons::delete_many()
            .filter(Column::Id.eq(lesson_id))
            .filter(Column::OrgId.eq(org_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除课次失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
