//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::encode_json;
use crate::errors::{AcademyError, Result};
use crate::models::{
    PublicationState,
    courses::{entities::Course, requests::NewCourse},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, course: NewCourse) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let total = i32::try_from(course.total_number_of_lessons)
            .map_err(|_| AcademyError::validation("total_number_of_lessons is too large"))?;

        let model = ActiveModel {
            org_id: Set(course.org_id),
            code: Set(course.code),
            name: Set(course.name),
            description: Set(course.description),
            academic_subject_id: Set(course.academic_subject_id),
            org_office_id: Set(course.org_office_id),
            lecturer_ids: Set(encode_json(&course.lecturer_ids)?),
            // 新课程学生名单为空
            student_ids: Set("[]".to_string()),
            start_date: Set(course.start_date.format("%Y-%m-%d").to_string()),
            total_number_of_lessons: Set(total),
            weekly_pattern: Set(encode_json(&course.weekly_pattern)?),
            tuition_fee: Set(course.tuition_fee),
            publication_state: Set(PublicationState::Draft.to_string()),
            created_by: Set(course.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // (org_id, code) 唯一索引兜底并发创建
        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AcademyError::conflict("COURSE_CODE_EXISTED")
            }
            _ => AcademyError::database_operation(format!("创建课程失败: {e}")),
        })?;

        result.into_course()
    }

    /// 通过 ID 获取课程
    pub async fn get_course_impl(&self, org_id: i64, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .filter(Column::OrgId.eq(org_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课程失败: {e}")))?;

        result.map(|m| m.into_course()).transpose()
    }

    /// 课程代码在机构内是否已存在
    pub async fn course_code_exists_impl(&self, org_id: i64, code: &str) -> Result<bool> {
        let count = Courses::find()
            .filter(Column::OrgId.eq(org_id))
            .filter(Column::Code.eq(code))
            .count(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询课程代码失败: {e}")))?;

        Ok(count > 0)
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, org_id: i64, course_id: i64) -> Result<bool> {
        let result = Courses::delete_many()
            .filter(Column::Id.eq(course_id))
            .filter(Column::OrgId.eq(org_id))
            .exec(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
