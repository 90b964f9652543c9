//! 课次实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub course_id: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub description: Option<String>,
    pub publication_state: String,
    pub absent_student_ids: String, // JSON: [1, 2]
    pub lecturer_comment: Option<String>,
    pub content: String, // JSON: LessonContent
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_lesson(self) -> crate::errors::Result<crate::models::lessons::entities::Lesson> {
        use crate::models::lessons::entities::Lesson;

        Ok(Lesson {
            id: self.id,
            org_id: self.org_id,
            course_id: self.course_id,
            start_time: super::from_timestamp(self.start_time),
            end_time: super::from_timestamp(self.end_time),
            description: self.description,
            publication_state: super::decode_enum(
                "lessons.publication_state",
                &self.publication_state,
            )?,
            absent_student_ids: super::decode_json(
                "lessons.absent_student_ids",
                &self.absent_student_ids,
            )?,
            lecturer_comment: self.lecturer_comment,
            content: super::decode_json("lessons.content", &self.content)?,
            created_by: self.created_by,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        })
    }
}
