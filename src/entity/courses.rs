//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub academic_subject_id: i64,
    pub org_office_id: i64,
    pub lecturer_ids: String,   // JSON: [1, 2]
    pub student_ids: String,    // JSON: [3, 4]
    pub start_date: String,     // YYYY-MM-DD
    pub total_number_of_lessons: i32,
    pub weekly_pattern: String, // JSON: [{ day_of_week, start_clock, end_clock }]
    pub tuition_fee: Option<f64>,
    pub publication_state: String,
    pub created_by: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orgs::Entity",
        from = "Column::OrgId",
        to = "super::orgs::Column::Id"
    )]
    Org,
    #[sea_orm(has_many = "super::lessons::Entity")]
    Lessons,
    #[sea_orm(has_many = "super::content_items::Entity")]
    ContentItems,
}

impl Related<super::orgs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Org.def()
    }
}

impl Related<super::lessons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lessons.def()
    }
}

impl Related<super::content_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_course(self) -> crate::errors::Result<crate::models::courses::entities::Course> {
        use crate::models::courses::entities::Course;

        let start_date = chrono::NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d")?;

        Ok(Course {
            id: self.id,
            org_id: self.org_id,
            code: self.code,
            name: self.name,
            description: self.description,
            academic_subject_id: self.academic_subject_id,
            org_office_id: self.org_office_id,
            lecturer_ids: super::decode_json("courses.lecturer_ids", &self.lecturer_ids)?,
            student_ids: super::decode_json("courses.student_ids", &self.student_ids)?,
            start_date,
            total_number_of_lessons: self.total_number_of_lessons.max(0) as u32,
            weekly_pattern: super::decode_json("courses.weekly_pattern", &self.weekly_pattern)?,
            tuition_fee: self.tuition_fee,
            publication_state: super::decode_enum(
                "courses.publication_state",
                &self.publication_state,
            )?,
            created_by: self.created_by,
            created_at: super::from_timestamp(self.created_at),
            updated_at: super::from_timestamp(self.updated_at),
        })
    }
}
