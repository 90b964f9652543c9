//! 教学内容实体（课堂资料、课堂作业、测验共用一张表）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "content_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub course_id: i64,
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub publication_state: String,
    pub attributes: String, // JSON object
    pub created_by: i64,
    pub created_at: i64,
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
    pub fn into_content_item(
        self,
    ) -> crate::errors::Result<crate::models::contents::entities::ContentItem> {
        use crate::models::contents::entities::ContentItem;

        Ok(ContentItem {
            id: self.id,
            org_id: self.org_id,
            course_id: self.course_id,
            kind: super::decode_enum("content_items.kind", &self.kind)?,
            title: self.title,
            description: self.description,
            publication_state: super::decode_enum(
                "content_items.publication_state",
                &self.publication_state,
            )?,
            attributes: super::decode_json("content_items.attributes", &self.attributes)?,
            created_by: self.created_by,
            created_at: super::from_timestamp(self.created_at),
        })
    }
}
