//! 学科实体（外部目录，只读）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academic_subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub name: String,
    pub publication_state: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_academic_subject(
        self,
    ) -> crate::errors::Result<crate::models::directory::entities::AcademicSubject> {
        use crate::models::directory::entities::AcademicSubject;

        Ok(AcademicSubject {
            id: self.id,
            org_id: self.org_id,
            name: self.name,
            publication_state: super::decode_enum(
                "academic_subjects.publication_state",
                &self.publication_state,
            )?,
        })
    }
}
