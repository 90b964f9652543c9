//! 校区实体（外部目录，只读）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "org_offices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_org_office(self) -> crate::models::directory::entities::OrgOffice {
        use crate::models::directory::entities::OrgOffice;

        OrgOffice {
            id: self.id,
            org_id: self.org_id,
            name: self.name,
        }
    }
}
