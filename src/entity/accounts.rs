//! 账号实体（外部目录，只读）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub org_id: i64,
    pub display_name: String,
    pub roles: String, // JSON: ["admin", "lecturer"]
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_account(self) -> crate::errors::Result<crate::models::directory::entities::Account> {
        use crate::models::directory::entities::Account;

        Ok(Account {
            id: self.id,
            org_id: self.org_id,
            display_name: self.display_name,
            roles: super::decode_json("accounts.roles", &self.roles)?,
        })
    }
}
