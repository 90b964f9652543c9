//! 外部目录查询（机构、账号、学科、校区）

use super::SeaOrmStorage;
use crate::entity::prelude::{AcademicSubjects, Accounts, OrgOffices, Orgs};
use crate::entity::{academic_subjects, accounts, encode_json, org_offices, orgs};
use crate::errors::{AcademyError, Result};
use crate::models::directory::entities::{AcademicSubject, Account, OrgOffice};
use crate::storage::memory_storage::DirectorySeed;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::info;

impl SeaOrmStorage {
    pub async fn org_exists_impl(&self, org_id: i64) -> Result<bool> {
        let result = Orgs::find_by_id(org_id)
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询机构失败: {e}")))?;

        Ok(result.is_some())
    }

    pub async fn get_account_impl(&self, org_id: i64, account_id: i64) -> Result<Option<Account>> {
        let result = Accounts::find_by_id(account_id)
            .filter(accounts::Column::OrgId.eq(org_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询账号失败: {e}")))?;

        result.map(|m| m.into_account()).transpose()
    }

    pub async fn get_academic_subject_impl(
        &self,
        org_id: i64,
        subject_id: i64,
    ) -> Result<Option<AcademicSubject>> {
        let result = AcademicSubjects::find_by_id(subject_id)
            .filter(academic_subjects::Column::OrgId.eq(org_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询学科失败: {e}")))?;

        result.map(|m| m.into_academic_subject()).transpose()
    }

    pub async fn get_org_office_impl(
        &self,
        org_id: i64,
        office_id: i64,
    ) -> Result<Option<OrgOffice>> {
        let result = OrgOffices::find_by_id(office_id)
            .filter(org_offices::Column::OrgId.eq(org_id))
            .one(&self.db)
            .await
            .map_err(|e| AcademyError::database_operation(format!("查询校区失败: {e}")))?;

        Ok(result.map(|m| m.into_org_office()))
    }

    /// 导入目录种子数据，已存在的 ID 跳过
    pub async fn load_seed(&self, seed: DirectorySeed) -> Result<()> {
        let mut inserted = 0usize;

        for org in seed.orgs {
            if Orgs::find_by_id(org.id).one(&self.db).await?.is_none() {
                orgs::ActiveModel {
                    id: Set(org.id),
                    name: Set(org.name),
                }
                .insert(&self.db)
                .await?;
                inserted += 1;
            }
        }

        for account in seed.accounts {
            if Accounts::find_by_id(account.id).one(&self.db).await?.is_none() {
                accounts::ActiveModel {
                    id: Set(account.id),
                    org_id: Set(account.org_id),
                    display_name: Set(account.display_name),
                    roles: Set(encode_json(&account.roles)?),
                }
                .insert(&self.db)
                .await?;
                inserted += 1;
            }
        }

        for subject in seed.academic_subjects {
            if AcademicSubjects::find_by_id(subject.id)
                .one(&self.db)
                .await?
                .is_none()
            {
                academic_subjects::ActiveModel {
                    id: Set(subject.id),
                    org_id: Set(subject.org_id),
                    name: Set(subject.name),
                    publication_state: Set(subject.publication_state.to_string()),
                }
                .insert(&self.db)
                .await?;
                inserted += 1;
            }
        }

        for office in seed.offices {
            if OrgOffices::find_by_id(office.id).one(&self.db).await?.is_none() {
                org_offices::ActiveModel {
                    id: Set(office.id),
                    org_id: Set(office.org_id),
                    name: Set(office.name),
                }
                .insert(&self.db)
                .await?;
                inserted += 1;
            }
        }

        info!("Directory seed imported: {} new records", inserted);
        Ok(())
    }
}
