//! 外部目录数据（机构、账号、学科、校区）
//!
//! 由外围的教务 CRUD 系统维护，排课引擎只读。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PublicationState;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/directory.ts")]
pub struct Org {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/directory.ts")]
pub struct Account {
    pub id: i64,
    pub org_id: i64,
    pub display_name: String,
    // 角色名称列表，优先级由角色目录解析
    pub roles: Vec<String>,
}

impl Account {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/directory.ts")]
pub struct AcademicSubject {
    pub id: i64,
    pub org_id: i64,
    pub name: String,
    pub publication_state: PublicationState,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/directory.ts")]
pub struct OrgOffice {
    pub id: i64,
    pub org_id: i64,
    pub name: String,
}
