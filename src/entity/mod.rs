//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 列表类字段（ID 列表、每周课表、课次内容）以 JSON 文本存储。

pub mod prelude;

pub mod academic_subjects;
pub mod accounts;
pub mod content_items;
pub mod courses;
pub mod lessons;
pub mod org_offices;
pub mod orgs;

use crate::errors::{AcademyError, Result};

/// 解析 JSON 文本列
pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(column: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| AcademyError::serialization(format!("列 {column} 解析失败: {e}")))
}

/// 编码 JSON 文本列
pub(crate) fn encode_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// 时间戳（秒）转换为 UTC 时间
pub(crate) fn from_timestamp(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// 解析枚举文本列
pub(crate) fn decode_enum<T: std::str::FromStr<Err = String>>(column: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|e: String| AcademyError::serialization(format!("列 {column} 解析失败: {e}")))
}
