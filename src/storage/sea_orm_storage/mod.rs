//! SeaORM 存储实现
//!
//! 课程、课次、教学内容的数据库存储，支持 SQLite、PostgreSQL 和 MySQL。
//! 机构、账号、学科、校区表由外围系统写入，这里只读。

mod contents;
mod courses;
mod directory;
mod lessons;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{AcademyError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(database: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, database).await?
        } else {
            Self::connect_generic(&db_url, database).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AcademyError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL）
    async fn connect_sqlite(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AcademyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        // 内存数据库每个连接互相独立，只能使用单连接
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            database.pool_size
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(database.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(database.timeout))
            .acquire_timeout(Duration::from_secs(database.timeout))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| AcademyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AcademyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, memory:// 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    contents::{entities::ContentItem, requests::NewContentItem},
    courses::{entities::Course, requests::NewCourse},
    directory::entities::{AcademicSubject, Account, OrgOffice},
    lessons::{
        entities::Lesson,
        requests::{LessonChanges, NewLesson},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 目录模块
    async fn org_exists(&self, org_id: i64) -> Result<bool> {
        self.org_exists_impl(org_id).await
    }

    async fn get_account(&self, org_id: i64, account_id: i64) -> Result<Option<Account>> {
        self.get_account_impl(org_id, account_id).await
    }

    async fn get_academic_subject(
        &self,
        org_id: i64,
        subject_id: i64,
    ) -> Result<Option<AcademicSubject>> {
        self.get_academic_subject_impl(org_id, subject_id).await
    }

    async fn get_org_office(&self, org_id: i64, office_id: i64) -> Result<Option<OrgOffice>> {
        self.get_org_office_impl(org_id, office_id).await
    }

    // 课程模块
    async fn create_course(&self, course: NewCourse) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course(&self, org_id: i64, course_id: i64) -> Result<Option<Course>> {
        self.get_course_impl(org_id, course_id).await
    }

    async fn course_code_exists(&self, org_id: i64, code: &str) -> Result<bool> {
        self.course_code_exists_impl(org_id, code).await
    }

    async fn delete_course(&self, org_id: i64, course_id: i64) -> Result<bool> {
        self.delete_course_impl(org_id, course_id).await
    }

    // 课次模块
    async fn create_lesson(&self, lesson: NewLesson) -> Result<Lesson> {
        self.create_lesson_impl(lesson).await
    }

    async fn get_lesson(&self, org_id: i64, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_impl(org_id, lesson_id).await
    }

    async fn list_course_lessons(&self, org_id: i64, course_id: i64) -> Result<Vec<Lesson>> {
        self.list_course_lessons_impl(org_id, course_id).await
    }

    async fn update_lesson(
        &self,
        org_id: i64,
        lesson_id: i64,
        changes: LessonChanges,
    ) -> Result<Option<Lesson>> {
        self.update_lesson_impl(org_id, lesson_id, changes).await
    }

    async fn delete_lesson(&self, org_id: i64, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(org_id, lesson_id).await
    }

    // 教学内容模块
    async fn create_content_item(&self, item: NewContentItem) -> Result<ContentItem> {
        self.create_content_item_impl(item).await
    }

    async fn get_content_item(&self, org_id: i64, item_id: i64) -> Result<Option<ContentItem>> {
        self.get_content_item_impl(org_id, item_id).await
    }

    async fn list_course_content_items(
        &self,
        org_id: i64,
        course_id: i64,
    ) -> Result<Vec<ContentItem>> {
        self.list_course_content_items_impl(org_id, course_id).await
    }

    async fn delete_content_item(&self, org_id: i64, item_id: i64) -> Result<bool> {
        self.delete_content_item_impl(org_id, item_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("academy.db").unwrap(),
            "sqlite://academy.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/academy").unwrap(),
            "postgres://u:p@localhost/academy"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }
}
