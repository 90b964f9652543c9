use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::{
    contents::{entities::ContentItem, requests::NewContentItem},
    courses::{entities::Course, requests::NewCourse},
    directory::entities::{AcademicSubject, Account, OrgOffice},
    lessons::{
        entities::Lesson,
        requests::{LessonChanges, NewLesson},
    },
};

use crate::errors::Result;

pub mod memory_storage;
pub mod sea_orm_storage;

/// 排课引擎依赖的全部持久化操作
///
/// 机构、账号、学科、校区由外围系统维护，这里只读；
/// 课程、课次、教学内容由排课引擎写入，删除仅用于失败补偿。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 外部目录查询
    // 机构是否存在
    async fn org_exists(&self, org_id: i64) -> Result<bool>;
    // 获取机构内账号（含角色）
    async fn get_account(&self, org_id: i64, account_id: i64) -> Result<Option<Account>>;
    // 获取学科（含发布状态）
    async fn get_academic_subject(
        &self,
        org_id: i64,
        subject_id: i64,
    ) -> Result<Option<AcademicSubject>>;
    // 获取校区
    async fn get_org_office(&self, org_id: i64, office_id: i64) -> Result<Option<OrgOffice>>;

    /// 课程管理方法
    // 创建课程（学生名单为空，状态为草稿）
    async fn create_course(&self, course: NewCourse) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course(&self, org_id: i64, course_id: i64) -> Result<Option<Course>>;
    // 课程代码在机构内是否已存在
    async fn course_code_exists(&self, org_id: i64, code: &str) -> Result<bool>;
    // 删除课程
    async fn delete_course(&self, org_id: i64, course_id: i64) -> Result<bool>;

    /// 课次管理方法
    // 创建课次
    async fn create_lesson(&self, lesson: NewLesson) -> Result<Lesson>;
    // 通过ID获取课次
    async fn get_lesson(&self, org_id: i64, lesson_id: i64) -> Result<Option<Lesson>>;
    // 列出课程的全部课次，按开始时间、ID 升序
    async fn list_course_lessons(&self, org_id: i64, course_id: i64) -> Result<Vec<Lesson>>;
    // 更新课次
    async fn update_lesson(
        &self,
        org_id: i64,
        lesson_id: i64,
        changes: LessonChanges,
    ) -> Result<Option<Lesson>>;
    // 删除课次
    async fn delete_lesson(&self, org_id: i64, lesson_id: i64) -> Result<bool>;

    /// 教学内容管理方法
    // 创建教学内容
    async fn create_content_item(&self, item: NewContentItem) -> Result<ContentItem>;
    // 通过ID获取教学内容
    async fn get_content_item(&self, org_id: i64, item_id: i64) -> Result<Option<ContentItem>>;
    // 列出课程的全部教学内容，按 ID 升序
    async fn list_course_content_items(
        &self,
        org_id: i64,
        course_id: i64,
    ) -> Result<Vec<ContentItem>>;
    // 删除教学内容
    async fn delete_content_item(&self, org_id: i64, item_id: i64) -> Result<bool>;
}

/// 根据数据库 URL 选择存储后端
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let config = AppConfig::get();

    if config.database.url.starts_with(memory_storage::MEMORY_URL_SCHEME) {
        let storage = match &config.database.seed_file {
            Some(path) => memory_storage::MemoryStorage::from_seed_file(path)?,
            None => memory_storage::MemoryStorage::new(),
        };
        return Ok(Arc::new(storage));
    }

    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    if let Some(path) = &config.database.seed_file {
        storage
            .load_seed(memory_storage::DirectorySeed::from_file(path)?)
            .await?;
    }
    Ok(Arc::new(storage))
}
