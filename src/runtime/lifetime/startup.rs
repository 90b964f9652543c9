use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::{CourseLocks, CourseService, LessonService, RoleAuthority, RoleCatalog};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub lessons: Arc<LessonService>,
    pub courses: Arc<CourseService>,
}

/// 构建角色目录，未配置角色时使用内置层级
fn build_role_catalog(config: &AppConfig) -> Result<RoleCatalog> {
    if config.roles.is_empty() {
        debug!("No roles configured, using built-in role hierarchy");
        return Ok(RoleCatalog::default());
    }

    let catalog = RoleCatalog::from_definitions(&config.roles)?;
    warn!("Loaded {} role definitions from configuration", config.roles.len());
    Ok(catalog)
}

/// 组装排课服务
pub fn build_services(storage: Arc<dyn Storage>, config: &AppConfig) -> Result<StartupContext> {
    let authority = RoleAuthority::new(build_role_catalog(config)?);
    let locks = Arc::new(CourseLocks::new());

    let lessons = Arc::new(LessonService::new(
        storage.clone(),
        authority.clone(),
        locks,
        config.scheduling.clone(),
    ));
    let courses = Arc::new(CourseService::new(
        storage.clone(),
        authority,
        lessons.clone(),
    ));

    Ok(StartupContext {
        storage,
        lessons,
        courses,
    })
}

/// 准备服务器启动的上下文
/// 包括存储和排课服务
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    let context = build_services(storage, config).expect("Failed to build scheduling services");
    warn!("Lesson and course services initialized");

    context
}
