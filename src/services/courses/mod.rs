pub mod clone;
pub mod create;
pub(crate) mod validate;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::{
    entities::Course,
    requests::{CloneCourseInput, CreateCourseInput},
};
use crate::services::lessons::LessonService;
use crate::services::roles::RoleAuthority;
use crate::storage::Storage;

pub struct CourseService {
    storage: Arc<dyn Storage>,
    authority: RoleAuthority,
    lessons: Arc<LessonService>,
}

impl CourseService {
    pub fn new(
        storage: Arc<dyn Storage>,
        authority: RoleAuthority,
        lessons: Arc<LessonService>,
    ) -> Self {
        Self {
            storage,
            authority,
            lessons,
        }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub(crate) fn authority(&self) -> &RoleAuthority {
        &self.authority
    }

    pub(crate) fn lessons(&self) -> &LessonService {
        &self.lessons
    }

    // 创建课程
    pub async fn create_course(
        &self,
        actor_id: i64,
        org_id: i64,
        input: CreateCourseInput,
    ) -> Result<Course> {
        create::create_course(self, actor_id, org_id, input).await
    }

    // 复制课程（含课次与教学内容）
    pub async fn clone_course(
        &self,
        actor_id: i64,
        org_id: i64,
        input: CloneCourseInput,
    ) -> Result<Course> {
        clone::clone_course(self, actor_id, org_id, input).await
    }
}
