pub(crate) mod conflict;
pub mod create;
pub mod generate;
pub(crate) mod recurrence;
pub mod update;

use std::sync::Arc;

use crate::config::SchedulingConfig;
use crate::errors::{AcademyError, Result};
use crate::models::lessons::{
    entities::Lesson,
    requests::{CreateLessonInput, GenerateLessonsInput, UpdateLessonInput},
    responses::GeneratedLessons,
};
use crate::services::course_locks::CourseLocks;
use crate::services::roles::RoleAuthority;
use crate::storage::Storage;

use conflict::Boundary;
use recurrence::Recurrence;

pub struct LessonService {
    storage: Arc<dyn Storage>,
    authority: RoleAuthority,
    locks: Arc<CourseLocks>,
    settings: SchedulingConfig,
}

impl LessonService {
    pub fn new(
        storage: Arc<dyn Storage>,
        authority: RoleAuthority,
        locks: Arc<CourseLocks>,
        settings: SchedulingConfig,
    ) -> Self {
        Self {
            storage,
            authority,
            locks,
            settings,
        }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub(crate) fn authority(&self) -> &RoleAuthority {
        &self.authority
    }

    pub(crate) fn locks(&self) -> &CourseLocks {
        &self.locks
    }

    pub(crate) fn settings(&self) -> &SchedulingConfig {
        &self.settings
    }

    pub(crate) fn boundary(&self) -> Boundary {
        Boundary::from_flag(self.settings.inclusive_boundaries)
    }

    pub(crate) fn recurrence(&self) -> Result<Recurrence> {
        let offset = self.settings.offset().ok_or_else(|| {
            AcademyError::validation(format!(
                "Invalid scheduling offset: {} minutes",
                self.settings.utc_offset_minutes
            ))
        })?;

        Ok(Recurrence {
            offset,
            scan_weeks_per_lesson: self.settings.scan_weeks_per_lesson,
        })
    }

    // 创建单个课次
    pub async fn create_lesson(
        &self,
        actor_id: i64,
        org_id: i64,
        input: CreateLessonInput,
    ) -> Result<Lesson> {
        create::create_lesson(self, actor_id, org_id, input).await
    }

    // 修改课次
    pub async fn update_lesson(
        &self,
        actor_id: i64,
        org_id: i64,
        lesson_id: i64,
        input: UpdateLessonInput,
    ) -> Result<Lesson> {
        update::update_lesson(self, actor_id, org_id, lesson_id, input).await
    }

    // 按每周课表批量生成课次
    pub async fn generate_lessons(
        &self,
        actor_id: i64,
        org_id: i64,
        course_id: i64,
        input: GenerateLessonsInput,
    ) -> Result<GeneratedLessons> {
        generate::generate_lessons(self, actor_id, org_id, course_id, input).await
    }
}
