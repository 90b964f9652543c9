use tracing::info;

use super::LessonService;
use super::conflict::{LessonWindow, TimeWindow, conflicts};
use crate::errors::{AcademyError, Result};
use crate::models::courses::entities::Course;
use crate::models::lessons::{
    entities::{Lesson, LessonContent},
    requests::{CreateLessonInput, NewLesson},
};

pub async fn create_lesson(
    service: &LessonService,
    actor_id: i64,
    org_id: i64,
    input: CreateLessonInput,
) -> Result<Lesson> {
    let _guard = service.locks().acquire(org_id, input.course_id).await;
    create_lesson_unlocked(service, actor_id, org_id, input).await
}

/// 单课次创建原语，调用方须已持有课程写锁
pub(crate) async fn create_lesson_unlocked(
    service: &LessonService,
    actor_id: i64,
    org_id: i64,
    input: CreateLessonInput,
) -> Result<Lesson> {
    let course = load_managed_course(service, actor_id, org_id, input.course_id).await?;

    let window = TimeWindow::new(input.start_time, input.end_time);
    if !window.is_valid() {
        return Err(AcademyError::validation(
            "start_time must be earlier than end_time",
        ));
    }

    ensure_no_conflict(service, org_id, course.id, &window, None).await?;

    let lesson = service
        .storage()
        .create_lesson(NewLesson {
            org_id,
            course_id: course.id,
            start_time: window.start,
            end_time: window.end,
            description: input.description,
            publication_state: input.publication_state,
            content: LessonContent::default(),
            created_by: actor_id,
        })
        .await?;

    info!(
        "Lesson {} created in course {} by {}",
        lesson.id, course.id, actor_id
    );
    Ok(lesson)
}

/// 校验机构、课程存在，且 actor 有权管理该课程
pub(crate) async fn load_managed_course(
    service: &LessonService,
    actor_id: i64,
    org_id: i64,
    course_id: i64,
) -> Result<Course> {
    let storage = service.storage();

    if !storage.org_exists(org_id).await? {
        return Err(AcademyError::not_found("ORG_NOT_FOUND"));
    }

    let course = storage
        .get_course(org_id, course_id)
        .await?
        .ok_or_else(|| AcademyError::not_found("COURSE_NOT_FOUND"))?;

    if !service
        .authority()
        .can_manage_course(storage, org_id, actor_id, &course)
        .await?
    {
        return Err(AcademyError::authorization(format!(
            "Account {actor_id} cannot manage course {course_id}"
        )));
    }

    Ok(course)
}

/// 与同课程已持久化的课次做冲突检查
pub(crate) async fn ensure_no_conflict(
    service: &LessonService,
    org_id: i64,
    course_id: i64,
    window: &TimeWindow,
    exclude: Option<i64>,
) -> Result<()> {
    let existing: Vec<LessonWindow> = service
        .storage()
        .list_course_lessons(org_id, course_id)
        .await?
        .iter()
        .map(LessonWindow::from)
        .collect();

    if conflicts(&existing, window, exclude, service.boundary()) {
        return Err(AcademyError::conflict("LESSON_TIME_CONFLICT"));
    }

    Ok(())
}
