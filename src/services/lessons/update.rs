use tracing::info;

use super::LessonService;
use super::conflict::TimeWindow;
use super::create::{ensure_no_conflict, load_managed_course};
use crate::errors::{AcademyError, Result};
use crate::models::lessons::{
    entities::Lesson,
    requests::{LessonChanges, UpdateLessonInput},
};

pub async fn update_lesson(
    service: &LessonService,
    actor_id: i64,
    org_id: i64,
    lesson_id: i64,
    input: UpdateLessonInput,
) -> Result<Lesson> {
    let storage = service.storage();

    let course_id = storage
        .get_lesson(org_id, lesson_id)
        .await?
        .ok_or_else(|| AcademyError::not_found("LESSON_NOT_FOUND"))?
        .course_id;

    let _guard = service.locks().acquire(org_id, course_id).await;

    // 加锁后重新读取，拿到最新状态
    let lesson = storage
        .get_lesson(org_id, lesson_id)
        .await?
        .ok_or_else(|| AcademyError::not_found("LESSON_NOT_FOUND"))?;
    let course = load_managed_course(service, actor_id, org_id, lesson.course_id).await?;

    let window = TimeWindow::new(
        input.start_time.unwrap_or(lesson.start_time),
        input.end_time.unwrap_or(lesson.end_time),
    );
    if !window.is_valid() {
        return Err(AcademyError::validation(
            "start_time must be earlier than end_time",
        ));
    }

    ensure_no_conflict(service, org_id, course.id, &window, Some(lesson.id)).await?;

    if let Some(absent) = &input.absent_student_ids
        && let Some(outsider) = absent.iter().find(|id| !course.has_student(**id))
    {
        return Err(AcademyError::validation(format!(
            "Student {outsider} is not enrolled in course {}",
            course.id
        )));
    }

    let changes = LessonChanges {
        start_time: input.start_time.map(|_| window.start),
        end_time: input.end_time.map(|_| window.end),
        description: input.description,
        publication_state: input.publication_state,
        lecturer_comment: input.lecturer_comment,
        absent_student_ids: input.absent_student_ids,
        content: None,
    };

    let updated = storage
        .update_lesson(org_id, lesson.id, changes)
        .await?
        .ok_or_else(|| AcademyError::not_found("LESSON_NOT_FOUND"))?;

    info!("Lesson {} updated by {}", updated.id, actor_id);
    Ok(updated)
}
