use tracing::{info, warn};

use super::LessonService;
use super::create::{create_lesson_unlocked, load_managed_course};
use super::recurrence::parse_weekly_pattern;
use crate::errors::{AcademyError, Result};
use crate::models::PublicationState;
use crate::models::lessons::{
    requests::{CreateLessonInput, GenerateLessonsInput},
    responses::GeneratedLessons,
};
use crate::services::saga::{WriteLedger, WrittenRecord};

pub async fn generate_lessons(
    service: &LessonService,
    actor_id: i64,
    org_id: i64,
    course_id: i64,
    input: GenerateLessonsInput,
) -> Result<GeneratedLessons> {
    let _guard = service.locks().acquire(org_id, course_id).await;
    generate_lessons_unlocked(service, actor_id, org_id, course_id, input).await
}

/// 批量生成课次，调用方须已持有课程写锁
///
/// 每个窗口都走单课次创建原语；任一失败则删除本次已创建的课次并返回原始错误。
pub(crate) async fn generate_lessons_unlocked(
    service: &LessonService,
    actor_id: i64,
    org_id: i64,
    course_id: i64,
    input: GenerateLessonsInput,
) -> Result<GeneratedLessons> {
    let target = input.total_number_of_lessons;
    validate_target(service, target)?;

    load_managed_course(service, actor_id, org_id, course_id).await?;

    // 写入前完成全部校验
    let slots = parse_weekly_pattern(&input.weekly_pattern)?;
    let windows = service
        .recurrence()?
        .plan(input.course_start_date, target, &slots)?;

    let mut ledger = WriteLedger::new(org_id);
    let mut lessons = Vec::with_capacity(windows.len());

    for window in windows {
        let created = create_lesson_unlocked(
            service,
            actor_id,
            org_id,
            CreateLessonInput {
                start_time: window.start,
                end_time: window.end,
                description: None,
                course_id,
                publication_state: PublicationState::Draft,
            },
        )
        .await;

        match created {
            Ok(lesson) => {
                ledger.record(WrittenRecord::Lesson(lesson.id));
                lessons.push(lesson);
            }
            Err(e) => {
                warn!(
                    "Lesson generation for course {} aborted after {} lessons: {}",
                    course_id,
                    lessons.len(),
                    e
                );
                return ledger.abort(service.storage(), e).await;
            }
        }
    }

    info!(
        "Generated {} lessons for course {} by {}",
        lessons.len(),
        course_id,
        actor_id
    );
    Ok(GeneratedLessons::from(lessons))
}

/// 目标课次数量必须在 1 和单次生成上限之间
pub(crate) fn validate_target(service: &LessonService, target: u32) -> Result<()> {
    let max = service.settings().max_lessons_per_generation;
    if target == 0 {
        return Err(AcademyError::validation(
            "total_number_of_lessons must be at least 1",
        ));
    }
    if target > max {
        return Err(AcademyError::validation(format!(
            "total_number_of_lessons must not exceed {max}"
        )));
    }
    Ok(())
}
