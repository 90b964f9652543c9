//! 复制课程
//!
//! 新课程按课表重新生成课次，再把源课程每个课次挂载的教学内容复制到新课程，
//! 按课次的先后位置一一对应挂载。被多个课次共享的内容只复制一次。

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::CourseService;
use super::validate::{CourseDraft, validate_course_draft};
use crate::errors::{AcademyError, Result};
use crate::models::contents::requests::NewContentItem;
use crate::models::courses::{
    entities::{Course, DayPattern},
    requests::{CloneCourseInput, NewCourse},
};
use crate::models::lessons::{
    entities::{Lesson, LessonContent},
    requests::{GenerateLessonsInput, LessonChanges},
};
use crate::models::roles::entities::Permission;
use crate::services::lessons::generate::{generate_lessons_unlocked, validate_target};
use crate::services::lessons::recurrence::parse_weekly_pattern;
use crate::services::saga::{WriteLedger, WrittenRecord};

pub async fn clone_course(
    service: &CourseService,
    actor_id: i64,
    org_id: i64,
    input: CloneCourseInput,
) -> Result<Course> {
    let storage = service.storage();

    let source = storage
        .get_course(org_id, input.source_course_id)
        .await?
        .ok_or_else(|| AcademyError::not_found("COURSE_MUST_COPY_NOT_FOUND"))?;

    authorize_clone(service, actor_id, org_id, &source).await?;

    let academic_subject_id = input
        .academic_subject_id
        .unwrap_or(source.academic_subject_id);
    let lecturer_ids = input
        .lecturer_ids
        .unwrap_or_else(|| source.lecturer_ids.clone());

    validate_course_draft(
        service,
        org_id,
        &CourseDraft {
            code: &input.code,
            name: &input.name,
            academic_subject_id,
            office_id: input.office_id,
            lecturer_ids: &lecturer_ids,
            start_date: input.start_date,
        },
    )
    .await?;

    let source_lessons = storage.list_course_lessons(org_id, source.id).await?;
    let weekly_pattern = input
        .weekly_pattern
        .unwrap_or_else(|| source.weekly_pattern.clone());
    let target = input.total_number_of_lessons.unwrap_or_else(|| {
        if source_lessons.is_empty() {
            source.total_number_of_lessons
        } else {
            source_lessons.len() as u32
        }
    });

    // 课表或数量非法时在写入前失败
    validate_target(service.lessons(), target)?;
    parse_weekly_pattern(&weekly_pattern)?;

    let mut ledger = WriteLedger::new(org_id);

    let course = storage
        .create_course(NewCourse {
            org_id,
            code: input.code,
            name: input.name,
            description: source.description.clone(),
            academic_subject_id,
            org_office_id: input.office_id,
            lecturer_ids,
            start_date: input.start_date,
            total_number_of_lessons: target,
            weekly_pattern: weekly_pattern.clone(),
            tuition_fee: input.tuition_fee,
            created_by: actor_id,
        })
        .await?;
    ledger.record(WrittenRecord::Course(course.id));

    let replicated = replicate_lessons(
        service,
        actor_id,
        &course,
        &source_lessons,
        weekly_pattern,
        target,
        &mut ledger,
    )
    .await;

    match replicated {
        Ok(copied) => {
            info!(
                "Course {} cloned into {} ({} lessons, {} content items) by {}",
                source.id, course.id, target, copied, actor_id
            );
            Ok(course)
        }
        Err(e) => {
            warn!("Cloning course {} failed: {}", source.id, e);
            ledger.abort(storage, e).await
        }
    }
}

async fn authorize_clone(
    service: &CourseService,
    actor_id: i64,
    org_id: i64,
    source: &Course,
) -> Result<()> {
    let storage = service.storage();
    let authority = service.authority();

    let permitted = authority
        .actor_has_permission(storage, org_id, actor_id, Permission::COURSE_CLONE)
        .await?
        && authority
            .can_manage_course(storage, org_id, actor_id, source)
            .await?;

    if !permitted {
        return Err(AcademyError::authorization(format!(
            "Account {actor_id} cannot clone course {}",
            source.id
        )));
    }
    Ok(())
}

/// 生成新课次并复制教学内容，返回复制的内容数量
async fn replicate_lessons(
    service: &CourseService,
    actor_id: i64,
    course: &Course,
    source_lessons: &[Lesson],
    weekly_pattern: Vec<DayPattern>,
    target: u32,
    ledger: &mut WriteLedger,
) -> Result<usize> {
    let storage = service.storage();
    let lessons = service.lessons();
    let org_id = course.org_id;

    let _guard = lessons.locks().acquire(org_id, course.id).await;

    let generated = generate_lessons_unlocked(
        lessons,
        actor_id,
        org_id,
        course.id,
        GenerateLessonsInput {
            course_start_date: course.start_date,
            total_number_of_lessons: target,
            weekly_pattern,
        },
    )
    .await?;
    for lesson in &generated.lessons {
        ledger.record(WrittenRecord::Lesson(lesson.id));
    }

    // 源内容 ID -> 新内容 ID
    let mut copies: HashMap<i64, i64> = HashMap::new();

    for (position, source_lesson) in source_lessons.iter().enumerate() {
        let mut content = LessonContent::default();

        for (phase, kind, source_item_id) in source_lesson.content.references() {
            let copy_id = match copies.get(&source_item_id) {
                Some(&id) => id,
                None => {
                    let item = storage
                        .get_content_item(org_id, source_item_id)
                        .await?
                        .ok_or_else(|| {
                            AcademyError::not_found(format!(
                                "Content item {source_item_id} is not found"
                            ))
                        })?;
                    let copy = storage
                        .create_content_item(NewContentItem::copy_of(&item, course.id, actor_id))
                        .await?;
                    ledger.record(WrittenRecord::ContentItem(copy.id));
                    copies.insert(source_item_id, copy.id);
                    copy.id
                }
            };
            content.attach(phase, kind, copy_id);
        }

        // 新课程课次不足时，多出的源课次内容只复制不挂载
        let Some(target_lesson) = generated.lessons.get(position) else {
            debug!(
                "Source lesson {} has no counterpart in course {}",
                source_lesson.id, course.id
            );
            continue;
        };
        if content.is_empty() {
            continue;
        }

        storage
            .update_lesson(
                org_id,
                target_lesson.id,
                LessonChanges {
                    content: Some(content),
                    ..Default::default()
                },
            )
            .await?
            .ok_or_else(|| AcademyError::not_found("LESSON_NOT_FOUND"))?;
    }

    Ok(copies.len())
}
