use tracing::info;

use super::CourseService;
use super::validate::{CourseDraft, validate_course_draft};
use crate::errors::{AcademyError, Result};
use crate::models::courses::{
    entities::Course,
    requests::{CreateCourseInput, NewCourse},
};
use crate::models::roles::entities::Permission;
use crate::services::lessons::recurrence::parse_weekly_pattern;

pub async fn create_course(
    service: &CourseService,
    actor_id: i64,
    org_id: i64,
    input: CreateCourseInput,
) -> Result<Course> {
    let storage = service.storage();

    if !storage.org_exists(org_id).await? {
        return Err(AcademyError::not_found("ORG_NOT_FOUND"));
    }

    if !service
        .authority()
        .actor_has_permission(storage, org_id, actor_id, Permission::COURSE_CREATE)
        .await?
    {
        return Err(AcademyError::authorization(format!(
            "Account {actor_id} cannot create courses"
        )));
    }

    validate_course_draft(
        service,
        org_id,
        &CourseDraft {
            code: &input.code,
            name: &input.name,
            academic_subject_id: input.academic_subject_id,
            office_id: input.office_id,
            lecturer_ids: &input.lecturer_ids,
            start_date: input.start_date,
        },
    )
    .await?;

    // 课表可以留空，之后再生成课次
    if !input.weekly_pattern.is_empty() {
        parse_weekly_pattern(&input.weekly_pattern)?;
    }

    let course = storage
        .create_course(NewCourse {
            org_id,
            code: input.code,
            name: input.name,
            description: input.description,
            academic_subject_id: input.academic_subject_id,
            org_office_id: input.office_id,
            lecturer_ids: input.lecturer_ids,
            start_date: input.start_date,
            total_number_of_lessons: input.total_number_of_lessons,
            weekly_pattern: input.weekly_pattern,
            tuition_fee: input.tuition_fee,
            created_by: actor_id,
        })
        .await?;

    info!(
        "Course {} ({}) created in org {} by {}",
        course.id, course.code, org_id, actor_id
    );
    Ok(course)
}
