//! 新课程的外部引用校验（创建与复制共用）

use chrono::{FixedOffset, NaiveDate, Utc};
use futures_util::future::try_join_all;

use super::CourseService;
use crate::errors::{AcademyError, Result};
use crate::models::directory::entities::Account;
use crate::models::roles::entities::RoleName;
use crate::utils::{validate_course_code, validate_course_name};

/// 待校验的新课程
pub(crate) struct CourseDraft<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub academic_subject_id: i64,
    pub office_id: i64,
    pub lecturer_ids: &'a [i64],
    pub start_date: NaiveDate,
}

/// 依次校验：学科、校区、讲师、开课日期、课程代码
pub(crate) async fn validate_course_draft(
    service: &CourseService,
    org_id: i64,
    draft: &CourseDraft<'_>,
) -> Result<()> {
    validate_course_code(draft.code).map_err(AcademyError::validation)?;
    validate_course_name(draft.name).map_err(AcademyError::validation)?;

    let storage = service.storage();

    let subject = storage
        .get_academic_subject(org_id, draft.academic_subject_id)
        .await?
        .ok_or_else(|| AcademyError::not_found("ACADEMIC_SUBJECT_NOT_FOUND"))?;
    if !subject.publication_state.is_published() {
        return Err(AcademyError::business_rule("ACADEMIC_SUBJECT_IS_DRAFT"));
    }

    if storage
        .get_org_office(org_id, draft.office_id)
        .await?
        .is_none()
    {
        return Err(AcademyError::not_found("ORG_OFFICE_NOT_FOUND"));
    }

    ensure_lecturers(service, org_id, draft.lecturer_ids).await?;

    let offset = service.lessons().recurrence()?.offset;
    ensure_start_date(draft.start_date, today_in(offset))?;

    if storage.course_code_exists(org_id, draft.code).await? {
        return Err(AcademyError::conflict("COURSE_CODE_EXISTED"));
    }

    Ok(())
}

/// 并发查询全部讲师，全部返回后才进入写入阶段
async fn ensure_lecturers(
    service: &CourseService,
    org_id: i64,
    lecturer_ids: &[i64],
) -> Result<Vec<Account>> {
    let storage = service.storage();

    let lookups = lecturer_ids.iter().map(|&id| async move {
        let account = storage
            .get_account(org_id, id)
            .await?
            .ok_or_else(|| AcademyError::not_found(format!("ID {id} is not found")))?;

        if !account.has_role(RoleName::LECTURER) {
            return Err(AcademyError::business_rule(format!(
                "{} isn't a lecturer",
                account.display_name
            )));
        }

        Ok(account)
    });

    try_join_all(lookups).await
}

/// 当前机构时区的日期
pub(crate) fn today_in(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

/// 开课日期不得早于今天（只比较日期）
pub(crate) fn ensure_start_date(start_date: NaiveDate, today: NaiveDate) -> Result<()> {
    if start_date < today {
        return Err(AcademyError::business_rule("START_DATE_INVALID"));
    }
    Ok(())
}
