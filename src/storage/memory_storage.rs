//! 内存存储实现
//!
//! 基于 DashMap 的进程内存储，`database.url = "memory://"` 时启用。
//! 目录数据（机构、账号、学科、校区）可通过 JSON 种子文件导入。

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Deserialize;
use tracing::info;

use crate::errors::{AcademyError, Result};
use crate::models::{
    PublicationState,
    contents::{entities::ContentItem, requests::NewContentItem},
    courses::{entities::Course, requests::NewCourse},
    directory::entities::{AcademicSubject, Account, Org, OrgOffice},
    lessons::{
        entities::Lesson,
        requests::{LessonChanges, NewLesson},
    },
};
use crate::storage::Storage;

pub const MEMORY_URL_SCHEME: &str = "memory://";

/// 目录种子数据
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DirectorySeed {
    pub orgs: Vec<Org>,
    pub accounts: Vec<Account>,
    pub academic_subjects: Vec<AcademicSubject>,
    pub offices: Vec<OrgOffice>,
}

impl DirectorySeed {
    /// 读取 JSON 种子文件
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    next_id: AtomicI64,
    orgs: DashMap<i64, Org>,
    accounts: DashMap<i64, Account>,
    academic_subjects: DashMap<i64, AcademicSubject>,
    offices: DashMap<i64, OrgOffice>,
    courses: DashMap<i64, Course>,
    // (机构, 课程代码) -> 课程 ID
    course_codes: DashMap<(i64, String), i64>,
    lessons: DashMap<i64, Lesson>,
    content_items: DashMap<i64, ContentItem>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 种子文件创建
    pub fn from_seed_file(path: &str) -> Result<Self> {
        let storage = Self::new();
        storage.load_seed(DirectorySeed::from_file(path)?);
        Ok(storage)
    }

    pub fn load_seed(&self, seed: DirectorySeed) {
        info!(
            "Loading directory seed: {} orgs, {} accounts, {} subjects, {} offices",
            seed.orgs.len(),
            seed.accounts.len(),
            seed.academic_subjects.len(),
            seed.offices.len()
        );
        seed.orgs.into_iter().for_each(|o| self.insert_org(o));
        seed.accounts.into_iter().for_each(|a| self.insert_account(a));
        seed.academic_subjects
            .into_iter()
            .for_each(|s| self.insert_academic_subject(s));
        seed.offices.into_iter().for_each(|o| self.insert_office(o));
    }

    pub fn insert_org(&self, org: Org) {
        self.orgs.insert(org.id, org);
    }

    pub fn insert_account(&self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    pub fn insert_academic_subject(&self, subject: AcademicSubject) {
        self.academic_subjects.insert(subject.id, subject);
    }

    pub fn insert_office(&self, office: OrgOffice) {
        self.offices.insert(office.id, office);
    }

    /// 写入课程学生名单（学生报名由外围系统完成）
    pub fn enroll_students(&self, course_id: i64, student_ids: &[i64]) -> bool {
        match self.courses.get_mut(&course_id) {
            Some(mut course) => {
                course.student_ids.extend_from_slice(student_ids);
                true
            }
            None => false,
        }
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    pub fn content_item_count(&self) -> usize {
        self.content_items.len()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn org_exists(&self, org_id: i64) -> Result<bool> {
        Ok(self.orgs.contains_key(&org_id))
    }

    async fn get_account(&self, org_id: i64, account_id: i64) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .get(&account_id)
            .filter(|a| a.org_id == org_id)
            .map(|a| a.value().clone()))
    }

    async fn get_academic_subject(
        &self,
        org_id: i64,
        subject_id: i64,
    ) -> Result<Option<AcademicSubject>> {
        Ok(self
            .academic_subjects
            .get(&subject_id)
            .filter(|s| s.org_id == org_id)
            .map(|s| s.value().clone()))
    }

    async fn get_org_office(&self, org_id: i64, office_id: i64) -> Result<Option<OrgOffice>> {
        Ok(self
            .offices
            .get(&office_id)
            .filter(|o| o.org_id == org_id)
            .map(|o| o.value().clone()))
    }

    async fn create_course(&self, req: NewCourse) -> Result<Course> {
        // 占住代码槽位后再写入课程，机构内代码唯一
        let slot = match self.course_codes.entry((req.org_id, req.code.clone())) {
            Entry::Occupied(_) => return Err(AcademyError::conflict("COURSE_CODE_EXISTED")),
            Entry::Vacant(slot) => slot,
        };

        let now = chrono::Utc::now();
        let course = Course {
            id: self.allocate_id(),
            org_id: req.org_id,
            code: req.code,
            name: req.name,
            description: req.description,
            academic_subject_id: req.academic_subject_id,
            org_office_id: req.org_office_id,
            lecturer_ids: req.lecturer_ids,
            student_ids: Vec::new(),
            start_date: req.start_date,
            total_number_of_lessons: req.total_number_of_lessons,
            weekly_pattern: req.weekly_pattern,
            tuition_fee: req.tuition_fee,
            publication_state: PublicationState::Draft,
            created_by: req.created_by,
            created_at: now,
            updated_at: now,
        };
        slot.insert(course.id);
        self.courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn get_course(&self, org_id: i64, course_id: i64) -> Result<Option<Course>> {
        Ok(self
            .courses
            .get(&course_id)
            .filter(|c| c.org_id == org_id)
            .map(|c| c.value().clone()))
    }

    async fn course_code_exists(&self, org_id: i64, code: &str) -> Result<bool> {
        Ok(self.course_codes.contains_key(&(org_id, code.to_string())))
    }

    async fn delete_course(&self, org_id: i64, course_id: i64) -> Result<bool> {
        let Some((_, course)) = self
            .courses
            .remove_if(&course_id, |_, c| c.org_id == org_id)
        else {
            return Ok(false);
        };
        self.course_codes
            .remove_if(&(course.org_id, course.code), |_, id| *id == course_id);
        Ok(true)
    }

    async fn create_lesson(&self, req: NewLesson) -> Result<Lesson> {
        let now = chrono::Utc::now();
        let lesson = Lesson {
            id: self.allocate_id(),
            org_id: req.org_id,
            course_id: req.course_id,
            start_time: req.start_time,
            end_time: req.end_time,
            description: req.description,
            publication_state: req.publication_state,
            absent_student_ids: Vec::new(),
            lecturer_comment: None,
            content: req.content,
            created_by: req.created_by,
            created_at: now,
            updated_at: now,
        };
        self.lessons.insert(lesson.id, lesson.clone());
        Ok(lesson)
    }

    async fn get_lesson(&self, org_id: i64, lesson_id: i64) -> Result<Option<Lesson>> {
        Ok(self
            .lessons
            .get(&lesson_id)
            .filter(|l| l.org_id == org_id)
            .map(|l| l.value().clone()))
    }

    async fn list_course_lessons(&self, org_id: i64, course_id: i64) -> Result<Vec<Lesson>> {
        let mut lessons: Vec<Lesson> = self
            .lessons
            .iter()
            .filter(|l| l.org_id == org_id && l.course_id == course_id)
            .map(|l| l.value().clone())
            .collect();
        lessons.sort_by_key(|l| (l.start_time, l.id));
        Ok(lessons)
    }

    async fn update_lesson(
        &self,
        org_id: i64,
        lesson_id: i64,
        changes: LessonChanges,
    ) -> Result<Option<Lesson>> {
        let Some(mut lesson) = self.lessons.get_mut(&lesson_id) else {
            return Ok(None);
        };
        if lesson.org_id != org_id {
            return Ok(None);
        }

        if let Some(start_time) = changes.start_time {
            lesson.start_time = start_time;
        }
        if let Some(end_time) = changes.end_time {
            lesson.end_time = end_time;
        }
        if let Some(description) = changes.description {
            lesson.description = Some(description);
        }
        if let Some(state) = changes.publication_state {
            lesson.publication_state = state;
        }
        if let Some(comment) = changes.lecturer_comment {
            lesson.lecturer_comment = Some(comment);
        }
        if let Some(absent) = changes.absent_student_ids {
            lesson.absent_student_ids = absent;
        }
        if let Some(content) = changes.content {
            lesson.content = content;
        }
        lesson.updated_at = chrono::Utc::now();

        Ok(Some(lesson.value().clone()))
    }

    async fn delete_lesson(&self, org_id: i64, lesson_id: i64) -> Result<bool> {
        Ok(self
            .lessons
            .remove_if(&lesson_id, |_, l| l.org_id == org_id)
            .is_some())
    }

    async fn create_content_item(&self, req: NewContentItem) -> Result<ContentItem> {
        let item = ContentItem {
            id: self.allocate_id(),
            org_id: req.org_id,
            course_id: req.course_id,
            kind: req.kind,
            title: req.title,
            description: req.description,
            publication_state: req.publication_state,
            attributes: req.attributes,
            created_by: req.created_by,
            created_at: chrono::Utc::now(),
        };
        self.content_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn get_content_item(&self, org_id: i64, item_id: i64) -> Result<Option<ContentItem>> {
        Ok(self
            .content_items
            .get(&item_id)
            .filter(|i| i.org_id == org_id)
            .map(|i| i.value().clone()))
    }

    async fn list_course_content_items(
        &self,
        org_id: i64,
        course_id: i64,
    ) -> Result<Vec<ContentItem>> {
        let mut items: Vec<ContentItem> = self
            .content_items
            .iter()
            .filter(|i| i.org_id == org_id && i.course_id == course_id)
            .map(|i| i.value().clone())
            .collect();
        items.sort_by_key(|i| i.id);
        Ok(items)
    }

    async fn delete_content_item(&self, org_id: i64, item_id: i64) -> Result<bool> {
        Ok(self
            .content_items
            .remove_if(&item_id, |_, i| i.org_id == org_id)
            .is_some())
    }
}
