#![allow(dead_code)]

use std::sync::Arc;

use academy_scheduler::config::SchedulingConfig;
use academy_scheduler::models::PublicationState;
use academy_scheduler::models::contents::{
    entities::{ContentItem, ContentKind},
    requests::NewContentItem,
};
use academy_scheduler::models::courses::{
    entities::{Course, DayPattern},
    requests::CreateCourseInput,
};
use academy_scheduler::models::lessons::{entities::LessonContent, requests::LessonChanges};
use academy_scheduler::services::{
    CourseLocks, CourseService, LessonService, RoleAuthority, RoleCatalog,
};
use academy_scheduler::storage::Storage;
use academy_scheduler::storage::memory_storage::{DirectorySeed, MemoryStorage};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

pub const ORG: i64 = 1;

pub const OWNER: i64 = 1;
pub const ADMIN: i64 = 2;
pub const STAFF: i64 = 3;
pub const LECTURER: i64 = 10;
pub const OTHER_LECTURER: i64 = 11;
pub const STUDENT: i64 = 20;

pub const SUBJECT: i64 = 1;
pub const DRAFT_SUBJECT: i64 = 2;
pub const OFFICE: i64 = 1;

const SEED: &str = include_str!("../../demos/seed.json");

pub struct Fixture {
    pub storage: Arc<MemoryStorage>,
    pub lessons: Arc<LessonService>,
    pub courses: Arc<CourseService>,
}

pub fn fixture() -> Fixture {
    fixture_with(SchedulingConfig::default())
}

pub fn demo_seed() -> DirectorySeed {
    serde_json::from_str(SEED).expect("demo seed should parse")
}

/// 在任意存储上组装课次与课程服务
pub fn services(
    storage: Arc<dyn Storage>,
    settings: SchedulingConfig,
) -> (Arc<LessonService>, Arc<CourseService>) {
    let authority = RoleAuthority::new(RoleCatalog::default());
    let lessons = Arc::new(LessonService::new(
        storage.clone(),
        authority.clone(),
        Arc::new(CourseLocks::new()),
        settings,
    ));
    let courses = Arc::new(CourseService::new(storage, authority, lessons.clone()));
    (lessons, courses)
}

pub fn fixture_with(settings: SchedulingConfig) -> Fixture {
    let storage = Arc::new(MemoryStorage::new());
    storage.load_seed(demo_seed());

    let (lessons, courses) = services(storage.clone(), settings);

    Fixture {
        storage,
        lessons,
        courses,
    }
}

/// 2030-01-07 是星期一
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
}

/// 2030 年 1 月某日的 UTC 时间
pub fn jan(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, day, hour, minute, 0).unwrap()
}

/// 周一 09:00-10:30，周三 14:00-15:00
pub fn two_day_pattern() -> Vec<DayPattern> {
    vec![
        DayPattern::new(1, "09:00", "10:30"),
        DayPattern::new(3, "14:00", "15:00"),
    ]
}

pub fn course_input(code: &str) -> CreateCourseInput {
    CreateCourseInput {
        code: code.to_string(),
        name: format!("Course {code}"),
        description: Some("Weekly algebra sessions".to_string()),
        academic_subject_id: SUBJECT,
        office_id: OFFICE,
        start_date: monday(),
        total_number_of_lessons: 4,
        tuition_fee: Some(1200.0),
        lecturer_ids: vec![LECTURER],
        weekly_pattern: two_day_pattern(),
    }
}

pub async fn create_course(fx: &Fixture, code: &str) -> Course {
    fx.courses
        .create_course(ADMIN, ORG, course_input(code))
        .await
        .expect("course should be created")
}

pub async fn create_item(fx: &Fixture, course_id: i64, kind: ContentKind, title: &str) -> ContentItem {
    fx.storage
        .create_content_item(NewContentItem {
            org_id: ORG,
            course_id,
            kind,
            title: title.to_string(),
            description: None,
            publication_state: PublicationState::Published,
            attributes: serde_json::json!({ "max_score": 10 }),
            created_by: LECTURER,
        })
        .await
        .expect("content item should be created")
}

pub async fn set_content(fx: &Fixture, lesson_id: i64, content: LessonContent) {
    fx.storage
        .update_lesson(
            ORG,
            lesson_id,
            LessonChanges {
                content: Some(content),
                ..Default::default()
            },
        )
        .await
        .expect("lesson update should succeed")
        .expect("lesson should exist");
}

/// 课程所有课次挂载的某类内容引用总数
pub async fn attached_count(fx: &Fixture, course_id: i64, kind: ContentKind) -> usize {
    fx.storage
        .list_course_lessons(ORG, course_id)
        .await
        .unwrap()
        .iter()
        .map(|lesson| {
            lesson
                .content
                .references()
                .filter(|(_, k, _)| *k == kind)
                .count()
        })
        .sum()
}
