use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::LessonContent;
use crate::models::PublicationState;
use crate::models::courses::entities::DayPattern;

// 创建课次请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct CreateLessonInput {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
    pub course_id: i64,
    #[serde(default)]
    pub publication_state: PublicationState,
}

// 更新课次请求，未填写的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct UpdateLessonInput {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub publication_state: Option<PublicationState>,
    pub lecturer_comment: Option<String>,
    pub absent_student_ids: Option<Vec<i64>>,
}

// 按每周课表批量生成课次请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct GenerateLessonsInput {
    pub course_start_date: NaiveDate,
    pub total_number_of_lessons: u32,
    pub weekly_pattern: Vec<DayPattern>,
}

// 新课次（用于存储层）
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub org_id: i64,
    pub course_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
    pub publication_state: PublicationState,
    pub content: LessonContent,
    pub created_by: i64,
}

// 课次变更（用于存储层），None 表示不修改
#[derive(Debug, Clone, Default)]
pub struct LessonChanges {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub publication_state: Option<PublicationState>,
    pub lecturer_comment: Option<String>,
    pub absent_student_ids: Option<Vec<i64>>,
    pub content: Option<LessonContent>,
}
