use super::entities::Lesson;
use serde::Serialize;
use ts_rs::TS;

// 批量生成课次响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct GeneratedLessons {
    pub lessons: Vec<Lesson>,
    pub count: usize,
}

impl From<Vec<Lesson>> for GeneratedLessons {
    fn from(lessons: Vec<Lesson>) -> Self {
        Self {
            count: lessons.len(),
            lessons,
        }
    }
}
