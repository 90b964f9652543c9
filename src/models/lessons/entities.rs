use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PublicationState;
use crate::models::contents::entities::ContentKind;

// 教学阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub enum TeachingPhase {
    BeforeClass, // 课前
    InClass,     // 课中
    AfterClass,  // 课后
}

impl TeachingPhase {
    pub fn all() -> &'static [TeachingPhase] {
        &[
            TeachingPhase::BeforeClass,
            TeachingPhase::InClass,
            TeachingPhase::AfterClass,
        ]
    }
}

// 单个教学阶段挂载的内容引用
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct PhaseContent {
    #[serde(default)]
    pub classwork_materials: Vec<i64>,
    #[serde(default)]
    pub classwork_assignments: Vec<i64>,
    #[serde(default)]
    pub quizzes: Vec<i64>,
}

impl PhaseContent {
    pub fn list(&self, kind: ContentKind) -> &[i64] {
        match kind {
            ContentKind::ClassworkMaterial => &self.classwork_materials,
            ContentKind::ClassworkAssignment => &self.classwork_assignments,
            ContentKind::Quiz => &self.quizzes,
        }
    }

    pub fn list_mut(&mut self, kind: ContentKind) -> &mut Vec<i64> {
        match kind {
            ContentKind::ClassworkMaterial => &mut self.classwork_materials,
            ContentKind::ClassworkAssignment => &mut self.classwork_assignments,
            ContentKind::Quiz => &mut self.quizzes,
        }
    }
}

// 课次挂载的全部内容引用：{课前, 课中, 课后} × {资料, 作业, 测验}
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct LessonContent {
    #[serde(default)]
    pub before_class: PhaseContent,
    #[serde(default)]
    pub in_class: PhaseContent,
    #[serde(default)]
    pub after_class: PhaseContent,
}

impl LessonContent {
    pub fn phase(&self, phase: TeachingPhase) -> &PhaseContent {
        match phase {
            TeachingPhase::BeforeClass => &self.before_class,
            TeachingPhase::InClass => &self.in_class,
            TeachingPhase::AfterClass => &self.after_class,
        }
    }

    pub fn phase_mut(&mut self, phase: TeachingPhase) -> &mut PhaseContent {
        match phase {
            TeachingPhase::BeforeClass => &mut self.before_class,
            TeachingPhase::InClass => &mut self.in_class,
            TeachingPhase::AfterClass => &mut self.after_class,
        }
    }

    pub fn attach(&mut self, phase: TeachingPhase, kind: ContentKind, content_id: i64) {
        self.phase_mut(phase).list_mut(kind).push(content_id);
    }

    /// 按 阶段 → 类型 → 原始顺序 遍历所有引用
    pub fn references(&self) -> impl Iterator<Item = (TeachingPhase, ContentKind, i64)> + '_ {
        TeachingPhase::all().iter().flat_map(move |&phase| {
            ContentKind::all().iter().flat_map(move |&kind| {
                self.phase(phase)
                    .list(kind)
                    .iter()
                    .map(move |&id| (phase, kind, id))
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.references().next().is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/lesson.ts")]
pub struct Lesson {
    // 课次ID
    pub id: i64,
    pub org_id: i64,
    // 所属课程
    pub course_id: i64,
    // 上课时间窗口
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: chrono::DateTime<chrono::Utc>,
    pub description: Option<String>,
    pub publication_state: PublicationState,
    // 缺勤学生
    pub absent_student_ids: Vec<i64>,
    // 讲师评语
    pub lecturer_comment: Option<String>,
    pub content: LessonContent,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_follow_phase_then_kind_order() {
        let mut content = LessonContent::default();
        content.attach(TeachingPhase::AfterClass, ContentKind::Quiz, 9);
        content.attach(TeachingPhase::BeforeClass, ContentKind::ClassworkAssignment, 2);
        content.attach(TeachingPhase::BeforeClass, ContentKind::ClassworkMaterial, 1);
        content.attach(TeachingPhase::InClass, ContentKind::ClassworkMaterial, 1);

        let refs: Vec<_> = content.references().collect();
        assert_eq!(
            refs,
            vec![
                (TeachingPhase::BeforeClass, ContentKind::ClassworkMaterial, 1),
                (TeachingPhase::BeforeClass, ContentKind::ClassworkAssignment, 2),
                (TeachingPhase::InClass, ContentKind::ClassworkMaterial, 1),
                (TeachingPhase::AfterClass, ContentKind::Quiz, 9),
            ]
        );
    }

    #[test]
    fn test_empty_content() {
        let mut content = LessonContent::default();
        assert!(content.is_empty());
        content.attach(TeachingPhase::InClass, ContentKind::Quiz, 3);
        assert!(!content.is_empty());
    }

    #[test]
    fn test_content_deserializes_with_missing_phases() {
        let content: LessonContent =
            serde_json::from_str(r#"{"in_class":{"quizzes":[4]}}"#).unwrap();
        assert_eq!(content.in_class.quizzes, vec![4]);
        assert!(content.before_class.classwork_materials.is_empty());
    }
}
