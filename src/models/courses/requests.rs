use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::DayPattern;

// 创建课程请求
//
// # 校验
// - 学科必须存在且已发布
// - 校区必须存在
// - lecturer_ids 中每个账号必须存在且具有 lecturer 角色
// - start_date 不得早于今天
// - code 在机构内唯一
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseInput {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub academic_subject_id: i64,
    pub office_id: i64,
    pub start_date: NaiveDate,
    pub total_number_of_lessons: u32,
    pub tuition_fee: Option<f64>,
    #[serde(default)]
    pub lecturer_ids: Vec<i64>,
    #[serde(default)]
    pub weekly_pattern: Vec<DayPattern>,
}

// 复制课程请求
//
// # 默认值
// - academic_subject_id 未填写时沿用源课程学科
// - weekly_pattern 未填写时沿用源课程课表
// - total_number_of_lessons 未填写时沿用源课程的课次数量
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CloneCourseInput {
    pub source_course_id: i64,
    pub code: String,
    pub name: String,
    pub academic_subject_id: Option<i64>,
    pub office_id: i64,
    pub start_date: NaiveDate,
    pub tuition_fee: Option<f64>,
    pub lecturer_ids: Option<Vec<i64>>,
    pub weekly_pattern: Option<Vec<DayPattern>>,
    pub total_number_of_lessons: Option<u32>,
}

// 新课程（用于存储层）
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub org_id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub academic_subject_id: i64,
    pub org_office_id: i64,
    pub lecturer_ids: Vec<i64>,
    pub start_date: NaiveDate,
    pub total_number_of_lessons: u32,
    pub weekly_pattern: Vec<DayPattern>,
    pub tuition_fee: Option<f64>,
    pub created_by: i64,
}
