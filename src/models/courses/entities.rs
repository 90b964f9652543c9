use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{AcademyError, Result};
use crate::models::PublicationState;

/// 课表时钟格式，例如 "09:30"
pub const CLOCK_FORMAT: &str = "%H:%M";

// 每周课表中的一个固定时段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct DayPattern {
    // 星期几，0 = 周日 ... 6 = 周六
    pub day_of_week: u8,
    // 开始时钟 "HH:MM"
    pub start_clock: String,
    // 结束时钟 "HH:MM"
    pub end_clock: String,
}

impl DayPattern {
    pub fn new(day_of_week: u8, start_clock: &str, end_clock: &str) -> Self {
        Self {
            day_of_week,
            start_clock: start_clock.to_string(),
            end_clock: end_clock.to_string(),
        }
    }

    /// 解析并校验时钟，要求 start_clock < end_clock
    pub fn parse_clocks(&self) -> Result<(NaiveTime, NaiveTime)> {
        if self.day_of_week > 6 {
            return Err(AcademyError::validation(format!(
                "day_of_week must be between 0 and 6, got {}",
                self.day_of_week
            )));
        }

        let start = NaiveTime::parse_from_str(&self.start_clock, CLOCK_FORMAT).map_err(|e| {
            AcademyError::validation(format!("Invalid start_clock '{}': {e}", self.start_clock))
        })?;
        let end = NaiveTime::parse_from_str(&self.end_clock, CLOCK_FORMAT).map_err(|e| {
            AcademyError::validation(format!("Invalid end_clock '{}': {e}", self.end_clock))
        })?;

        if start >= end {
            return Err(AcademyError::validation(format!(
                "start_clock {} must be earlier than end_clock {}",
                self.start_clock, self.end_clock
            )));
        }

        Ok((start, end))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 所属机构
    pub org_id: i64,
    // 课程代码，机构内唯一
    pub code: String,
    // 课程名称
    pub name: String,
    pub description: Option<String>,
    // 学科
    pub academic_subject_id: i64,
    // 校区
    pub org_office_id: i64,
    // 授课讲师
    pub lecturer_ids: Vec<i64>,
    // 学生名单
    pub student_ids: Vec<i64>,
    // 开课日期
    pub start_date: NaiveDate,
    // 计划课次总数
    pub total_number_of_lessons: u32,
    // 每周课表
    pub weekly_pattern: Vec<DayPattern>,
    pub tuition_fee: Option<f64>,
    pub publication_state: PublicationState,
    pub created_by: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn has_lecturer(&self, account_id: i64) -> bool {
        self.lecturer_ids.contains(&account_id)
    }

    pub fn has_student(&self, account_id: i64) -> bool {
        self.student_ids.contains(&account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_clocks() {
        let pattern = DayPattern::new(1, "14:00", "16:30");
        let (start, end) = pattern.parse_clocks().unwrap();
        assert_eq!(start, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        assert_eq!(end, NaiveTime::from_hms_opt(16, 30, 0).unwrap());
    }

    #[test]
    fn test_inverted_clocks_rejected() {
        let err = DayPattern::new(1, "17:30", "16:30").parse_clocks().unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_equal_clocks_rejected() {
        assert!(DayPattern::new(1, "10:00", "10:00").parse_clocks().is_err());
    }

    #[test]
    fn test_weekday_out_of_range_rejected() {
        let err = DayPattern::new(7, "10:00", "11:00").parse_clocks().unwrap_err();
        assert!(err.message().contains("day_of_week"));
    }

    #[test]
    fn test_malformed_clock_rejected() {
        assert!(DayPattern::new(2, "9am", "11:00").parse_clocks().is_err());
        assert!(DayPattern::new(2, "09:00", "25:00").parse_clocks().is_err());
    }
}
