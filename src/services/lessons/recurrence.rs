//! 每周课表展开
//!
//! 从起始日期逐日向后推进，每天取第一个星期几匹配的课表条目生成一个时间窗口，
//! 直到凑够目标数量。扫描天数有上限，超出即失败。

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::debug;

use super::conflict::TimeWindow;
use crate::errors::{AcademyError, Result};
use crate::models::courses::entities::DayPattern;

/// 解析后的课表条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WeeklySlot {
    pub day_of_week: u8,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// 校验并解析整个课表，任一条目非法则整体失败
pub(crate) fn parse_weekly_pattern(pattern: &[DayPattern]) -> Result<Vec<WeeklySlot>> {
    if pattern.is_empty() {
        return Err(AcademyError::validation("weekly_pattern must not be empty"));
    }

    pattern
        .iter()
        .map(|entry| {
            let (start, end) = entry.parse_clocks()?;
            Ok(WeeklySlot {
                day_of_week: entry.day_of_week,
                start,
                end,
            })
        })
        .collect()
}

/// 展开参数
#[derive(Debug, Clone, Copy)]
pub(crate) struct Recurrence {
    pub offset: FixedOffset,
    pub scan_weeks_per_lesson: u32,
}

impl Recurrence {
    /// 最多扫描的天数
    pub fn horizon_days(&self, target: u32) -> u64 {
        u64::from(self.scan_weeks_per_lesson) * 7 * u64::from(target)
    }

    /// 生成 `target` 个按时间先后排列的窗口
    pub fn plan(
        &self,
        start_date: NaiveDate,
        target: u32,
        slots: &[WeeklySlot],
    ) -> Result<Vec<TimeWindow>> {
        let horizon = self.horizon_days(target);
        let mut windows = Vec::with_capacity(target as usize);
        let mut date = start_date;
        let mut scanned: u64 = 0;

        while windows.len() < target as usize {
            if scanned >= horizon {
                return Err(AcademyError::validation(format!(
                    "Weekly pattern cannot produce {target} lessons within {horizon} days"
                )));
            }

            let weekday = date.weekday().num_days_from_sunday() as u8;
            if let Some(slot) = slots.iter().find(|slot| slot.day_of_week == weekday) {
                let window = self.materialize(date, slot)?;
                debug!("Planned lesson window {} - {}", window.start, window.end);
                windows.push(window);
            }

            date = date
                .succ_opt()
                .ok_or_else(|| AcademyError::validation("Date out of range"))?;
            scanned += 1;
        }

        Ok(windows)
    }

    fn materialize(&self, date: NaiveDate, slot: &WeeklySlot) -> Result<TimeWindow> {
        let local = |time: NaiveTime| {
            self.offset
                .from_local_datetime(&date.and_time(time))
                .single()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| AcademyError::validation(format!("Invalid local time {date} {time}")))
        };

        Ok(TimeWindow::new(local(slot.start)?, local(slot.end)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Weekday};

    fn recurrence(offset_hours: i32) -> Recurrence {
        Recurrence {
            offset: FixedOffset::east_opt(offset_hours * 3600).unwrap(),
            scan_weeks_per_lesson: 3,
        }
    }

    fn slots(pattern: &[DayPattern]) -> Vec<WeeklySlot> {
        parse_weekly_pattern(pattern).unwrap()
    }

    // 2030-01-07 是星期一
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
    }

    #[test]
    fn test_two_days_a_week_yields_exact_count_in_order() {
        let pattern = [
            DayPattern::new(1, "09:00", "10:30"),
            DayPattern::new(3, "14:00", "15:00"),
        ];
        let windows = recurrence(0).plan(monday(), 3, &slots(&pattern)).unwrap();

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start, Utc.with_ymd_and_hms(2030, 1, 7, 9, 0, 0).unwrap());
        assert_eq!(windows[0].end, Utc.with_ymd_and_hms(2030, 1, 7, 10, 30, 0).unwrap());
        assert_eq!(windows[1].start, Utc.with_ymd_and_hms(2030, 1, 9, 14, 0, 0).unwrap());
        assert_eq!(windows[2].start, Utc.with_ymd_and_hms(2030, 1, 14, 9, 0, 0).unwrap());
        assert!(windows.windows(2).all(|pair| pair[0].end < pair[1].start));
    }

    #[test]
    fn test_sunday_is_zero() {
        let windows = recurrence(0)
            .plan(monday(), 1, &slots(&[DayPattern::new(0, "10:00", "11:00")]))
            .unwrap();
        assert_eq!(windows[0].start.weekday(), Weekday::Sun);
        assert_eq!(windows[0].start.date_naive(), NaiveDate::from_ymd_opt(2030, 1, 13).unwrap());
    }

    #[test]
    fn test_first_matching_entry_wins_per_day() {
        let pattern = [
            DayPattern::new(1, "09:00", "10:00"),
            DayPattern::new(1, "15:00", "16:00"),
        ];
        let windows = recurrence(0).plan(monday(), 2, &slots(&pattern)).unwrap();

        assert_eq!(windows[0].start, Utc.with_ymd_and_hms(2030, 1, 7, 9, 0, 0).unwrap());
        assert_eq!(windows[1].start, Utc.with_ymd_and_hms(2030, 1, 14, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_clocks_are_read_in_configured_offset() {
        let windows = recurrence(8)
            .plan(monday(), 1, &slots(&[DayPattern::new(1, "09:00", "10:00")]))
            .unwrap();
        assert_eq!(windows[0].start, Utc.with_ymd_and_hms(2030, 1, 7, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_rejects_empty_and_inverted_patterns() {
        assert!(parse_weekly_pattern(&[]).is_err());
        assert!(parse_weekly_pattern(&[DayPattern::new(1, "10:00", "09:00")]).is_err());
        assert!(parse_weekly_pattern(&[DayPattern::new(7, "09:00", "10:00")]).is_err());
        assert!(
            parse_weekly_pattern(&[
                DayPattern::new(1, "09:00", "10:00"),
                DayPattern::new(2, "9am", "10:00"),
            ])
            .is_err()
        );
    }

    #[test]
    fn test_scan_horizon_is_bounded() {
        let recurrence = Recurrence {
            offset: FixedOffset::east_opt(0).unwrap(),
            scan_weeks_per_lesson: 1,
        };
        assert_eq!(recurrence.horizon_days(4), 28);

        // 不经过校验的非法星期几永远匹配不到
        let unreachable = [WeeklySlot {
            day_of_week: 9,
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        }];
        let result = recurrence.plan(monday(), 4, &unreachable);
        assert!(matches!(result, Err(AcademyError::Validation(_))));
    }
}
