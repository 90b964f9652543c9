//! 课次时间冲突检查
//!
//! 只比较同一 (机构, 课程) 内的课次，调用方负责传入正确范围。

use chrono::{DateTime, SubsecRound, Utc};

use crate::models::lessons::entities::Lesson;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// 时间截断到整秒，与持久化精度一致
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: start.trunc_subsecs(0),
            end: end.trunc_subsecs(0),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }
}

/// 已存在课次的时间窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LessonWindow {
    pub lesson_id: i64,
    pub window: TimeWindow,
}

impl From<&Lesson> for LessonWindow {
    fn from(lesson: &Lesson) -> Self {
        Self {
            lesson_id: lesson.id,
            window: TimeWindow::new(lesson.start_time, lesson.end_time),
        }
    }
}

/// 边界处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// 首尾相接也算冲突
    Inclusive,
    /// 首尾相接允许
    Exclusive,
}

impl Boundary {
    pub fn from_flag(inclusive: bool) -> Self {
        if inclusive {
            Boundary::Inclusive
        } else {
            Boundary::Exclusive
        }
    }
}

fn overlaps(existing: &TimeWindow, candidate: &TimeWindow, boundary: Boundary) -> bool {
    match boundary {
        Boundary::Inclusive => {
            (candidate.start >= existing.start && candidate.start <= existing.end)
                || (candidate.end >= existing.start && candidate.end <= existing.end)
                || (candidate.start <= existing.start && candidate.end >= existing.end)
        }
        Boundary::Exclusive => candidate.start < existing.end && existing.start < candidate.end,
    }
}

/// 候选窗口是否与任一已有课次冲突，`exclude` 为正在修改的课次自身
pub(crate) fn conflicts(
    existing: &[LessonWindow],
    candidate: &TimeWindow,
    exclude: Option<i64>,
    boundary: Boundary,
) -> bool {
    existing
        .iter()
        .filter(|lesson| Some(lesson.lesson_id) != exclude)
        .any(|lesson| overlaps(&lesson.window, candidate, boundary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 7, hour, minute, 0).unwrap()
    }

    fn window(start: (u32, u32), end: (u32, u32)) -> TimeWindow {
        TimeWindow::new(at(start.0, start.1), at(end.0, end.1))
    }

    fn lesson(id: i64, start: (u32, u32), end: (u32, u32)) -> LessonWindow {
        LessonWindow {
            lesson_id: id,
            window: window(start, end),
        }
    }

    #[test]
    fn test_window_truncates_to_whole_seconds() {
        let start = at(10, 0) + chrono::Duration::milliseconds(100);
        let end = at(10, 0) + chrono::Duration::milliseconds(900);
        let window = TimeWindow::new(start, end);

        assert_eq!(window.start, at(10, 0));
        assert_eq!(window.end, at(10, 0));
        assert!(!window.is_valid());
    }

    #[test]
    fn test_subsecond_gap_still_touches() {
        let existing = [lesson(1, (10, 0), (11, 0))];
        let candidate = TimeWindow::new(
            at(11, 0) + chrono::Duration::milliseconds(500),
            at(12, 0),
        );

        assert!(conflicts(&existing, &candidate, None, Boundary::Inclusive));
    }

    #[test]
    fn test_touching_windows_conflict_when_inclusive() {
        let existing = [lesson(1, (14, 0), (16, 30))];
        let candidate = window((16, 30), (17, 30));

        assert!(conflicts(&existing, &candidate, None, Boundary::Inclusive));
        assert!(!conflicts(&existing, &candidate, None, Boundary::Exclusive));
    }

    #[test]
    fn test_containment_conflicts() {
        let existing = [lesson(1, (14, 0), (16, 30))];
        let candidate = window((12, 0), (17, 30));

        assert!(conflicts(&existing, &candidate, None, Boundary::Inclusive));
        assert!(conflicts(&existing, &candidate, None, Boundary::Exclusive));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let pairs = [
            (window((9, 0), (10, 0)), window((9, 30), (11, 0))),
            (window((9, 0), (10, 0)), window((10, 0), (11, 0))),
            (window((9, 0), (12, 0)), window((10, 0), (11, 0))),
            (window((9, 0), (10, 0)), window((10, 1), (11, 0))),
            (window((8, 0), (8, 30)), window((13, 0), (14, 0))),
        ];

        for boundary in [Boundary::Inclusive, Boundary::Exclusive] {
            for (a, b) in pairs {
                let ab = conflicts(&[LessonWindow { lesson_id: 1, window: a }], &b, None, boundary);
                let ba = conflicts(&[LessonWindow { lesson_id: 2, window: b }], &a, None, boundary);
                assert_eq!(ab, ba, "{boundary:?}: {a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_disjoint_windows_do_not_conflict() {
        let existing = [lesson(1, (9, 0), (10, 0)), lesson(2, (13, 0), (14, 0))];
        let candidate = window((10, 30), (12, 0));
        assert!(!conflicts(&existing, &candidate, None, Boundary::Inclusive));
    }

    #[test]
    fn test_excluded_lesson_is_ignored() {
        let existing = [lesson(1, (9, 0), (10, 0)), lesson(2, (13, 0), (14, 0))];
        let candidate = window((9, 15), (10, 15));

        assert!(conflicts(&existing, &candidate, None, Boundary::Inclusive));
        assert!(!conflicts(&existing, &candidate, Some(1), Boundary::Inclusive));
        assert!(conflicts(&existing, &candidate, Some(2), Boundary::Inclusive));
    }

    #[test]
    fn test_no_existing_lessons() {
        assert!(!conflicts(&[], &window((9, 0), (10, 0)), None, Boundary::Inclusive));
    }

    #[test]
    fn test_repeated_checks_are_stable() {
        let existing = [lesson(1, (14, 0), (16, 30))];
        let candidate = window((16, 0), (17, 0));
        let first = conflicts(&existing, &candidate, None, Boundary::Inclusive);
        for _ in 0..5 {
            assert_eq!(conflicts(&existing, &candidate, None, Boundary::Inclusive), first);
        }
    }
}
