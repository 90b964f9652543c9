mod common;

use academy_scheduler::config::SchedulingConfig;
use academy_scheduler::errors::AcademyError;
use academy_scheduler::models::PublicationState;
use academy_scheduler::models::courses::entities::DayPattern;
use academy_scheduler::models::lessons::requests::{
    CreateLessonInput, GenerateLessonsInput, UpdateLessonInput,
};
use academy_scheduler::storage::Storage;
use chrono::{DateTime, Duration, Utc};

use common::*;

fn lesson_input(course_id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> CreateLessonInput {
    CreateLessonInput {
        start_time: start,
        end_time: end,
        description: None,
        course_id,
        publication_state: PublicationState::Draft,
    }
}

fn generate_input(count: u32, pattern: Vec<DayPattern>) -> GenerateLessonsInput {
    GenerateLessonsInput {
        course_start_date: monday(),
        total_number_of_lessons: count,
        weekly_pattern: pattern,
    }
}

#[tokio::test]
async fn test_touching_lessons_conflict() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    fx.lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 14, 0), jan(7, 16, 30)))
        .await
        .unwrap();

    let err = fx
        .lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 16, 30), jan(7, 17, 30)))
        .await
        .unwrap_err();

    assert_eq!(err, AcademyError::conflict("LESSON_TIME_CONFLICT"));
    assert_eq!(fx.storage.lesson_count(), 1);
}

#[tokio::test]
async fn test_containing_lesson_conflicts() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    fx.lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 14, 0), jan(7, 16, 30)))
        .await
        .unwrap();

    let err = fx
        .lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 12, 0), jan(7, 17, 30)))
        .await
        .unwrap_err();
    assert_eq!(err, AcademyError::conflict("LESSON_TIME_CONFLICT"));
}

#[tokio::test]
async fn test_exclusive_boundaries_allow_touching_lessons() {
    let fx = fixture_with(SchedulingConfig {
        inclusive_boundaries: false,
        ..Default::default()
    });
    let course = create_course(&fx, "ALG-101").await;

    fx.lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 14, 0), jan(7, 16, 30)))
        .await
        .unwrap();
    fx.lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 16, 30), jan(7, 17, 30)))
        .await
        .unwrap();

    assert_eq!(fx.storage.lesson_count(), 2);
}

#[tokio::test]
async fn test_lessons_of_other_courses_do_not_conflict() {
    let fx = fixture();
    let first = create_course(&fx, "ALG-101").await;
    let second = create_course(&fx, "ALG-102").await;

    fx.lessons
        .create_lesson(LECTURER, ORG, lesson_input(first.id, jan(7, 14, 0), jan(7, 16, 30)))
        .await
        .unwrap();
    fx.lessons
        .create_lesson(LECTURER, ORG, lesson_input(second.id, jan(7, 14, 0), jan(7, 16, 30)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_inverted_window_rejected() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    let err = fx
        .lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 16, 0), jan(7, 14, 0)))
        .await
        .unwrap_err();

    assert!(matches!(err, AcademyError::Validation(_)));
    assert_eq!(fx.storage.lesson_count(), 0);
}

#[tokio::test]
async fn test_create_lesson_permissions() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;
    let window = |day| lesson_input(course.id, jan(day, 9, 0), jan(day, 10, 0));

    // 学生与非本课程讲师都不能排课
    let err = fx
        .lessons
        .create_lesson(STUDENT, ORG, window(7))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Authorization(_)));

    let err = fx
        .lessons
        .create_lesson(OTHER_LECTURER, ORG, window(7))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Authorization(_)));

    // 本课程讲师与高级角色可以
    fx.lessons
        .create_lesson(LECTURER, ORG, window(7))
        .await
        .unwrap();
    fx.lessons.create_lesson(STAFF, ORG, window(8)).await.unwrap();
    fx.lessons.create_lesson(OWNER, ORG, window(9)).await.unwrap();

    // 目录中不存在的账号
    let err = fx
        .lessons
        .create_lesson(999, ORG, window(10))
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Authorization(_)));

    assert_eq!(fx.storage.lesson_count(), 3);
}

#[tokio::test]
async fn test_create_lesson_missing_org_or_course() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    let err = fx
        .lessons
        .create_lesson(LECTURER, 42, lesson_input(course.id, jan(7, 9, 0), jan(7, 10, 0)))
        .await
        .unwrap_err();
    assert_eq!(err, AcademyError::not_found("ORG_NOT_FOUND"));

    let err = fx
        .lessons
        .create_lesson(LECTURER, ORG, lesson_input(9999, jan(7, 9, 0), jan(7, 10, 0)))
        .await
        .unwrap_err();
    assert_eq!(err, AcademyError::not_found("COURSE_NOT_FOUND"));
}

#[tokio::test]
async fn test_generate_follows_weekly_pattern() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    let generated = fx
        .lessons
        .generate_lessons(LECTURER, ORG, course.id, generate_input(3, two_day_pattern()))
        .await
        .unwrap();

    assert_eq!(generated.count, 3);
    let windows: Vec<_> = generated
        .lessons
        .iter()
        .map(|lesson| (lesson.start_time, lesson.end_time))
        .collect();
    assert_eq!(
        windows,
        vec![
            (jan(7, 9, 0), jan(7, 10, 30)),
            (jan(9, 14, 0), jan(9, 15, 0)),
            (jan(14, 9, 0), jan(14, 10, 30)),
        ]
    );
    assert!(
        generated
            .lessons
            .iter()
            .all(|lesson| lesson.publication_state == PublicationState::Draft
                && lesson.content.is_empty())
    );

    let stored = fx.storage.list_course_lessons(ORG, course.id).await.unwrap();
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn test_generate_with_inverted_pattern_writes_nothing() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    let err = fx
        .lessons
        .generate_lessons(
            LECTURER,
            ORG,
            course.id,
            generate_input(3, vec![DayPattern::new(1, "10:00", "09:00")]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AcademyError::Validation(_)));
    assert_eq!(fx.storage.lesson_count(), 0);
}

#[tokio::test]
async fn test_generate_rejects_empty_pattern_and_bad_targets() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    for input in [
        generate_input(3, Vec::new()),
        generate_input(0, two_day_pattern()),
        generate_input(501, two_day_pattern()),
    ] {
        let err = fx
            .lessons
            .generate_lessons(LECTURER, ORG, course.id, input)
            .await
            .unwrap_err();
        assert!(matches!(err, AcademyError::Validation(_)));
    }
    assert_eq!(fx.storage.lesson_count(), 0);
}

#[tokio::test]
async fn test_generate_rolls_back_on_conflict() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    // 占住第二个窗口（周三 14:00-15:00）
    let blocker = fx
        .lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(9, 14, 30), jan(9, 16, 0)))
        .await
        .unwrap();

    let err = fx
        .lessons
        .generate_lessons(LECTURER, ORG, course.id, generate_input(3, two_day_pattern()))
        .await
        .unwrap_err();
    assert_eq!(err, AcademyError::conflict("LESSON_TIME_CONFLICT"));

    let remaining = fx.storage.list_course_lessons(ORG, course.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, blocker.id);
}

#[tokio::test]
async fn test_generate_unauthorized_writes_nothing() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    let err = fx
        .lessons
        .generate_lessons(OTHER_LECTURER, ORG, course.id, generate_input(3, two_day_pattern()))
        .await
        .unwrap_err();

    assert!(matches!(err, AcademyError::Authorization(_)));
    assert_eq!(fx.storage.lesson_count(), 0);
}

#[tokio::test]
async fn test_generate_honours_utc_offset() {
    // UTC+8：本地 09:00 即 UTC 01:00
    let fx = fixture_with(SchedulingConfig {
        utc_offset_minutes: 480,
        ..Default::default()
    });
    let course = create_course(&fx, "ALG-101").await;

    let generated = fx
        .lessons
        .generate_lessons(
            LECTURER,
            ORG,
            course.id,
            generate_input(1, vec![DayPattern::new(1, "09:00", "10:30")]),
        )
        .await
        .unwrap();

    assert_eq!(generated.lessons[0].start_time, jan(7, 1, 0));
    assert_eq!(generated.lessons[0].end_time, jan(7, 2, 30));
}

#[tokio::test]
async fn test_update_lesson_ignores_its_own_window() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    let lesson = fx
        .lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 14, 0), jan(7, 16, 0)))
        .await
        .unwrap();

    let updated = fx
        .lessons
        .update_lesson(
            LECTURER,
            ORG,
            lesson.id,
            UpdateLessonInput {
                end_time: Some(jan(7, 16, 30)),
                lecturer_comment: Some("Extended for review".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.start_time, jan(7, 14, 0));
    assert_eq!(updated.end_time, jan(7, 16, 30));
    assert_eq!(updated.lecturer_comment.as_deref(), Some("Extended for review"));
}

#[tokio::test]
async fn test_update_lesson_conflicts_with_sibling() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    fx.lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 14, 0), jan(7, 16, 0)))
        .await
        .unwrap();
    let later = fx
        .lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 17, 0), jan(7, 18, 0)))
        .await
        .unwrap();

    let err = fx
        .lessons
        .update_lesson(
            LECTURER,
            ORG,
            later.id,
            UpdateLessonInput {
                start_time: Some(jan(7, 16, 0)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, AcademyError::conflict("LESSON_TIME_CONFLICT"));

    let unchanged = fx.storage.get_lesson(ORG, later.id).await.unwrap().unwrap();
    assert_eq!(unchanged.start_time, jan(7, 17, 0));
}

#[tokio::test]
async fn test_update_lesson_absent_students_must_be_enrolled() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;
    let lesson = fx
        .lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 9, 0), jan(7, 10, 0)))
        .await
        .unwrap();

    let absent = || UpdateLessonInput {
        absent_student_ids: Some(vec![STUDENT]),
        ..Default::default()
    };

    let err = fx
        .lessons
        .update_lesson(LECTURER, ORG, lesson.id, absent())
        .await
        .unwrap_err();
    assert!(matches!(err, AcademyError::Validation(_)));

    assert!(fx.storage.enroll_students(course.id, &[STUDENT]));
    let updated = fx
        .lessons
        .update_lesson(LECTURER, ORG, lesson.id, absent())
        .await
        .unwrap();
    assert_eq!(updated.absent_student_ids, vec![STUDENT]);
}

#[tokio::test]
async fn test_update_missing_lesson() {
    let fx = fixture();
    let err = fx
        .lessons
        .update_lesson(LECTURER, ORG, 4242, UpdateLessonInput::default())
        .await
        .unwrap_err();
    assert_eq!(err, AcademyError::not_found("LESSON_NOT_FOUND"));
}

#[tokio::test]
async fn test_subsecond_window_collapses_and_is_rejected() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    let start = jan(7, 10, 0) + Duration::milliseconds(100);
    let end = jan(7, 10, 0) + Duration::milliseconds(900);
    let err = fx
        .lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, start, end))
        .await
        .unwrap_err();

    assert!(matches!(err, AcademyError::Validation(_)));
    assert_eq!(fx.storage.lesson_count(), 0);
}

#[tokio::test]
async fn test_subsecond_start_after_lesson_end_still_conflicts() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    fx.lessons
        .create_lesson(LECTURER, ORG, lesson_input(course.id, jan(7, 10, 0), jan(7, 11, 0)))
        .await
        .unwrap();

    let err = fx
        .lessons
        .create_lesson(
            LECTURER,
            ORG,
            lesson_input(
                course.id,
                jan(7, 11, 0) + Duration::milliseconds(500),
                jan(7, 12, 0),
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err, AcademyError::conflict("LESSON_TIME_CONFLICT"));
}

#[tokio::test]
async fn test_stored_times_are_whole_seconds() {
    let fx = fixture();
    let course = create_course(&fx, "ALG-101").await;

    let lesson = fx
        .lessons
        .create_lesson(
            LECTURER,
            ORG,
            lesson_input(
                course.id,
                jan(7, 9, 0) + Duration::milliseconds(250),
                jan(7, 10, 0) + Duration::milliseconds(750),
            ),
        )
        .await
        .unwrap();
    assert_eq!(lesson.start_time, jan(7, 9, 0));
    assert_eq!(lesson.end_time, jan(7, 10, 0));

    let updated = fx
        .lessons
        .update_lesson(
            LECTURER,
            ORG,
            lesson.id,
            UpdateLessonInput {
                end_time: Some(jan(7, 10, 30) + Duration::milliseconds(999)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.end_time, jan(7, 10, 30));
}
