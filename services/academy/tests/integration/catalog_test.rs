use academy::domain::types::{ChapterChanges, CourseChanges, LessonChanges, NewChapter, NewLesson};
use academy::error::AcademyError;
use academy::usecase::catalog::{ChapterUseCase, CourseInput, CourseUseCase, LessonUseCase};
use academy_domain::course::CourseLevel;

use crate::helpers::{MockCatalog, MockUserRepo, test_user};

fn courses(catalog: &MockCatalog) -> CourseUseCase<MockCatalog, MockCatalog, MockCatalog, MockUserRepo> {
    CourseUseCase {
        courses: catalog.clone(),
        chapters: catalog.clone(),
        lessons: catalog.clone(),
        users: MockUserRepo::new(vec![test_user()]),
    }
}

fn chapters(catalog: &MockCatalog) -> ChapterUseCase<MockCatalog, MockCatalog, MockCatalog> {
    ChapterUseCase {
        courses: catalog.clone(),
        chapters: catalog.clone(),
        lessons: catalog.clone(),
    }
}

fn lessons(catalog: &MockCatalog) -> LessonUseCase<MockCatalog, MockCatalog> {
    LessonUseCase {
        chapters: catalog.clone(),
        lessons: catalog.clone(),
    }
}

fn new_lesson(chapter_id: i64, video_url: Option<&str>) -> NewLesson {
    NewLesson {
        chapter_id,
        title: "Ownership".to_owned(),
        content: "Moves and borrows".to_owned(),
        video_url: video_url.map(str::to_owned),
        order: 0,
        is_free_preview: true,
    }
}

// ── Courses ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_stamp_caller_as_course_creator() {
    let catalog = MockCatalog::empty();

    let detail = courses(&catalog)
        .create(
            1,
            CourseInput {
                title: "Rust".to_owned(),
                description: "Systems programming".to_owned(),
                level: CourseLevel::Beginner,
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.course.created_by, 1);
    assert_eq!(detail.created_by, "alice");
    assert!(detail.chapters.is_empty());
}

#[tokio::test]
async fn should_reject_blank_course_title() {
    let result = courses(&MockCatalog::empty())
        .create(
            1,
            CourseInput {
                title: "   ".to_owned(),
                description: String::new(),
                level: CourseLevel::Beginner,
            },
        )
        .await;
    assert!(matches!(result, Err(AcademyError::InvalidInput(_))));
}

#[tokio::test]
async fn should_nest_chapters_and_lessons_in_order() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let late = catalog.add_chapter(course, "Async", 2);
    let early = catalog.add_chapter(course, "Basics", 1);
    let second = catalog.add_lesson(early, "Borrowing", 5);
    let first = catalog.add_lesson(early, "Variables", 0);

    let detail = courses(&catalog).get(course).await.unwrap();

    let chapter_ids: Vec<i64> = detail.chapters.iter().map(|c| c.chapter.id).collect();
    assert_eq!(chapter_ids, vec![early, late]);
    let lesson_ids: Vec<i64> = detail.chapters[0].lessons.iter().map(|l| l.id).collect();
    assert_eq!(lesson_ids, vec![first, second]);
    assert!(detail.chapters[1].lessons.is_empty());
}

#[tokio::test]
async fn should_filter_courses_by_level() {
    let catalog = MockCatalog::empty();
    catalog.add_course("Intro", CourseLevel::Beginner, 1);
    let advanced = catalog.add_course("Unsafe", CourseLevel::Advanced, 1);

    let all = courses(&catalog).list(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let filtered = courses(&catalog)
        .list(Some(CourseLevel::Advanced))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].course.id, advanced);
}

#[tokio::test]
async fn should_patch_only_given_course_fields() {
    let catalog = MockCatalog::empty();
    let id = catalog.add_course("Rust", CourseLevel::Beginner, 1);

    let detail = courses(&catalog)
        .update(
            id,
            CourseChanges {
                level: Some(CourseLevel::Intermediate),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.course.title, "Rust");
    assert_eq!(detail.course.level, CourseLevel::Intermediate);
}

#[tokio::test]
async fn should_cascade_course_delete() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let chapter = catalog.add_chapter(course, "Basics", 0);
    catalog.add_lesson(chapter, "Variables", 0);

    courses(&catalog).delete(course).await.unwrap();

    assert_eq!(catalog.chapter_count(), 0);
    assert_eq!(catalog.lesson_count(), 0);
    assert!(matches!(
        courses(&catalog).get(course).await,
        Err(AcademyError::CourseNotFound)
    ));
    assert!(matches!(
        courses(&catalog).delete(course).await,
        Err(AcademyError::CourseNotFound)
    ));
}

// ── Chapters ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_existing_course_for_chapter() {
    let result = chapters(&MockCatalog::empty())
        .create(NewChapter {
            course_id: 404,
            title: "Orphan".to_owned(),
            order: 0,
        })
        .await;
    assert!(
        matches!(result, Err(AcademyError::CourseNotFound)),
        "expected CourseNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_negative_chapter_order() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let result = chapters(&catalog)
        .create(NewChapter {
            course_id: course,
            title: "Basics".to_owned(),
            order: -1,
        })
        .await;
    assert!(matches!(result, Err(AcademyError::InvalidInput(_))));
}

#[tokio::test]
async fn should_move_chapter_between_courses() {
    let catalog = MockCatalog::empty();
    let from = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let to = catalog.add_course("Go", CourseLevel::Beginner, 1);
    let chapter = catalog.add_chapter(from, "Basics", 0);

    let detail = chapters(&catalog)
        .update(
            chapter,
            ChapterChanges {
                course_id: Some(to),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(detail.chapter.course_id, to);

    let result = chapters(&catalog)
        .update(
            chapter,
            ChapterChanges {
                course_id: Some(404),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AcademyError::CourseNotFound)));
}

#[tokio::test]
async fn should_report_missing_chapter() {
    let catalog = MockCatalog::empty();
    assert!(matches!(
        chapters(&catalog).get(1).await,
        Err(AcademyError::ChapterNotFound)
    ));
    assert!(matches!(
        chapters(&catalog)
            .update(1, ChapterChanges::default())
            .await,
        Err(AcademyError::ChapterNotFound)
    ));
}

// ── Lessons ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_lesson_with_trimmed_video_url() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let chapter = catalog.add_chapter(course, "Basics", 0);

    let lesson = lessons(&catalog)
        .create(new_lesson(chapter, Some(" https://videos.example.com/1 ")))
        .await
        .unwrap();

    assert_eq!(lesson.video_url.as_deref(), Some("https://videos.example.com/1"));
    assert!(lesson.is_free_preview);
}

#[tokio::test]
async fn should_reject_invalid_video_url() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let chapter = catalog.add_chapter(course, "Basics", 0);

    let result = lessons(&catalog)
        .create(new_lesson(chapter, Some("not a url")))
        .await;
    assert!(matches!(result, Err(AcademyError::InvalidInput(_))));
    assert_eq!(catalog.lesson_count(), 0);
}

#[tokio::test]
async fn should_require_existing_chapter_for_lesson() {
    let result = lessons(&MockCatalog::empty())
        .create(new_lesson(404, None))
        .await;
    assert!(matches!(result, Err(AcademyError::ChapterNotFound)));
}

#[tokio::test]
async fn should_clear_video_url_with_explicit_null() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let chapter = catalog.add_chapter(course, "Basics", 0);
    let created = lessons(&catalog)
        .create(new_lesson(chapter, Some("https://videos.example.com/1")))
        .await
        .unwrap();

    let untouched = lessons(&catalog)
        .update(
            created.id,
            LessonChanges {
                title: Some("Renamed".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(untouched.video_url, created.video_url);

    let cleared = lessons(&catalog)
        .update(
            created.id,
            LessonChanges {
                video_url: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.video_url, None);
    assert_eq!(cleared.title, "Renamed");
}

#[tokio::test]
async fn should_delete_lesson_once() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let chapter = catalog.add_chapter(course, "Basics", 0);
    let lesson = catalog.add_lesson(chapter, "Variables", 0);

    lessons(&catalog).delete(lesson).await.unwrap();
    assert!(matches!(
        lessons(&catalog).delete(lesson).await,
        Err(AcademyError::LessonNotFound)
    ));
}
