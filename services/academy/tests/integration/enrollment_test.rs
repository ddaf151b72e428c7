use academy::domain::repository::{CourseRepository, EnrollmentRepository, UserRepository};
use academy::domain::types::{EnrollOutcome, NewCourse, NewUser};
use academy::error::AcademyError;
use academy::infra::db::{DbCourseRepository, DbEnrollmentRepository, DbUserRepository};
use academy::usecase::enrollment::{EnrollUseCase, ListMyCoursesUseCase};
use academy_domain::course::CourseLevel;
use academy_domain::user::AuthType;
use sea_orm_migration::MigratorTrait as _;

use crate::helpers::{MockCatalog, MockEnrollmentRepo, MockUserRepo, test_user};

fn enroll(
    catalog: &MockCatalog,
    enrollments: &MockEnrollmentRepo,
) -> EnrollUseCase<MockCatalog, MockEnrollmentRepo> {
    EnrollUseCase {
        courses: catalog.clone(),
        enrollments: enrollments.clone(),
    }
}

#[tokio::test]
async fn should_enroll_once_and_reject_repeat() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let enrollments = MockEnrollmentRepo::default();
    let usecase = enroll(&catalog, &enrollments);

    usecase.execute(1, course).await.unwrap();
    let result = usecase.execute(1, course).await;

    assert!(
        matches!(result, Err(AcademyError::AlreadyEnrolled)),
        "expected AlreadyEnrolled, got {result:?}"
    );
    assert_eq!(enrollments.count(), 1);
}

#[tokio::test]
async fn should_enroll_exactly_once_under_concurrent_requests() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let enrollments = MockEnrollmentRepo::default();
    let usecase = enroll(&catalog, &enrollments);

    let (first, second) = tokio::join!(usecase.execute(1, course), usecase.execute(1, course));

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(AcademyError::AlreadyEnrolled)))
            .count(),
        1
    );
    assert_eq!(enrollments.count(), 1);
}

#[tokio::test]
async fn should_let_different_users_enroll_in_same_course() {
    let catalog = MockCatalog::empty();
    let course = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let enrollments = MockEnrollmentRepo::default();
    let usecase = enroll(&catalog, &enrollments);

    usecase.execute(1, course).await.unwrap();
    usecase.execute(2, course).await.unwrap();

    assert_eq!(enrollments.count(), 2);
}

#[tokio::test]
async fn should_not_enroll_in_missing_course() {
    let enrollments = MockEnrollmentRepo::default();
    let result = enroll(&MockCatalog::empty(), &enrollments)
        .execute(1, 404)
        .await;

    assert!(matches!(result, Err(AcademyError::CourseNotFound)));
    assert_eq!(enrollments.count(), 0);
}

#[tokio::test]
async fn should_list_only_callers_courses_with_nested_detail() {
    let catalog = MockCatalog::empty();
    let rust = catalog.add_course("Rust", CourseLevel::Beginner, 1);
    let go = catalog.add_course("Go", CourseLevel::Beginner, 1);
    let chapter = catalog.add_chapter(rust, "Basics", 0);
    catalog.add_lesson(chapter, "Variables", 0);

    let enrollments = MockEnrollmentRepo::default();
    let usecase = enroll(&catalog, &enrollments);
    usecase.execute(1, rust).await.unwrap();
    usecase.execute(2, go).await.unwrap();

    let list = ListMyCoursesUseCase {
        enrollments: enrollments.clone(),
        courses: catalog.clone(),
        chapters: catalog.clone(),
        lessons: catalog.clone(),
        users: MockUserRepo::new(vec![test_user()]),
    };
    let mine = list.execute(1).await.unwrap();

    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].enrollment.user_id, 1);
    assert_eq!(mine[0].course.course.id, rust);
    assert_eq!(mine[0].course.created_by, "alice");
    assert_eq!(mine[0].course.chapters.len(), 1);
    assert_eq!(mine[0].course.chapters[0].lessons.len(), 1);
}

#[tokio::test]
async fn should_return_empty_list_without_enrollments() {
    let catalog = MockCatalog::empty();
    let list = ListMyCoursesUseCase {
        enrollments: MockEnrollmentRepo::default(),
        courses: catalog.clone(),
        chapters: catalog.clone(),
        lessons: catalog.clone(),
        users: MockUserRepo::empty(),
    };
    assert!(list.execute(1).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // requires postgres at DATABASE_URL
async fn should_insert_one_row_for_racing_enrolls_in_postgres() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
    let db = sea_orm::Database::connect(&url).await.unwrap();
    academy_migration::Migrator::up(&db, None).await.unwrap();

    let suffix = chrono::Utc::now().timestamp_nanos_opt().unwrap();
    let user = DbUserRepository { db: db.clone() }
        .create(&NewUser {
            username: format!("racer{suffix}"),
            email: None,
            phone_number: Some(format!("+1{}", suffix % 10_000_000_000)),
            password_hash: "x".to_owned(),
            auth_type: AuthType::ViaPhone,
        })
        .await
        .unwrap();
    let course = DbCourseRepository { db: db.clone() }
        .create(&NewCourse {
            title: "Rust".to_owned(),
            description: String::new(),
            level: CourseLevel::Beginner,
            created_by: user.id,
        })
        .await
        .unwrap();

    let repo = DbEnrollmentRepository { db };
    let (a, b) = tokio::join!(
        repo.enroll(user.id, course.id),
        repo.enroll(user.id, course.id)
    );

    let mut outcomes = [a.unwrap(), b.unwrap()];
    outcomes.sort_by_key(|o| *o == EnrollOutcome::AlreadyEnrolled);
    assert_eq!(
        outcomes,
        [EnrollOutcome::Enrolled, EnrollOutcome::AlreadyEnrolled]
    );
    assert_eq!(repo.list_by_user(user.id).await.unwrap().len(), 1);
}
