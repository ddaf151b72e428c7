use crate::domain::repository::{
    ChapterRepository, CourseRepository, EnrollmentRepository, LessonRepository, UserRepository,
};
use crate::domain::types::{EnrollOutcome, EnrolledCourse};
use crate::error::AcademyError;
use crate::usecase::catalog::course_details_by_ids;

// ── Enroll ───────────────────────────────────────────────────────────────────

pub struct EnrollUseCase<C: CourseRepository, E: EnrollmentRepository> {
    pub courses: C,
    pub enrollments: E,
}

impl<C: CourseRepository, E: EnrollmentRepository> EnrollUseCase<C, E> {
    /// Idempotent: a second call for the same pair yields [`AcademyError::AlreadyEnrolled`]
    /// and never a second row.
    pub async fn execute(&self, user_id: i64, course_id: i64) -> Result<(), AcademyError> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or(AcademyError::CourseNotFound)?;

        match self.enrollments.enroll(user_id, course_id).await? {
            EnrollOutcome::Enrolled => {
                tracing::info!(user_id, course_id, "enrolled");
                Ok(())
            }
            EnrollOutcome::AlreadyEnrolled => Err(AcademyError::AlreadyEnrolled),
        }
    }
}

// ── ListMyCourses ────────────────────────────────────────────────────────────

pub struct ListMyCoursesUseCase<E, C, H, L, U>
where
    E: EnrollmentRepository,
    C: CourseRepository,
    H: ChapterRepository,
    L: LessonRepository,
    U: UserRepository,
{
    pub enrollments: E,
    pub courses: C,
    pub chapters: H,
    pub lessons: L,
    pub users: U,
}

impl<E, C, H, L, U> ListMyCoursesUseCase<E, C, H, L, U>
where
    E: EnrollmentRepository,
    C: CourseRepository,
    H: ChapterRepository,
    L: LessonRepository,
    U: UserRepository,
{
    pub async fn execute(&self, user_id: i64) -> Result<Vec<EnrolledCourse>, AcademyError> {
        let enrollments = self.enrollments.list_by_user(user_id).await?;
        let course_ids: Vec<i64> = enrollments.iter().map(|e| e.course_id).collect();
        let mut courses = course_details_by_ids(
            &course_ids,
            &self.courses,
            &self.chapters,
            &self.lessons,
            &self.users,
        )
        .await?;

        // A course deleted between the two reads drops out with its enrollment.
        Ok(enrollments
            .into_iter()
            .filter_map(|enrollment| {
                courses
                    .remove(&enrollment.course_id)
                    .map(|course| EnrolledCourse { enrollment, course })
            })
            .collect())
    }
}
