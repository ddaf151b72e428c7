//! Course, chapter and lesson CRUD with nested read representations.

use std::collections::HashMap;

use academy_domain::course::CourseLevel;
use url::Url;

use crate::domain::repository::{
    ChapterRepository, CourseRepository, LessonRepository, UserRepository,
};
use crate::domain::types::{
    Chapter, ChapterChanges, ChapterDetail, Course, CourseChanges, CourseDetail, Lesson,
    LessonChanges, NewChapter, NewCourse, NewLesson,
};
use crate::error::AcademyError;

const MAX_TITLE_LEN: usize = 255;

const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

fn check_title(title: &str) -> Result<(), AcademyError> {
    if title.trim().is_empty() {
        return Err(AcademyError::InvalidInput(
            "title: This field may not be blank.".to_owned(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AcademyError::InvalidInput(format!(
            "title: Ensure this field has no more than {MAX_TITLE_LEN} characters."
        )));
    }
    Ok(())
}

fn check_order(order: i32) -> Result<(), AcademyError> {
    if order < 0 {
        return Err(AcademyError::InvalidInput(
            "order: Ensure this value is greater than or equal to 0.".to_owned(),
        ));
    }
    Ok(())
}

/// Blank becomes `None`; anything else must be an absolute URL with a host.
pub fn normalize_video_url(raw: Option<String>) -> Result<Option<String>, AcademyError> {
    let Some(raw) = raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match Url::parse(&raw) {
        Ok(url) if URL_SCHEMES.contains(&url.scheme()) && url.has_host() => Ok(Some(raw)),
        _ => Err(AcademyError::InvalidInput(
            "video_url: Enter a valid URL.".to_owned(),
        )),
    }
}

// ── Nested assembly ──────────────────────────────────────────────────────────

async fn chapter_details<L: LessonRepository>(
    chapters: Vec<Chapter>,
    lessons: &L,
) -> Result<Vec<ChapterDetail>, AcademyError> {
    let ids: Vec<i64> = chapters.iter().map(|c| c.id).collect();
    let mut grouped: HashMap<i64, Vec<Lesson>> = HashMap::new();
    for lesson in lessons.list_by_chapters(&ids).await? {
        grouped.entry(lesson.chapter_id).or_default().push(lesson);
    }
    Ok(chapters
        .into_iter()
        .map(|chapter| {
            let mut lessons = grouped.remove(&chapter.id).unwrap_or_default();
            lessons.sort_by_key(|l| (l.order, l.id));
            ChapterDetail { chapter, lessons }
        })
        .collect())
}

async fn course_details<H, L, U>(
    courses: Vec<Course>,
    chapters: &H,
    lessons: &L,
    users: &U,
) -> Result<Vec<CourseDetail>, AcademyError>
where
    H: ChapterRepository,
    L: LessonRepository,
    U: UserRepository,
{
    let course_ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
    let mut creator_ids: Vec<i64> = courses.iter().map(|c| c.created_by).collect();
    creator_ids.sort_unstable();
    creator_ids.dedup();

    let mut all_chapters = chapters.list_by_courses(&course_ids).await?;
    all_chapters.sort_by_key(|c| (c.order, c.id));

    let mut grouped: HashMap<i64, Vec<ChapterDetail>> = HashMap::new();
    for detail in chapter_details(all_chapters, lessons).await? {
        grouped
            .entry(detail.chapter.course_id)
            .or_default()
            .push(detail);
    }
    let usernames = users.usernames(&creator_ids).await?;

    Ok(courses
        .into_iter()
        .map(|course| CourseDetail {
            created_by: usernames
                .get(&course.created_by)
                .cloned()
                .unwrap_or_default(),
            chapters: grouped.remove(&course.id).unwrap_or_default(),
            course,
        })
        .collect())
}

// ── Courses ──────────────────────────────────────────────────────────────────

pub struct CourseInput {
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
}

pub struct CourseUseCase<C, H, L, U>
where
    C: CourseRepository,
    H: ChapterRepository,
    L: LessonRepository,
    U: UserRepository,
{
    pub courses: C,
    pub chapters: H,
    pub lessons: L,
    pub users: U,
}

impl<C, H, L, U> CourseUseCase<C, H, L, U>
where
    C: CourseRepository,
    H: ChapterRepository,
    L: LessonRepository,
    U: UserRepository,
{
    pub async fn list(
        &self,
        level: Option<CourseLevel>,
    ) -> Result<Vec<CourseDetail>, AcademyError> {
        let courses = self.courses.list(level).await?;
        course_details(courses, &self.chapters, &self.lessons, &self.users).await
    }

    pub async fn get(&self, id: i64) -> Result<CourseDetail, AcademyError> {
        let course = self
            .courses
            .find_by_id(id)
            .await?
            .ok_or(AcademyError::CourseNotFound)?;
        self.detail(course).await
    }

    /// `creator_id` is always the authenticated caller.
    pub async fn create(
        &self,
        creator_id: i64,
        input: CourseInput,
    ) -> Result<CourseDetail, AcademyError> {
        check_title(&input.title)?;
        let course = self
            .courses
            .create(&NewCourse {
                title: input.title,
                description: input.description,
                level: input.level,
                created_by: creator_id,
            })
            .await?;
        tracing::info!(course_id = course.id, created_by = creator_id, "course created");
        self.detail(course).await
    }

    pub async fn update(
        &self,
        id: i64,
        changes: CourseChanges,
    ) -> Result<CourseDetail, AcademyError> {
        if let Some(ref title) = changes.title {
            check_title(title)?;
        }
        let course = self
            .courses
            .update(id, &changes)
            .await?
            .ok_or(AcademyError::CourseNotFound)?;
        self.detail(course).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AcademyError> {
        if !self.courses.delete(id).await? {
            return Err(AcademyError::CourseNotFound);
        }
        tracing::info!(course_id = id, "course deleted");
        Ok(())
    }

    async fn detail(&self, course: Course) -> Result<CourseDetail, AcademyError> {
        course_details(vec![course], &self.chapters, &self.lessons, &self.users)
            .await?
            .pop()
            .ok_or(AcademyError::CourseNotFound)
    }
}

/// Course listing for callers that only hold the course ids, e.g. enrollments.
pub async fn course_details_by_ids<C, H, L, U>(
    ids: &[i64],
    courses: &C,
    chapters: &H,
    lessons: &L,
    users: &U,
) -> Result<HashMap<i64, CourseDetail>, AcademyError>
where
    C: CourseRepository,
    H: ChapterRepository,
    L: LessonRepository,
    U: UserRepository,
{
    let found = courses.list_by_ids(ids).await?;
    Ok(course_details(found, chapters, lessons, users)
        .await?
        .into_iter()
        .map(|d| (d.course.id, d))
        .collect())
}

// ── Chapters ─────────────────────────────────────────────────────────────────

pub struct ChapterUseCase<C: CourseRepository, H: ChapterRepository, L: LessonRepository> {
    pub courses: C,
    pub chapters: H,
    pub lessons: L,
}

impl<C, H, L> ChapterUseCase<C, H, L>
where
    C: CourseRepository,
    H: ChapterRepository,
    L: LessonRepository,
{
    pub async fn list(&self) -> Result<Vec<ChapterDetail>, AcademyError> {
        let chapters = self.chapters.list().await?;
        chapter_details(chapters, &self.lessons).await
    }

    pub async fn get(&self, id: i64) -> Result<ChapterDetail, AcademyError> {
        let chapter = self
            .chapters
            .find_by_id(id)
            .await?
            .ok_or(AcademyError::ChapterNotFound)?;
        self.detail(chapter).await
    }

    pub async fn create(&self, input: NewChapter) -> Result<ChapterDetail, AcademyError> {
        check_title(&input.title)?;
        check_order(input.order)?;
        self.ensure_course(input.course_id).await?;
        let chapter = self.chapters.create(&input).await?;
        self.detail(chapter).await
    }

    pub async fn update(
        &self,
        id: i64,
        changes: ChapterChanges,
    ) -> Result<ChapterDetail, AcademyError> {
        if let Some(ref title) = changes.title {
            check_title(title)?;
        }
        if let Some(order) = changes.order {
            check_order(order)?;
        }
        if let Some(course_id) = changes.course_id {
            self.ensure_course(course_id).await?;
        }
        let chapter = self
            .chapters
            .update(id, &changes)
            .await?
            .ok_or(AcademyError::ChapterNotFound)?;
        self.detail(chapter).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AcademyError> {
        if !self.chapters.delete(id).await? {
            return Err(AcademyError::ChapterNotFound);
        }
        Ok(())
    }

    async fn ensure_course(&self, course_id: i64) -> Result<(), AcademyError> {
        self.courses
            .find_by_id(course_id)
            .await?
            .map(|_| ())
            .ok_or(AcademyError::CourseNotFound)
    }

    async fn detail(&self, chapter: Chapter) -> Result<ChapterDetail, AcademyError> {
        chapter_details(vec![chapter], &self.lessons)
            .await?
            .pop()
            .ok_or(AcademyError::ChapterNotFound)
    }
}

// ── Lessons ──────────────────────────────────────────────────────────────────

pub struct LessonUseCase<H: ChapterRepository, L: LessonRepository> {
    pub chapters: H,
    pub lessons: L,
}

impl<H: ChapterRepository, L: LessonRepository> LessonUseCase<H, L> {
    pub async fn list(&self) -> Result<Vec<Lesson>, AcademyError> {
        self.lessons.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Lesson, AcademyError> {
        self.lessons
            .find_by_id(id)
            .await?
            .ok_or(AcademyError::LessonNotFound)
    }

    pub async fn create(&self, input: NewLesson) -> Result<Lesson, AcademyError> {
        check_title(&input.title)?;
        check_order(input.order)?;
        let input = NewLesson {
            video_url: normalize_video_url(input.video_url)?,
            ..input
        };
        self.ensure_chapter(input.chapter_id).await?;
        self.lessons.create(&input).await
    }

    pub async fn update(&self, id: i64, changes: LessonChanges) -> Result<Lesson, AcademyError> {
        if let Some(ref title) = changes.title {
            check_title(title)?;
        }
        if let Some(order) = changes.order {
            check_order(order)?;
        }
        if let Some(chapter_id) = changes.chapter_id {
            self.ensure_chapter(chapter_id).await?;
        }
        let changes = LessonChanges {
            video_url: changes.video_url.map(normalize_video_url).transpose()?,
            ..changes
        };
        self.lessons
            .update(id, &changes)
            .await?
            .ok_or(AcademyError::LessonNotFound)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AcademyError> {
        if !self.lessons.delete(id).await? {
            return Err(AcademyError::LessonNotFound);
        }
        Ok(())
    }

    async fn ensure_chapter(&self, chapter_id: i64) -> Result<(), AcademyError> {
        self.chapters
            .find_by_id(chapter_id)
            .await?
            .map(|_| ())
            .ok_or(AcademyError::ChapterNotFound)
    }
}
