//! sea-orm entities for the academy database.

pub mod chapters;
pub mod courses;
pub mod enrollments;
pub mod lessons;
pub mod users;
