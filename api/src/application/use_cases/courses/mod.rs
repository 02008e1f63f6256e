pub mod create_course;
pub mod delete_course;
pub mod enroll;
pub mod get_contents;
pub mod get_course;
pub mod list_courses;
pub mod list_enrolled;
pub mod list_owned;
pub mod update_course;

use crate::application::ports::course_repository::SlugTaken;
use crate::application::use_cases::CourseUseCaseError;

fn slug_conflict(err: anyhow::Error) -> CourseUseCaseError {
    if err.is::<SlugTaken>() {
        CourseUseCaseError::Conflict { field: "slug" }
    } else {
        CourseUseCaseError::Store(err)
    }
}
