use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::course_repository::CourseRepository;
use crate::application::use_cases::CourseUseCaseError;

pub struct DeleteCourse<'a, C, A>
where
    C: CourseRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub courses: &'a C,
    pub access: &'a A,
}

impl<'a, C, A> DeleteCourse<'a, C, A>
where
    C: CourseRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    /// Modules and contents of the course go with it.
    pub async fn execute(&self, user_id: Uuid, id: i64) -> Result<(), CourseUseCaseError> {
        access::require_edit(self.access, &Actor::User(user_id), Target::Course(id)).await?;
        if self.courses.delete_owned(id, user_id).await? {
            tracing::info!(course_id = id, "course_deleted");
            Ok(())
        } else {
            Err(CourseUseCaseError::NotFound)
        }
    }
}
