use crate::application::ports::course_repository::CourseRepository;
use crate::application::ports::subject_repository::SubjectRepository;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::ValidationError;
use crate::domain::courses::course::{Course, NewCourse};

pub struct CreateCourse<'a, C, S>
where
    C: CourseRepository + ?Sized,
    S: SubjectRepository + ?Sized,
{
    pub courses: &'a C,
    pub subjects: &'a S,
}

impl<'a, C, S> CreateCourse<'a, C, S>
where
    C: CourseRepository + ?Sized,
    S: SubjectRepository + ?Sized,
{
    /// The owner recorded on `course` is the acting principal.
    pub async fn execute(&self, course: &NewCourse) -> Result<Course, CourseUseCaseError> {
        course.validate()?;
        if self.subjects.get_by_id(course.subject_id).await?.is_none() {
            return Err(ValidationError::UnknownReference { field: "subject" }.into());
        }
        let created = self.courses.create(course).await.map_err(super::slug_conflict)?;
        tracing::info!(course_id = created.id, owner_id = %created.owner_id, "course_created");
        Ok(created)
    }
}
