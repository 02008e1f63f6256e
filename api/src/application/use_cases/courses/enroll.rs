use uuid::Uuid;

use crate::application::ports::course_repository::CourseRepository;
use crate::application::use_cases::CourseUseCaseError;

/// Adds the principal to a course's students. Enrolling twice is a no-op.
pub struct EnrollCourse<'a, C: CourseRepository + ?Sized> {
    pub courses: &'a C,
}

impl<'a, C: CourseRepository + ?Sized> EnrollCourse<'a, C> {
    pub async fn execute(&self, course_id: i64, student_id: Uuid) -> Result<(), CourseUseCaseError> {
        if self.courses.get_by_id(course_id).await?.is_none() {
            return Err(CourseUseCaseError::NotFound);
        }
        let added = self.courses.add_student(course_id, student_id).await?;
        if added {
            tracing::info!(course_id, %student_id, "student_enrolled");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MemoryStore;

    #[tokio::test]
    async fn enrolling_twice_keeps_one_enrollment() {
        let store = MemoryStore::new();
        let course = store.seed_course(Uuid::new_v4(), "rust");
        let student = Uuid::new_v4();
        let uc = EnrollCourse { courses: &store };
        uc.execute(course, student).await.unwrap();
        uc.execute(course, student).await.unwrap();
        let stored = store.get_by_id(course).await.unwrap().unwrap();
        assert_eq!(stored.students, vec![student]);
    }

    #[tokio::test]
    async fn unknown_course_is_not_found() {
        let store = MemoryStore::new();
        let uc = EnrollCourse { courses: &store };
        assert!(matches!(
            uc.execute(42, Uuid::new_v4()).await,
            Err(CourseUseCaseError::NotFound)
        ));
    }
}
