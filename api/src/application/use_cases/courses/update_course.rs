use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::course_repository::CourseRepository;
use crate::application::ports::subject_repository::SubjectRepository;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::ValidationError;
use crate::domain::courses::course::{Course, CourseChanges};

pub struct UpdateCourse<'a, C, S, A>
where
    C: CourseRepository + ?Sized,
    S: SubjectRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub courses: &'a C,
    pub subjects: &'a S,
    pub access: &'a A,
}

impl<'a, C, S, A> UpdateCourse<'a, C, S, A>
where
    C: CourseRepository + ?Sized,
    S: SubjectRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        id: i64,
        changes: &CourseChanges,
    ) -> Result<Course, CourseUseCaseError> {
        access::require_edit(self.access, &Actor::User(user_id), Target::Course(id)).await?;
        changes.validate()?;
        if let Some(subject_id) = changes.subject_id {
            if self.subjects.get_by_id(subject_id).await?.is_none() {
                return Err(ValidationError::UnknownReference { field: "subject" }.into());
            }
        }
        self.courses
            .update_owned(id, user_id, changes)
            .await
            .map_err(super::slug_conflict)?
            .ok_or(CourseUseCaseError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MemoryStore;

    #[tokio::test]
    async fn only_the_owner_updates() {
        let store = MemoryStore::new();
        store.seed_subject("Programming", "programming");
        let owner = Uuid::new_v4();
        let course = store.seed_course(owner, "rust");
        let uc = UpdateCourse {
            courses: &store,
            subjects: &store,
            access: &store,
        };
        let changes = CourseChanges {
            title: Some("Rust, revised".into()),
            ..Default::default()
        };
        assert!(matches!(
            uc.execute(Uuid::new_v4(), course, &changes).await,
            Err(CourseUseCaseError::Forbidden)
        ));
        let updated = uc.execute(owner, course, &changes).await.unwrap();
        assert_eq!(updated.title, "Rust, revised");
        assert_eq!(updated.slug, "rust");
    }

    #[tokio::test]
    async fn moving_onto_a_taken_slug_is_a_conflict() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let course = store.seed_course(owner, "rust");
        store.seed_course(Uuid::new_v4(), "go");
        let uc = UpdateCourse {
            courses: &store,
            subjects: &store,
            access: &store,
        };
        let changes = CourseChanges {
            slug: Some("go".into()),
            ..Default::default()
        };
        assert!(matches!(
            uc.execute(owner, course, &changes).await,
            Err(CourseUseCaseError::Conflict { field: "slug" })
        ));
        let same = CourseChanges {
            slug: Some("rust".into()),
            ..Default::default()
        };
        assert_eq!(uc.execute(owner, course, &same).await.unwrap().slug, "rust");
    }
}
