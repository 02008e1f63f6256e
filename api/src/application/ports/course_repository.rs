use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::courses::course::{Course, CourseChanges, NewCourse};

/// Raised by `create` and `update_owned` when another course already uses the
/// slug.
#[derive(thiserror::Error, Debug)]
#[error("course slug `{0}` is already taken")]
pub struct SlugTaken(pub String);

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Newest first, optionally restricted to one subject (by slug).
    async fn list(&self, subject_slug: Option<String>) -> anyhow::Result<Vec<Course>>;
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Course>>;
    async fn list_owned(&self, owner_id: Uuid) -> anyhow::Result<Vec<Course>>;
    async fn list_enrolled(&self, student_id: Uuid) -> anyhow::Result<Vec<Course>>;
    async fn create(&self, course: &NewCourse) -> anyhow::Result<Course>;

    // Returns None when the course does not exist or is owned by someone else
    async fn update_owned(
        &self,
        id: i64,
        owner_id: Uuid,
        changes: &CourseChanges,
    ) -> anyhow::Result<Option<Course>>;
    async fn delete_owned(&self, id: i64, owner_id: Uuid) -> anyhow::Result<bool>;

    /// Returns false when the student was already enrolled.
    async fn add_student(&self, course_id: i64, student_id: Uuid) -> anyhow::Result<bool>;
}
