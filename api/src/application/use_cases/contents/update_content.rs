use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::content_repository::ContentRepository;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::content::{Content, ContentChanges};

pub struct UpdateContent<'a, T, A>
where
    T: ContentRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub contents: &'a T,
    pub access: &'a A,
}

impl<'a, T, A> UpdateContent<'a, T, A>
where
    T: ContentRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        id: i64,
        changes: &ContentChanges,
    ) -> Result<Content, CourseUseCaseError> {
        access::require_edit(self.access, &Actor::User(user_id), Target::Content(id)).await?;
        let current = self
            .contents
            .get_by_id(id)
            .await?
            .ok_or(CourseUseCaseError::NotFound)?;
        changes.validate(current.item.kind())?;
        self.contents
            .update(id, changes)
            .await?
            .ok_or(CourseUseCaseError::NotFound)
    }
}
