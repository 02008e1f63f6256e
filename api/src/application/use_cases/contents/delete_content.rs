use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::content_repository::ContentRepository;
use crate::application::use_cases::CourseUseCaseError;

pub struct DeleteContent<'a, T, A>
where
    T: ContentRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub contents: &'a T,
    pub access: &'a A,
}

impl<'a, T, A> DeleteContent<'a, T, A>
where
    T: ContentRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid, id: i64) -> Result<(), CourseUseCaseError> {
        access::require_edit(self.access, &Actor::User(user_id), Target::Content(id)).await?;
        if self.contents.delete(id).await? {
            Ok(())
        } else {
            Err(CourseUseCaseError::NotFound)
        }
    }
}
