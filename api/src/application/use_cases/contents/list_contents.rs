use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::dto::courses::ModuleWithItemsDto;
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::content_repository::ContentRepository;
use crate::application::ports::module_repository::ModuleRepository;
use crate::application::use_cases::CourseUseCaseError;

/// A module with its raw items, for the course editor.
pub struct ListModuleContents<'a, M, T, A>
where
    M: ModuleRepository + ?Sized,
    T: ContentRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub modules: &'a M,
    pub contents: &'a T,
    pub access: &'a A,
}

impl<'a, M, T, A> ListModuleContents<'a, M, T, A>
where
    M: ModuleRepository + ?Sized,
    T: ContentRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        module_id: i64,
    ) -> Result<ModuleWithItemsDto, CourseUseCaseError> {
        access::require_edit(self.access, &Actor::User(user_id), Target::Module(module_id))
            .await?;
        let module = self
            .modules
            .get_by_id(module_id)
            .await?
            .ok_or(CourseUseCaseError::NotFound)?;
        let contents = self.contents.list_for_modules(&[module_id]).await?;
        Ok(ModuleWithItemsDto { module, contents })
    }
}
