use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::module_repository::ModuleRepository;
use crate::application::use_cases::CourseUseCaseError;

pub struct DeleteModule<'a, M, A>
where
    M: ModuleRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub modules: &'a M,
    pub access: &'a A,
}

impl<'a, M, A> DeleteModule<'a, M, A>
where
    M: ModuleRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid, id: i64) -> Result<(), CourseUseCaseError> {
        access::require_edit(self.access, &Actor::User(user_id), Target::Module(id)).await?;
        if self.modules.delete(id).await? {
            Ok(())
        } else {
            Err(CourseUseCaseError::NotFound)
        }
    }
}
