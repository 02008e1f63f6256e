use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::module_repository::ModuleRepository;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::module::Module;

pub struct ListCourseModules<'a, M, A>
where
    M: ModuleRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub modules: &'a M,
    pub access: &'a A,
}

impl<'a, M, A> ListCourseModules<'a, M, A>
where
    M: ModuleRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        course_id: i64,
    ) -> Result<Vec<Module>, CourseUseCaseError> {
        access::require_edit(self.access, &Actor::User(user_id), Target::Course(course_id))
            .await?;
        Ok(self.modules.list_for_courses(&[course_id]).await?)
    }
}
