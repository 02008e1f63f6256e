use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::ordering::OrderAssigner;
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::module_repository::ModuleRepository;
use crate::application::ports::order_source::OrderSource;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::module::{Module, NewModule};

pub struct CreateModule<'a, M, O, A>
where
    M: ModuleRepository + ?Sized,
    O: OrderSource + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub modules: &'a M,
    pub orders: &'a O,
    pub access: &'a A,
}

impl<'a, M, O, A> CreateModule<'a, M, O, A>
where
    M: ModuleRepository + ?Sized,
    O: OrderSource + ?Sized,
    A: AccessRepository + ?Sized,
{
    /// Without an explicit order the module goes after the last module of
    /// its course.
    pub async fn execute(
        &self,
        user_id: Uuid,
        mut module: NewModule,
    ) -> Result<Module, CourseUseCaseError> {
        access::require_edit(
            self.access,
            &Actor::User(user_id),
            Target::Course(module.course_id),
        )
        .await?;
        module.validate()?;
        OrderAssigner {
            source: self.orders,
        }
        .assign(&mut module)
        .await?;
        let created = self.modules.insert(&module).await?;
        tracing::debug!(
            module_id = created.id,
            course_id = created.course_id,
            order = created.order,
            "module_created"
        );
        Ok(created)
    }
}
