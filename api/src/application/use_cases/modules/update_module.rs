use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::module_repository::ModuleRepository;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::module::{Module, ModuleChanges};

pub struct UpdateModule<'a, M, A>
where
    M: ModuleRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub modules: &'a M,
    pub access: &'a A,
}

impl<'a, M, A> UpdateModule<'a, M, A>
where
    M: ModuleRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    /// The stored order only changes when `changes.order` is given.
    pub async fn execute(
        &self,
        user_id: Uuid,
        id: i64,
        changes: &ModuleChanges,
    ) -> Result<Module, CourseUseCaseError> {
        access::require_edit(self.access, &Actor::User(user_id), Target::Module(id)).await?;
        changes.validate()?;
        self.modules
            .update(id, changes)
            .await?
            .ok_or(CourseUseCaseError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MemoryStore;
    use crate::domain::courses::ValidationError;

    #[tokio::test]
    async fn unrelated_updates_keep_the_order() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let course = store.seed_course(owner, "one");
        let module = store.seed_module(course, 5);
        store.seed_module(course, 9);
        let uc = UpdateModule {
            modules: &store,
            access: &store,
        };
        let renamed = uc
            .execute(
                owner,
                module,
                &ModuleChanges {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.order, 5);
        assert_eq!(renamed.title, "Renamed");

        let moved = uc
            .execute(
                owner,
                module,
                &ModuleChanges {
                    order: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.order, 1);

        let err = uc
            .execute(
                owner,
                module,
                &ModuleChanges {
                    order: Some(-3),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CourseUseCaseError::Invalid(ValidationError::OrderOutOfRange { .. })
        ));
        assert_eq!(store.module_orders(course)[0], (module, 1));
    }
}
