use uuid::Uuid;

use crate::application::ports::module_repository::ModuleRepository;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::validate_order;

/// Applies explicit orders, e.g. after a drag and drop in the course editor.
/// Modules of courses the principal does not own are skipped.
pub struct ReorderModules<'a, M: ModuleRepository + ?Sized> {
    pub modules: &'a M,
}

impl<'a, M: ModuleRepository + ?Sized> ReorderModules<'a, M> {
    /// Nothing is written when any order is out of range.
    pub async fn execute(
        &self,
        user_id: Uuid,
        orders: &[(i64, i32)],
    ) -> Result<u64, CourseUseCaseError> {
        for (_, order) in orders {
            validate_order("order", Some(*order))?;
        }
        let updated = self.modules.reorder_owned(user_id, orders).await?;
        tracing::debug!(requested = orders.len(), updated, "modules_reordered");
        Ok(updated)
    }
}
