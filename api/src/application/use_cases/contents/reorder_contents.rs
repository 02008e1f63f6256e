use uuid::Uuid;

use crate::application::ports::content_repository::ContentRepository;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::validate_order;

/// Items of modules the principal does not own are skipped.
pub struct ReorderContents<'a, T: ContentRepository + ?Sized> {
    pub contents: &'a T,
}

impl<'a, T: ContentRepository + ?Sized> ReorderContents<'a, T> {
    /// Nothing is written when any order is out of range.
    pub async fn execute(
        &self,
        user_id: Uuid,
        orders: &[(i64, i32)],
    ) -> Result<u64, CourseUseCaseError> {
        for (_, order) in orders {
            validate_order("order", Some(*order))?;
        }
        let updated = self.contents.reorder_owned(user_id, orders).await?;
        tracing::debug!(requested = orders.len(), updated, "contents_reordered");
        Ok(updated)
    }
}
