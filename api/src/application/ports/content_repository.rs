use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::courses::content::{Content, ContentChanges, NewContent};

#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Ascending by order, then id.
    async fn list_for_modules(&self, module_ids: &[i64]) -> anyhow::Result<Vec<Content>>;
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Content>>;
    /// Persists a content whose order has already been resolved.
    async fn insert(&self, content: &NewContent) -> anyhow::Result<Content>;
    async fn update(&self, id: i64, changes: &ContentChanges) -> anyhow::Result<Option<Content>>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    async fn reorder_owned(&self, owner_id: Uuid, orders: &[(i64, i32)]) -> anyhow::Result<u64>;
}
