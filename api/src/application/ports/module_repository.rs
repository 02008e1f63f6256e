use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::courses::module::{Module, ModuleChanges, NewModule};

#[async_trait]
pub trait ModuleRepository: Send + Sync {
    /// Ascending by order, then id.
    async fn list_for_courses(&self, course_ids: &[i64]) -> anyhow::Result<Vec<Module>>;
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Module>>;
    /// Persists a module whose order has already been resolved.
    async fn insert(&self, module: &NewModule) -> anyhow::Result<Module>;
    async fn update(&self, id: i64, changes: &ModuleChanges) -> anyhow::Result<Option<Module>>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    /// Applies explicit orders to modules of courses owned by `owner_id`;
    /// other ids are skipped. Returns the number of rows updated.
    async fn reorder_owned(&self, owner_id: Uuid, orders: &[(i64, i32)]) -> anyhow::Result<u64>;
}
