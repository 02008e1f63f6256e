use async_trait::async_trait;

use crate::domain::ordering::ScopeKey;

/// Max-aggregate over the persisted siblings of a scope.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// `None` when the scope has no persisted rows yet.
    async fn max_order(&self, scope: &ScopeKey) -> anyhow::Result<Option<i32>>;
}
