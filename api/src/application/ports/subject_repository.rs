use async_trait::async_trait;

use crate::domain::courses::subject::Subject;

#[async_trait]
pub trait SubjectRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Subject>>;
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Subject>>;
}
