use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
pub struct CourseMembership {
    pub owner_id: Uuid,
    pub enrolled: bool,
}

#[async_trait]
pub trait AccessRepository: Send + Sync {
    /// `None` when the course does not exist.
    async fn course_membership(
        &self,
        course_id: i64,
        user_id: Uuid,
    ) -> anyhow::Result<Option<CourseMembership>>;
    async fn course_of_module(&self, module_id: i64) -> anyhow::Result<Option<i64>>;
    async fn course_of_content(&self, content_id: i64) -> anyhow::Result<Option<i64>>;
}
