use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::access_repository::{AccessRepository, CourseMembership};
use crate::infrastructure::db::PgPool;

pub struct SqlxAccessRepository {
    pub pool: PgPool,
}

impl SqlxAccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessRepository for SqlxAccessRepository {
    async fn course_membership(
        &self,
        course_id: i64,
        user_id: Uuid,
    ) -> anyhow::Result<Option<CourseMembership>> {
        let row = sqlx::query(
            r#"SELECT c.owner_id,
                      EXISTS(SELECT 1 FROM course_students cs
                             WHERE cs.course_id = c.id AND cs.student_id = $2) AS enrolled
               FROM courses c WHERE c.id = $1"#,
        )
        .bind(course_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| CourseMembership {
            owner_id: r.get("owner_id"),
            enrolled: r.get("enrolled"),
        }))
    }

    async fn course_of_module(&self, module_id: i64) -> anyhow::Result<Option<i64>> {
        let course_id =
            sqlx::query_scalar::<_, i64>("SELECT course_id FROM modules WHERE id = $1")
                .bind(module_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(course_id)
    }

    async fn course_of_content(&self, content_id: i64) -> anyhow::Result<Option<i64>> {
        let course_id = sqlx::query_scalar::<_, i64>(
            r#"SELECT m.course_id FROM contents ct
               JOIN modules m ON m.id = ct.module_id
               WHERE ct.id = $1"#,
        )
        .bind(content_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course_id)
    }
}
