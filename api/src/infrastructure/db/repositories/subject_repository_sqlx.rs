use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::subject_repository::SubjectRepository;
use crate::domain::courses::subject::Subject;
use crate::infrastructure::db::PgPool;

pub struct SqlxSubjectRepository {
    pub pool: PgPool,
}

impl SqlxSubjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRepository for SqlxSubjectRepository {
    async fn list(&self) -> anyhow::Result<Vec<Subject>> {
        let rows = sqlx::query(r#"SELECT id, title, slug FROM subjects ORDER BY title ASC, id ASC"#)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| Subject {
                id: r.get("id"),
                title: r.get("title"),
                slug: r.get("slug"),
            })
            .collect())
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Subject>> {
        let row = sqlx::query(r#"SELECT id, title, slug FROM subjects WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| Subject {
            id: r.get("id"),
            title: r.get("title"),
            slug: r.get("slug"),
        }))
    }
}
