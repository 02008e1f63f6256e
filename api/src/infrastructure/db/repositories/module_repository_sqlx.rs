use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::module_repository::ModuleRepository;
use crate::domain::courses::module::{Module, ModuleChanges, NewModule};
use crate::infrastructure::db::PgPool;

pub struct SqlxModuleRepository {
    pub pool: PgPool,
}

impl SqlxModuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn module_from_row(r: &PgRow) -> Module {
    Module {
        id: r.get("id"),
        course_id: r.get("course_id"),
        title: r.get("title"),
        description: r.get("description"),
        order: r.get("order"),
    }
}

#[async_trait]
impl ModuleRepository for SqlxModuleRepository {
    async fn list_for_courses(&self, course_ids: &[i64]) -> anyhow::Result<Vec<Module>> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            r#"SELECT id, course_id, title, description, "order" FROM modules
               WHERE course_id = ANY($1)
               ORDER BY "order" ASC, id ASC"#,
        )
        .bind(course_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(module_from_row).collect())
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Module>> {
        let row = sqlx::query(
            r#"SELECT id, course_id, title, description, "order" FROM modules WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(module_from_row))
    }

    async fn insert(&self, module: &NewModule) -> anyhow::Result<Module> {
        let order = module
            .order
            .ok_or_else(|| anyhow::anyhow!("module order must be assigned before insert"))?;
        let row = sqlx::query(
            r#"INSERT INTO modules (course_id, title, description, "order")
               VALUES ($1, $2, $3, $4)
               RETURNING id, course_id, title, description, "order""#,
        )
        .bind(module.course_id)
        .bind(&module.title)
        .bind(&module.description)
        .bind(order)
        .fetch_one(&self.pool)
        .await?;
        Ok(module_from_row(&row))
    }

    async fn update(&self, id: i64, changes: &ModuleChanges) -> anyhow::Result<Option<Module>> {
        let row = sqlx::query(
            r#"UPDATE modules SET
                    title = COALESCE($1, title),
                    description = COALESCE($2, description),
                    "order" = COALESCE($3, "order")
                WHERE id = $4
                RETURNING id, course_id, title, description, "order""#,
        )
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.order)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(module_from_row))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn reorder_owned(&self, owner_id: Uuid, orders: &[(i64, i32)]) -> anyhow::Result<u64> {
        let (ids, values): (Vec<i64>, Vec<i32>) = orders.iter().copied().unzip();
        let res = sqlx::query(
            r#"UPDATE modules m SET "order" = v.ord
               FROM UNNEST($1::bigint[], $2::int[]) AS v(id, ord), courses c
               WHERE m.id = v.id AND c.id = m.course_id AND c.owner_id = $3"#,
        )
        .bind(&ids)
        .bind(&values)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}
