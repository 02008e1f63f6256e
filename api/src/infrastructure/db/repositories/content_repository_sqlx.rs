use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::content_repository::ContentRepository;
use crate::domain::courses::content::{
    Content, ContentChanges, ContentItem, ContentKind, ItemBase, ItemPayload, NewContent,
};
use crate::infrastructure::db::PgPool;

pub struct SqlxContentRepository {
    pub pool: PgPool,
}

impl SqlxContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Splits a payload into the `(body, url, file)` columns.
fn payload_columns(payload: &ItemPayload) -> (Option<&str>, Option<&str>, Option<&str>) {
    match payload {
        ItemPayload::Text { content } => (Some(content.as_str()), None, None),
        ItemPayload::Video { url } => (None, Some(url.as_str()), None),
        ItemPayload::Image { file } | ItemPayload::File { file } => {
            (None, None, Some(file.as_str()))
        }
    }
}

fn content_from_row(r: &PgRow) -> anyhow::Result<Content> {
    let kind: String = r.get("kind");
    let kind = ContentKind::parse(&kind)
        .ok_or_else(|| anyhow::anyhow!("unknown content kind `{kind}`"))?;
    let column = |name: &str| -> anyhow::Result<String> {
        r.try_get::<Option<String>, _>(name)?
            .ok_or_else(|| anyhow::anyhow!("{} item without {name}", kind.as_str()))
    };
    let payload = match kind {
        ContentKind::Text => ItemPayload::Text {
            content: column("body")?,
        },
        ContentKind::Video => ItemPayload::Video { url: column("url")? },
        ContentKind::Image => ItemPayload::Image {
            file: column("file")?,
        },
        ContentKind::File => ItemPayload::File {
            file: column("file")?,
        },
    };
    let base = ItemBase {
        owner_id: r.get("owner_id"),
        title: r.get("title"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    };
    Ok(Content {
        id: r.get("id"),
        module_id: r.get("module_id"),
        order: r.get("order"),
        item: ContentItem::from_parts(base, payload),
    })
}

#[async_trait]
impl ContentRepository for SqlxContentRepository {
    async fn list_for_modules(&self, module_ids: &[i64]) -> anyhow::Result<Vec<Content>> {
        if module_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            r#"SELECT id, module_id, owner_id, kind, title, body, url, file, "order",
                      created_at, updated_at
               FROM contents
               WHERE module_id = ANY($1)
               ORDER BY "order" ASC, id ASC"#,
        )
        .bind(module_ids)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(content_from_row).collect()
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<Content>> {
        let row = sqlx::query(
            r#"SELECT id, module_id, owner_id, kind, title, body, url, file, "order",
                      created_at, updated_at
               FROM contents WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(content_from_row).transpose()
    }

    async fn insert(&self, content: &NewContent) -> anyhow::Result<Content> {
        let order = content
            .order
            .ok_or_else(|| anyhow::anyhow!("content order must be assigned before insert"))?;
        let (body, url, file) = payload_columns(&content.payload);
        let row = sqlx::query(
            r#"INSERT INTO contents (module_id, owner_id, kind, title, body, url, file, "order")
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING id, module_id, owner_id, kind, title, body, url, file, "order",
                         created_at, updated_at"#,
        )
        .bind(content.module_id)
        .bind(content.owner_id)
        .bind(content.payload.kind().as_str())
        .bind(&content.title)
        .bind(body)
        .bind(url)
        .bind(file)
        .bind(order)
        .fetch_one(&self.pool)
        .await?;
        content_from_row(&row)
    }

    // Payload kind is checked by the caller, so only its own column changes.
    async fn update(&self, id: i64, changes: &ContentChanges) -> anyhow::Result<Option<Content>> {
        let (body, url, file) = changes
            .payload
            .as_ref()
            .map(payload_columns)
            .unwrap_or((None, None, None));
        let row = sqlx::query(
            r#"UPDATE contents SET
                    title = COALESCE($1, title),
                    body = COALESCE($2, body),
                    url = COALESCE($3, url),
                    file = COALESCE($4, file),
                    "order" = COALESCE($5, "order"),
                    updated_at = now()
                WHERE id = $6
                RETURNING id, module_id, owner_id, kind, title, body, url, file, "order",
                          created_at, updated_at"#,
        )
        .bind(changes.title.as_deref())
        .bind(body)
        .bind(url)
        .bind(file)
        .bind(changes.order)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(content_from_row).transpose()
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn reorder_owned(&self, owner_id: Uuid, orders: &[(i64, i32)]) -> anyhow::Result<u64> {
        let (ids, values): (Vec<i64>, Vec<i32>) = orders.iter().copied().unzip();
        let res = sqlx::query(
            r#"UPDATE contents ct SET "order" = v.ord
               FROM UNNEST($1::bigint[], $2::int[]) AS v(id, ord), modules m, courses c
               WHERE ct.id = v.id AND m.id = ct.module_id AND c.id = m.course_id
                 AND c.owner_id = $3"#,
        )
        .bind(&ids)
        .bind(&values)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}
