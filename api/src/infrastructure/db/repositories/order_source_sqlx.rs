use async_trait::async_trait;

use crate::application::ports::order_source::OrderSource;
use crate::domain::ordering::ScopeKey;
use crate::infrastructure::db::PgPool;

pub struct SqlxOrderSource {
    pub pool: PgPool,
}

impl SqlxOrderSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Table and column names come from the static `OrderedEntity::SCOPE`
// declarations, never from request input; only values are bound.
fn max_order_sql(scope: &ScopeKey) -> String {
    let mut sql = format!(r#"SELECT MAX("order") FROM {}"#, scope.table());
    for (i, (column, _)) in scope.pairs().iter().enumerate() {
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        sql.push_str(&format!(r#""{}" = ${}"#, column, i + 1));
    }
    sql
}

#[async_trait]
impl OrderSource for SqlxOrderSource {
    async fn max_order(&self, scope: &ScopeKey) -> anyhow::Result<Option<i32>> {
        let sql = max_order_sql(scope);
        let mut query = sqlx::query_scalar::<_, Option<i32>>(&sql);
        for (_, value) in scope.pairs() {
            query = query.bind(*value);
        }
        let max = query.fetch_one(&self.pool).await?;
        Ok(max)
    }
}
