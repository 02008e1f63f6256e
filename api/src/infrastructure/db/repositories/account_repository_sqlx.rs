use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::account_repository::{Account, AccountRepository, EmailTaken};
use crate::infrastructure::db::{PgPool, is_unique_violation};

pub struct SqlxAccountRepository {
    pub pool: PgPool,
}

impl SqlxAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(r: &PgRow) -> Account {
    Account {
        id: r.get("id"),
        email: r.get("email"),
        name: r.get("name"),
        joined_at: r.get("created_at"),
    }
}

#[async_trait]
impl AccountRepository for SqlxAccountRepository {
    async fn register(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<Account> {
        let row = sqlx::query(
            r#"INSERT INTO users (email, name, password_hash) VALUES ($1, $2, $3)
               RETURNING id, email, name, created_at"#,
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| -> anyhow::Error {
            if is_unique_violation(&e) {
                EmailTaken(email.to_owned()).into()
            } else {
                e.into()
            }
        })?;
        Ok(account_from_row(&row))
    }

    async fn credentials(&self, email: &str) -> anyhow::Result<Option<(Account, String)>> {
        let row = sqlx::query(
            r#"SELECT id, email, name, created_at, password_hash FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| (account_from_row(&r), r.get("password_hash"))))
    }

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Account>> {
        let row = sqlx::query(r#"SELECT id, email, name, created_at FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(account_from_row))
    }
}
