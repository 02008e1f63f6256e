use async_trait::async_trait;
use uuid::Uuid;

/// Anyone who can sign in. Owning a course makes an account its instructor,
/// enrolling makes it a student.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}

/// Raised by `register` when the email belongs to another account.
#[derive(thiserror::Error, Debug)]
#[error("email `{0}` is already registered")]
pub struct EmailTaken(pub String);

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn register(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<Account>;

    /// The account behind `email` with its stored argon2 hash. Only login
    /// reads the hash.
    async fn credentials(&self, email: &str) -> anyhow::Result<Option<(Account, String)>>;

    async fn get(&self, id: Uuid) -> anyhow::Result<Option<Account>>;
}
