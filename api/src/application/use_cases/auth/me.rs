use uuid::Uuid;

use crate::application::ports::account_repository::{Account, AccountRepository};

pub struct GetMe<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: AccountRepository + ?Sized> GetMe<'a, R> {
    /// `None` when the token outlived its account.
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<Account>> {
        self.repo.get(id).await
    }
}
