use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::account_repository::{Account, AccountRepository};
use crate::application::use_cases::auth::register::normalize_email;

pub struct Login<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: AccountRepository + ?Sized> Login<'a, R> {
    /// `None` for an unknown email or a wrong password.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<Account>> {
        let Some((account, hash)) = self.repo.credentials(&normalize_email(&req.email)).await?
        else {
            return Ok(None);
        };
        let parsed = PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            tracing::debug!(account_id = %account.id, "login_password_mismatch");
            return Ok(None);
        }
        Ok(Some(account))
    }
}
