use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::account_repository::{Account, AccountRepository, EmailTaken};

pub const MIN_PASSWORD_LEN: usize = 8;

pub struct Register<'a, R: AccountRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("invalid registration: {0}")]
    Invalid(&'static str),
    #[error("email already registered")]
    Conflict,
    #[error("failed to hash password")]
    Hash(#[source] anyhow::Error),
    #[error("failed to store account")]
    Store(#[source] anyhow::Error),
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl<'a, R: AccountRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<Account, RegisterError> {
        let email = normalize_email(&req.email);
        if !email.contains('@') {
            return Err(RegisterError::Invalid("email"));
        }
        if req.name.trim().is_empty() {
            return Err(RegisterError::Invalid("name"));
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegisterError::Invalid("password"));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| RegisterError::Hash(anyhow::anyhow!(e.to_string())))?
            .to_string();
        self.repo
            .register(&email, req.name.trim(), &hash)
            .await
            .map_err(|e| {
                if e.is::<EmailTaken>() {
                    RegisterError::Conflict
                } else {
                    RegisterError::Store(e)
                }
            })
    }
}
