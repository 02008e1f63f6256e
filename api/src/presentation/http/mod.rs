pub mod auth;
pub mod courses;
pub(crate) mod error;
pub mod health;
pub mod manage;
pub mod subjects;
