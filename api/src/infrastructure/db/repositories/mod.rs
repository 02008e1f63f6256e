pub mod access_repository_sqlx;
pub mod account_repository_sqlx;
pub mod content_repository_sqlx;
pub mod course_repository_sqlx;
pub mod module_repository_sqlx;
pub mod order_source_sqlx;
pub mod subject_repository_sqlx;
