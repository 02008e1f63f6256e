pub mod access_repository;
pub mod account_repository;
pub mod content_repository;
pub mod course_repository;
pub mod module_repository;
pub mod order_source;
pub mod subject_repository;
