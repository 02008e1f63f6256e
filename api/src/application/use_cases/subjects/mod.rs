pub mod get_subject;
pub mod list_subjects;
