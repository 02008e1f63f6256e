pub mod create_content;
pub mod delete_content;
pub mod list_contents;
pub mod reorder_contents;
pub mod update_content;
