pub mod create_module;
pub mod delete_module;
pub mod list_modules;
pub mod reorder_modules;
pub mod update_module;
