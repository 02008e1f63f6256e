pub mod courses;
pub mod ordering;
