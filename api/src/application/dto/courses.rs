use std::collections::HashMap;

use crate::domain::courses::content::{Content, ContentKind};
use crate::domain::courses::course::Course;
use crate::domain::courses::module::Module;

#[derive(Debug, Clone)]
pub struct CourseOverviewDto {
    pub course: Course,
    /// Ascending by order.
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone)]
pub struct RenderedContentDto {
    pub id: i64,
    pub order: i32,
    pub kind: ContentKind,
    pub title: String,
    pub html: String,
}

#[derive(Debug, Clone)]
pub struct ModuleContentsDto {
    pub module: Module,
    pub contents: Vec<RenderedContentDto>,
}

#[derive(Debug, Clone)]
pub struct CourseContentsDto {
    pub course: Course,
    pub modules: Vec<ModuleContentsDto>,
}

#[derive(Debug, Clone)]
pub struct ModuleWithItemsDto {
    pub module: Module,
    pub contents: Vec<Content>,
}

/// Groups already sorted modules under their courses, keeping course order.
pub fn attach_modules(courses: Vec<Course>, modules: Vec<Module>) -> Vec<CourseOverviewDto> {
    let mut by_course: HashMap<i64, Vec<Module>> = HashMap::new();
    for module in modules {
        by_course.entry(module.course_id).or_default().push(module);
    }
    courses
        .into_iter()
        .map(|course| CourseOverviewDto {
            modules: by_course.remove(&course.id).unwrap_or_default(),
            course,
        })
        .collect()
}
