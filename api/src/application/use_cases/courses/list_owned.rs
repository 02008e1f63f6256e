use uuid::Uuid;

use crate::application::dto::courses::{CourseOverviewDto, attach_modules};
use crate::application::ports::course_repository::CourseRepository;
use crate::application::ports::module_repository::ModuleRepository;

/// Courses the principal teaches.
pub struct ListOwnedCourses<'a, C, M>
where
    C: CourseRepository + ?Sized,
    M: ModuleRepository + ?Sized,
{
    pub courses: &'a C,
    pub modules: &'a M,
}

impl<'a, C, M> ListOwnedCourses<'a, C, M>
where
    C: CourseRepository + ?Sized,
    M: ModuleRepository + ?Sized,
{
    pub async fn execute(&self, owner_id: Uuid) -> anyhow::Result<Vec<CourseOverviewDto>> {
        let courses = self.courses.list_owned(owner_id).await?;
        let ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
        let modules = self.modules.list_for_courses(&ids).await?;
        Ok(attach_modules(courses, modules))
    }
}
