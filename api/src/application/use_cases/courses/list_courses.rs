use crate::application::dto::courses::{CourseOverviewDto, attach_modules};
use crate::application::ports::course_repository::CourseRepository;
use crate::application::ports::module_repository::ModuleRepository;

pub struct ListCourses<'a, C, M>
where
    C: CourseRepository + ?Sized,
    M: ModuleRepository + ?Sized,
{
    pub courses: &'a C,
    pub modules: &'a M,
}

impl<'a, C, M> ListCourses<'a, C, M>
where
    C: CourseRepository + ?Sized,
    M: ModuleRepository + ?Sized,
{
    pub async fn execute(
        &self,
        subject_slug: Option<String>,
    ) -> anyhow::Result<Vec<CourseOverviewDto>> {
        let subject_slug = subject_slug.filter(|s| !s.trim().is_empty());
        let courses = self.courses.list(subject_slug).await?;
        let ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
        let modules = self.modules.list_for_courses(&ids).await?;
        Ok(attach_modules(courses, modules))
    }
}
