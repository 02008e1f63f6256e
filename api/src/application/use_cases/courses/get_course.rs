use crate::application::dto::courses::{CourseOverviewDto, attach_modules};
use crate::application::ports::course_repository::CourseRepository;
use crate::application::ports::module_repository::ModuleRepository;

pub struct GetCourse<'a, C, M>
where
    C: CourseRepository + ?Sized,
    M: ModuleRepository + ?Sized,
{
    pub courses: &'a C,
    pub modules: &'a M,
}

impl<'a, C, M> GetCourse<'a, C, M>
where
    C: CourseRepository + ?Sized,
    M: ModuleRepository + ?Sized,
{
    pub async fn execute(&self, id: i64) -> anyhow::Result<Option<CourseOverviewDto>> {
        let Some(course) = self.courses.get_by_id(id).await? else {
            return Ok(None);
        };
        let modules = self.modules.list_for_courses(&[id]).await?;
        Ok(attach_modules(vec![course], modules).pop())
    }
}
