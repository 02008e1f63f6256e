use std::collections::HashMap;

use crate::application::access::{self, Actor, Target};
use crate::application::dto::courses::{CourseContentsDto, ModuleContentsDto, RenderedContentDto};
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::content_repository::ContentRepository;
use crate::application::ports::course_repository::CourseRepository;
use crate::application::ports::module_repository::ModuleRepository;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::content::{Content, RenderContext, Renderable};

/// Full course with rendered content, for its owner and enrolled students.
pub struct GetCourseContents<'a, C, M, T, A>
where
    C: CourseRepository + ?Sized,
    M: ModuleRepository + ?Sized,
    T: ContentRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub courses: &'a C,
    pub modules: &'a M,
    pub contents: &'a T,
    pub access: &'a A,
    pub render: &'a RenderContext,
}

impl<'a, C, M, T, A> GetCourseContents<'a, C, M, T, A>
where
    C: CourseRepository + ?Sized,
    M: ModuleRepository + ?Sized,
    T: ContentRepository + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        course_id: i64,
    ) -> Result<CourseContentsDto, CourseUseCaseError> {
        access::require_view(self.access, actor, Target::Course(course_id)).await?;
        let course = self
            .courses
            .get_by_id(course_id)
            .await?
            .ok_or(CourseUseCaseError::NotFound)?;
        let modules = self.modules.list_for_courses(&[course_id]).await?;
        let module_ids: Vec<i64> = modules.iter().map(|m| m.id).collect();
        let contents = self.contents.list_for_modules(&module_ids).await?;

        let mut by_module: HashMap<i64, Vec<Content>> = HashMap::new();
        for content in contents {
            by_module.entry(content.module_id).or_default().push(content);
        }
        let modules = modules
            .into_iter()
            .map(|module| {
                let contents = by_module
                    .remove(&module.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| RenderedContentDto {
                        id: c.id,
                        order: c.order,
                        kind: c.item.kind(),
                        title: c.item.base().title.clone(),
                        html: c.item.render(self.render),
                    })
                    .collect();
                ModuleContentsDto { module, contents }
            })
            .collect();
        Ok(CourseContentsDto { course, modules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MemoryStore;
    use uuid::Uuid;

    struct Fixture {
        store: MemoryStore,
        owner: Uuid,
        student: Uuid,
        course: i64,
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let student = Uuid::new_v4();
        let course = store.seed_course(owner, "rust");
        store.seed_enrollment(course, student);
        let m1 = store.seed_module(course, 1);
        let m0 = store.seed_module(course, 0);
        store.seed_content(m0, owner, 1);
        store.seed_content(m0, owner, 0);
        store.seed_content(m1, owner, 0);
        Fixture {
            store,
            owner,
            student,
            course,
        }
    }

    async fn run(f: &Fixture, actor: Actor) -> Result<CourseContentsDto, CourseUseCaseError> {
        let render = RenderContext {
            media_url: "/media/".into(),
        };
        GetCourseContents {
            courses: &f.store,
            modules: &f.store,
            contents: &f.store,
            access: &f.store,
            render: &render,
        }
        .execute(&actor, f.course)
        .await
    }

    #[tokio::test]
    async fn enrolled_student_sees_ordered_rendered_contents() {
        let f = fixture();
        let dto = run(&f, Actor::User(f.student)).await.unwrap();
        let orders: Vec<i32> = dto.modules.iter().map(|m| m.module.order).collect();
        assert_eq!(orders, [0, 1]);
        let first: Vec<i32> = dto.modules[0].contents.iter().map(|c| c.order).collect();
        assert_eq!(first, [0, 1]);
        assert_eq!(dto.modules[0].contents[0].html, "<p>Lorem ipsum</p>");
    }

    #[tokio::test]
    async fn owner_may_read_without_enrolling() {
        let f = fixture();
        assert!(run(&f, Actor::User(f.owner)).await.is_ok());
    }

    #[tokio::test]
    async fn strangers_are_forbidden() {
        let f = fixture();
        assert!(matches!(
            run(&f, Actor::User(Uuid::new_v4())).await,
            Err(CourseUseCaseError::Forbidden)
        ));
        assert!(matches!(
            run(&f, Actor::Anonymous).await,
            Err(CourseUseCaseError::Forbidden)
        ));
    }
}
