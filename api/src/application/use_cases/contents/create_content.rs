use uuid::Uuid;

use crate::application::access::{self, Actor, Target};
use crate::application::ordering::OrderAssigner;
use crate::application::ports::access_repository::AccessRepository;
use crate::application::ports::content_repository::ContentRepository;
use crate::application::ports::order_source::OrderSource;
use crate::application::use_cases::CourseUseCaseError;
use crate::domain::courses::content::{Content, ItemPayload, NewContent};

pub struct CreateContentInput {
    pub module_id: i64,
    pub title: String,
    pub payload: ItemPayload,
    pub order: Option<i32>,
}

pub struct CreateContent<'a, T, O, A>
where
    T: ContentRepository + ?Sized,
    O: OrderSource + ?Sized,
    A: AccessRepository + ?Sized,
{
    pub contents: &'a T,
    pub orders: &'a O,
    pub access: &'a A,
}

impl<'a, T, O, A> CreateContent<'a, T, O, A>
where
    T: ContentRepository + ?Sized,
    O: OrderSource + ?Sized,
    A: AccessRepository + ?Sized,
{
    /// The item is owned by the instructor creating it.
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateContentInput,
    ) -> Result<Content, CourseUseCaseError> {
        access::require_edit(
            self.access,
            &Actor::User(user_id),
            Target::Module(input.module_id),
        )
        .await?;
        let mut content = NewContent {
            module_id: input.module_id,
            owner_id: user_id,
            title: input.title,
            payload: input.payload,
            order: input.order,
        };
        content.validate()?;
        OrderAssigner {
            source: self.orders,
        }
        .assign(&mut content)
        .await?;
        let created = self.contents.insert(&content).await?;
        tracing::debug!(
            content_id = created.id,
            module_id = created.module_id,
            kind = created.item.kind().as_str(),
            order = created.order,
            "content_created"
        );
        Ok(created)
    }
}
