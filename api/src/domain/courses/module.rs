use crate::domain::ordering::{OrderScope, OrderedEntity, ScopeField};

use super::{TITLE_MAX_LEN, ValidationError, validate_order, validate_title};

#[derive(Debug, Clone)]
pub struct Module {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub order: i32,
}

/// A module that has not been persisted yet. `order` stays `None` until the
/// caller supplies one or the order assigner places it after its siblings.
#[derive(Debug, Clone)]
pub struct NewModule {
    pub course_id: i64,
    pub title: String,
    pub description: String,
    pub order: Option<i32>,
}

fn module_course_id(module: &NewModule) -> Option<i64> {
    Some(module.course_id)
}

impl OrderedEntity for NewModule {
    const SCOPE: OrderScope<Self> = OrderScope {
        table: "modules",
        fields: &[ScopeField {
            column: "course_id",
            read: module_course_id,
        }],
    };

    fn order(&self) -> Option<i32> {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = Some(order);
    }
}

impl NewModule {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title("title", &self.title, TITLE_MAX_LEN)?;
        validate_order("order", self.order)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModuleChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
}

impl ModuleChanges {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title("title", title, TITLE_MAX_LEN)?;
        }
        validate_order("order", self.order)
    }
}
