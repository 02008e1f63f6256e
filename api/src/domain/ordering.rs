//! Primitives for ordering records relative to their sibling group.
//!
//! An [`OrderedEntity`] declares, per type, the table it lives in and the
//! list of scope columns that identify its siblings. Reading those columns
//! off a draft yields a [`ScopeKey`]; two records are siblings iff their keys
//! are equal.

#[derive(thiserror::Error, Debug)]
pub enum OrderingError {
    #[error("scope field `{field}` of `{entity}` is not resolvable at assignment time")]
    Configuration {
        entity: &'static str,
        field: &'static str,
    },
    #[error("no order left after {max} in `{entity}`")]
    Exhausted { entity: &'static str, max: i32 },
    #[error("failed to query sibling orders")]
    Store(#[source] anyhow::Error),
}

/// Largest order a caller may set explicitly. Automatic assignment may go
/// past it, up to `i32::MAX`.
pub const ORDER_MAX: i32 = 1_000_000;

/// One scope column and the accessor reading its value off an entity.
pub struct ScopeField<E: 'static> {
    pub column: &'static str,
    pub read: fn(&E) -> Option<i64>,
}

/// Static ordering configuration of an entity type.
pub struct OrderScope<E: 'static> {
    pub table: &'static str,
    pub fields: &'static [ScopeField<E>],
}

pub trait OrderedEntity: Sized + Send + 'static {
    const SCOPE: OrderScope<Self>;

    fn order(&self) -> Option<i32>;
    fn set_order(&mut self, order: i32);
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey {
    table: &'static str,
    pairs: Vec<(&'static str, i64)>,
}

impl ScopeKey {
    /// Reads every declared scope field of `entity`. An unset field is a
    /// configuration error: the entity cannot be placed in a sibling group.
    pub fn resolve<E: OrderedEntity>(entity: &E) -> Result<Self, OrderingError> {
        let scope = &E::SCOPE;
        let mut pairs = Vec::with_capacity(scope.fields.len());
        for field in scope.fields {
            let value = (field.read)(entity).ok_or(OrderingError::Configuration {
                entity: scope.table,
                field: field.column,
            })?;
            pairs.push((field.column, value));
        }
        Ok(Self {
            table: scope.table,
            pairs,
        })
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Empty when the whole table is a single sibling group.
    pub fn pairs(&self) -> &[(&'static str, i64)] {
        &self.pairs
    }
}

/// Next order after the current maximum of a scope; `0` for an empty scope.
/// `None` once the maximum is `i32::MAX`.
pub fn next_order(current_max: Option<i32>) -> Option<i32> {
    match current_max {
        None => Some(0),
        Some(max) => max.checked_add(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lesson {
        chapter_id: Option<i64>,
        order: Option<i32>,
    }

    fn lesson_chapter(l: &Lesson) -> Option<i64> {
        l.chapter_id
    }

    impl OrderedEntity for Lesson {
        const SCOPE: OrderScope<Self> = OrderScope {
            table: "lessons",
            fields: &[ScopeField {
                column: "chapter_id",
                read: lesson_chapter,
            }],
        };

        fn order(&self) -> Option<i32> {
            self.order
        }

        fn set_order(&mut self, order: i32) {
            self.order = Some(order);
        }
    }

    struct Banner {
        order: Option<i32>,
    }

    impl OrderedEntity for Banner {
        const SCOPE: OrderScope<Self> = OrderScope {
            table: "banners",
            fields: &[],
        };

        fn order(&self) -> Option<i32> {
            self.order
        }

        fn set_order(&mut self, order: i32) {
            self.order = Some(order);
        }
    }

    #[test]
    fn next_order_starts_at_zero() {
        assert_eq!(next_order(None), Some(0));
        assert_eq!(next_order(Some(0)), Some(1));
        assert_eq!(next_order(Some(41)), Some(42));
    }

    #[test]
    fn next_order_stops_at_the_integer_limit() {
        assert_eq!(next_order(Some(i32::MAX - 1)), Some(i32::MAX));
        assert_eq!(next_order(Some(i32::MAX)), None);
    }

    #[test]
    fn resolves_declared_scope_fields() {
        let lesson = Lesson {
            chapter_id: Some(7),
            order: None,
        };
        let key = ScopeKey::resolve(&lesson).unwrap();
        assert_eq!(key.table(), "lessons");
        assert_eq!(key.pairs(), &[("chapter_id", 7)]);
    }

    #[test]
    fn keys_of_different_parents_differ() {
        let a = ScopeKey::resolve(&Lesson {
            chapter_id: Some(1),
            order: None,
        })
        .unwrap();
        let b = ScopeKey::resolve(&Lesson {
            chapter_id: Some(2),
            order: None,
        })
        .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unset_scope_field_is_rejected() {
        let lesson = Lesson {
            chapter_id: None,
            order: None,
        };
        match ScopeKey::resolve(&lesson) {
            Err(OrderingError::Configuration { entity, field }) => {
                assert_eq!(entity, "lessons");
                assert_eq!(field, "chapter_id");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn no_scope_fields_means_whole_table() {
        let key = ScopeKey::resolve(&Banner { order: None }).unwrap();
        assert_eq!(key.table(), "banners");
        assert!(key.pairs().is_empty());
    }
}
