use crate::application::ports::order_source::OrderSource;
use crate::domain::ordering::{OrderedEntity, OrderingError, ScopeKey, next_order};

/// Places new records after their persisted siblings.
///
/// An explicit order on the entity is authoritative and is never touched.
/// Otherwise the entity gets `max(order) + 1` over the siblings sharing its
/// scope key, or `0` for an empty scope. Gaps left by deletions are not
/// reused.
///
/// Two concurrent creations in one scope may read the same maximum and end
/// up with equal orders; listings break such ties by id.
pub struct OrderAssigner<'a, S: OrderSource + ?Sized> {
    pub source: &'a S,
}

impl<'a, S: OrderSource + ?Sized> OrderAssigner<'a, S> {
    /// Returns the effective order of `entity`, explicit or assigned.
    pub async fn assign<E: OrderedEntity>(&self, entity: &mut E) -> Result<i32, OrderingError> {
        if let Some(explicit) = entity.order() {
            return Ok(explicit);
        }
        let scope = ScopeKey::resolve(entity)?;
        let current_max = self
            .source
            .max_order(&scope)
            .await
            .map_err(OrderingError::Store)?;
        let order = next_order(current_max).ok_or(OrderingError::Exhausted {
            entity: scope.table(),
            max: current_max.unwrap_or_default(),
        })?;
        entity.set_order(order);
        tracing::debug!(table = scope.table(), scope = ?scope.pairs(), order, "order_assigned");
        Ok(order)
    }
}
