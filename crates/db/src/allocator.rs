//! Identifier allocation.
//!
//! A thin typed wrapper over the store's per-entity counters.  Each call is
//! one counter advance; ids are never cached or handed back, so a failed
//! insert leaves a gap.

use std::sync::Arc;

use tracing::debug;

use crate::store::{Sequence, Store};
use crate::DbError;

#[derive(Clone)]
pub struct IdAllocator {
    store: Arc<dyn Store>,
}

impl IdAllocator {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Next id for `sequence`, strictly greater than any returned before.
    ///
    /// # Errors
    /// [`DbError::Allocation`] when the counter cannot be reached or its value
    /// does not fit a positive `i32`.
    pub async fn next_id(&self, sequence: Sequence) -> Result<i32, DbError> {
        let value = self
            .store
            .next_val(sequence)
            .await
            .map_err(|e| DbError::Allocation {
                sequence,
                reason: e.to_string(),
            })?;

        let id = i32::try_from(value)
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| DbError::Allocation {
                sequence,
                reason: format!("counter value {value} is outside 1..={}", i32::MAX),
            })?;

        debug!(%sequence, id, "allocated id");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{Fault, MemoryStore};

    #[tokio::test]
    async fn ids_increase_per_sequence() {
        let allocator = IdAllocator::new(Arc::new(MemoryStore::new()));
        assert_eq!(allocator.next_id(Sequence::Address).await.unwrap(), 1);
        assert_eq!(allocator.next_id(Sequence::Address).await.unwrap(), 2);
        assert_eq!(allocator.next_id(Sequence::Person).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unreachable_counter_is_an_allocation_error() {
        let store = Arc::new(MemoryStore::new());
        store.arm(Fault::NextVal(Sequence::Person));
        let allocator = IdAllocator::new(store);

        let err = allocator.next_id(Sequence::Person).await.unwrap_err();
        assert!(matches!(err, DbError::Allocation { sequence: Sequence::Person, .. }));
    }

    #[tokio::test]
    async fn exhausted_counter_is_an_allocation_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_sequence(Sequence::Address, i64::from(i32::MAX));
        let allocator = IdAllocator::new(store);

        let err = allocator.next_id(Sequence::Address).await.unwrap_err();
        assert!(matches!(err, DbError::Allocation { sequence: Sequence::Address, .. }));
    }
}
