//! 内存存储
//!
//! `RwLock` 保护的预订表 + 时段索引。重启即清空。

use chrono::NaiveDate;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use shared::models::{Reservation, ReservationId, SlotKey, TableId};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::{Decide, ReservationDraft, ReservationStore, SlotLocks, StoreError, StoreResult};
use crate::allocation::{AllocationError, Occupancy};

#[derive(Debug, Default)]
struct Inner {
    next_id: ReservationId,
    reservations: BTreeMap<ReservationId, Reservation>,
    /// slot → (reservation id → (table id, party size))
    by_slot: HashMap<SlotKey, BTreeMap<ReservationId, (TableId, u32)>>,
}

/// In-process reservation store
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    locks: SlotLocks,
}

impl MemoryStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            locks: SlotLocks::new(timeout),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .try_read_for(self.locks.timeout())
            .ok_or_else(|| StoreError::Unavailable("memory store read lock timed out".into()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .try_write_for(self.locks.timeout())
            .ok_or_else(|| StoreError::Unavailable("memory store write lock timed out".into()))
    }
}

impl ReservationStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn occupied_tables(&self, slot: &SlotKey) -> StoreResult<Occupancy> {
        let inner = self.read()?;
        Ok(inner
            .by_slot
            .get(slot)
            .map(|entries| entries.values().map(|(table_id, _)| *table_id).collect())
            .unwrap_or_default())
    }

    fn seat_usage(&self, slot: &SlotKey) -> StoreResult<BTreeMap<TableId, u32>> {
        let inner = self.read()?;
        let mut usage = BTreeMap::new();
        if let Some(entries) = inner.by_slot.get(slot) {
            for (table_id, party_size) in entries.values() {
                *usage.entry(*table_id).or_insert(0) += party_size;
            }
        }
        Ok(usage)
    }

    fn create(
        &self,
        draft: ReservationDraft,
        decide: Decide<'_>,
    ) -> StoreResult<Result<Reservation, AllocationError>> {
        let slot = draft.slot.clone();
        self.locks.with_slot(&slot, || {
            let occupied = self.occupied_tables(&slot)?;
            let table_id = match decide(&occupied) {
                Ok(table_id) => table_id,
                Err(e) => return Ok(Err(e)),
            };

            // 决策之后只有这一步写入，失败时没有中间状态
            let mut inner = self.write()?;
            inner.next_id += 1;
            let reservation = draft.into_reservation(inner.next_id, table_id);
            inner
                .by_slot
                .entry(slot.clone())
                .or_default()
                .insert(reservation.id, (table_id, reservation.party_size));
            inner
                .reservations
                .insert(reservation.id, reservation.clone());
            Ok(Ok(reservation))
        })
    }

    fn get(&self, id: ReservationId) -> StoreResult<Option<Reservation>> {
        Ok(self.read()?.reservations.get(&id).cloned())
    }

    fn cancel(&self, id: ReservationId) -> StoreResult<Reservation> {
        let slot = self.get(id)?.ok_or(StoreError::NotFound(id))?.slot;
        self.locks.with_slot(&slot, || {
            let mut inner = self.write()?;
            let reservation = inner
                .reservations
                .remove(&id)
                .ok_or(StoreError::NotFound(id))?;
            if let Some(entries) = inner.by_slot.get_mut(&slot) {
                entries.remove(&id);
                if entries.is_empty() {
                    inner.by_slot.remove(&slot);
                }
            }
            Ok(reservation)
        })
    }

    fn list(&self, date: Option<NaiveDate>) -> StoreResult<Vec<Reservation>> {
        let inner = self.read()?;
        Ok(inner
            .reservations
            .values()
            .filter(|r| date.is_none_or(|d| r.slot.date == d))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    fn store() -> MemoryStore {
        MemoryStore::new(Duration::from_secs(1))
    }

    #[test]
    fn test_create_and_occupancy() {
        contract::create_and_occupancy(&store());
    }

    #[test]
    fn test_rejected_decision_writes_nothing() {
        contract::rejected_decision_writes_nothing(&store());
    }

    #[test]
    fn test_cancel_twice() {
        contract::cancel_twice(&store());
    }

    #[test]
    fn test_seat_usage_sums_party_sizes() {
        contract::seat_usage_sums_party_sizes(&store());
    }

    #[test]
    fn test_list_filters_by_date() {
        contract::list_filters_by_date(&store());
    }

    #[test]
    fn test_ids_are_monotonic() {
        contract::ids_are_monotonic(&store());
    }

    #[test]
    fn test_cancel_clears_slot_index() {
        let store = store();
        let r = contract::book(&store, &contract::slot("D1"), 2, 5);
        store.cancel(r.id).unwrap();
        assert!(store.read().unwrap().by_slot.is_empty());
        assert!(store.locks.is_empty());
    }
}
