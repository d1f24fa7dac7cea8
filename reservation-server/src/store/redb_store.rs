//! redb 持久化存储
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `reservations` | `id` | `Reservation` (JSON) | 预订记录 |
//! | `slot_index` | `(slot, id)` | `(table_id, party_size)` | 时段占用索引 |
//! | `sequence_counter` | `"reservation_id"` | `u64` | 预订 id 序列 |
//!
//! # 原子性
//!
//! 创建时 `读占用 → 决策 → 写入` 全部在一个 `WriteTransaction` 内完成。
//! 任何出错路径都会在 `commit()` 之前返回，事务被 drop 即回滚。
//!
//! redb 同一时刻只允许一个写事务，`begin_write()` 会无限期等待。
//! 所以写事务先经过 `writer` 闸门，按同一超时获取，超时即 `Unavailable`。

use chrono::NaiveDate;
use parking_lot::{Mutex, MutexGuard};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use shared::models::{Reservation, ReservationId, SlotKey, TableId};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::{Decide, ReservationDraft, ReservationStore, SlotLocks, StoreError, StoreResult};
use crate::allocation::{AllocationError, Occupancy};

/// key = reservation id, value = JSON-serialized Reservation
const RESERVATIONS_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("reservations");

/// key = (slot storage key, reservation id), value = (table id, party size)
const SLOT_INDEX_TABLE: TableDefinition<(&str, u64), (u32, u32)> =
    TableDefinition::new("slot_index");

const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

const RESERVATION_ID_KEY: &str = "reservation_id";

/// Reservation store backed by redb
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
    locks: Arc<SlotLocks>,
    /// 单写者闸门，持有期间才能 begin_write
    writer: Arc<Mutex<()>>,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create the database at the given path
    ///
    /// redb 默认 `Durability::Immediate`，`commit()` 返回即已落盘。
    pub fn open(path: impl AsRef<Path>, timeout: Duration) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db, timeout)
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory(timeout: Duration) -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db, timeout)
    }

    fn init(db: Database, timeout: Duration) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RESERVATIONS_TABLE)?;
            let _ = write_txn.open_table(SLOT_INDEX_TABLE)?;

            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(RESERVATION_ID_KEY)?.is_none() {
                seq_table.insert(RESERVATION_ID_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            locks: Arc::new(SlotLocks::new(timeout)),
            writer: Arc::new(Mutex::new(())),
        })
    }

    /// Begin a write transaction, waiting at most the store timeout for the writer slot
    ///
    /// The returned guard must outlive the transaction.
    fn begin_write(&self) -> StoreResult<(MutexGuard<'_, ()>, WriteTransaction)> {
        let timeout = self.locks.timeout();
        let guard = self.writer.try_lock_for(timeout).ok_or_else(|| {
            tracing::warn!(
                timeout_ms = timeout.as_millis() as u64,
                "redb writer busy, giving up"
            );
            StoreError::Unavailable("timed out waiting for the database writer".into())
        })?;
        let txn = self.db.begin_write()?;
        Ok((guard, txn))
    }

    /// Increment and return the reservation id sequence (within transaction)
    fn next_id(&self, txn: &WriteTransaction) -> StoreResult<ReservationId> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table
            .get(RESERVATION_ID_KEY)?
            .map(|guard| guard.value())
            .unwrap_or(0);
        let next = current + 1;
        table.insert(RESERVATION_ID_KEY, next)?;
        Ok(next)
    }

    /// Occupancy as seen by an open write transaction
    fn occupied_tables_txn(
        &self,
        txn: &WriteTransaction,
        slot: &SlotKey,
    ) -> StoreResult<Occupancy> {
        let table = txn.open_table(SLOT_INDEX_TABLE)?;
        let key = slot.storage_key();

        let mut occupied = Occupancy::new();
        for result in table.range((key.as_str(), 0u64)..=(key.as_str(), u64::MAX))? {
            let (_key, value) = result?;
            occupied.insert(value.value().0);
        }
        Ok(occupied)
    }
}

impl ReservationStore for RedbStore {
    fn backend(&self) -> &'static str {
        "redb"
    }

    fn occupied_tables(&self, slot: &SlotKey) -> StoreResult<Occupancy> {
        Ok(self.seat_usage(slot)?.into_keys().collect())
    }

    fn seat_usage(&self, slot: &SlotKey) -> StoreResult<BTreeMap<TableId, u32>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SLOT_INDEX_TABLE)?;
        let key = slot.storage_key();

        let mut usage = BTreeMap::new();
        for result in table.range((key.as_str(), 0u64)..=(key.as_str(), u64::MAX))? {
            let (_key, value) = result?;
            let (table_id, party_size) = value.value();
            *usage.entry(table_id).or_insert(0) += party_size;
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
            let (_writer, txn) = self.begin_write()?;

            let occupied = self.occupied_tables_txn(&txn, &slot)?;
            let table_id = match decide(&occupied) {
                Ok(table_id) => table_id,
                // txn dropped here: nothing written
                Err(e) => return Ok(Err(e)),
            };

            let id = self.next_id(&txn)?;
            let reservation = draft.into_reservation(id, table_id);
            {
                let mut table = txn.open_table(RESERVATIONS_TABLE)?;
                let value = serde_json::to_vec(&reservation)?;
                table.insert(id, value.as_slice())?;
            }
            {
                let mut index = txn.open_table(SLOT_INDEX_TABLE)?;
                let key = slot.storage_key();
                index.insert((key.as_str(), id), (table_id, reservation.party_size))?;
            }
            txn.commit()?;

            Ok(Ok(reservation))
        })
    }

    fn get(&self, id: ReservationId) -> StoreResult<Option<Reservation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESERVATIONS_TABLE)?;

        match table.get(id)? {
            Some(value) => {
                let reservation: Reservation = serde_json::from_slice(value.value())?;
                Ok(Some(reservation))
            }
            None => Ok(None),
        }
    }

    fn cancel(&self, id: ReservationId) -> StoreResult<Reservation> {
        let slot = self.get(id)?.ok_or(StoreError::NotFound(id))?.slot;
        self.locks.with_slot(&slot, || {
            let (_writer, txn) = self.begin_write()?;
            let reservation = {
                let mut table = txn.open_table(RESERVATIONS_TABLE)?;
                let removed = table.remove(id)?;
                match removed {
                    Some(value) => serde_json::from_slice::<Reservation>(value.value())?,
                    None => return Err(StoreError::NotFound(id)),
                }
            };
            {
                let mut index = txn.open_table(SLOT_INDEX_TABLE)?;
                let key = reservation.slot.storage_key();
                index.remove((key.as_str(), id))?;
            }
            txn.commit()?;
            Ok(reservation)
        })
    }

    fn list(&self, date: Option<NaiveDate>) -> StoreResult<Vec<Reservation>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RESERVATIONS_TABLE)?;

        let mut reservations = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let reservation: Reservation = serde_json::from_slice(value.value())?;
            if date.is_none_or(|d| reservation.slot.date == d) {
                reservations.push(reservation);
            }
        }
        Ok(reservations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    const TIMEOUT: Duration = Duration::from_secs(1);

    impl RedbStore {
        fn current_sequence(&self) -> u64 {
            let read_txn = self.db.begin_read().unwrap();
            let table = read_txn.open_table(SEQUENCE_TABLE).unwrap();
            table
                .get(RESERVATION_ID_KEY)
                .unwrap()
                .map(|guard| guard.value())
                .unwrap_or(0)
        }
    }

    fn store() -> RedbStore {
        RedbStore::open_in_memory(TIMEOUT).unwrap()
    }

    #[test]
    fn test_create_and_occupancy() {
        contract::create_and_occupancy(&store());
    }

    #[test]
    fn test_rejected_decision_writes_nothing() {
        let store = store();
        contract::rejected_decision_writes_nothing(&store);
        // aborted transaction did not consume an id
        assert_eq!(store.current_sequence(), 0);
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
    fn test_reopen_keeps_reservations_and_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reservations.redb");
        let d1 = contract::slot("D1");

        let first = {
            let store = RedbStore::open(&path, TIMEOUT).unwrap();
            contract::book(&store, &d1, 4, 7)
        };

        let store = RedbStore::open(&path, TIMEOUT).unwrap();
        assert_eq!(store.get(first.id).unwrap(), Some(first.clone()));
        assert_eq!(
            store.occupied_tables(&d1).unwrap().into_iter().collect::<Vec<_>>(),
            vec![7]
        );

        let second = contract::book(&store, &d1, 2, 1);
        assert_eq!(second.id, first.id + 1);
    }

    #[test]
    fn test_writer_wait_is_bounded_across_slots() {
        let store = RedbStore::open_in_memory(Duration::from_millis(50)).unwrap();
        let d1 = contract::slot("D1");
        let d2 = contract::slot("D2");
        let d3 = contract::slot("D3");
        let existing = contract::book(&store, &d3, 2, 1);

        let (entered_tx, entered_rx) = std::sync::mpsc::channel::<()>();
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

        std::thread::scope(|scope| {
            // D1 的写事务在决策阶段卡住，期间一直占着写者
            let holder = {
                let (store, d1) = (&store, &d1);
                scope.spawn(move || {
                    store
                        .create(contract::draft(d1, 2), &|_: &Occupancy| {
                            entered_tx.send(()).unwrap();
                            release_rx.recv().unwrap();
                            Ok(2)
                        })
                        .unwrap()
                        .unwrap()
                })
            };
            entered_rx.recv().unwrap();

            let started = std::time::Instant::now();
            let create = store.create(contract::draft(&d2, 2), &|_: &Occupancy| Ok(3));
            assert!(matches!(create, Err(StoreError::Unavailable(_))));
            let cancel = store.cancel(existing.id);
            assert!(matches!(cancel, Err(StoreError::Unavailable(_))));
            assert!(started.elapsed() < Duration::from_secs(1));

            release_tx.send(()).unwrap();
            assert_eq!(holder.join().unwrap().table_id, 2);
        });

        // 写者释放后恢复正常，超时的请求没有留下任何写入
        assert!(store.occupied_tables(&d2).unwrap().is_empty());
        assert_eq!(store.get(existing.id).unwrap(), Some(existing.clone()));
        assert_eq!(contract::book(&store, &d2, 2, 3).table_id, 3);
        assert_eq!(store.cancel(existing.id).unwrap().id, existing.id);
    }

    #[test]
    fn test_slot_index_does_not_leak_across_prefixes() {
        let store = store();
        // "D1" is a prefix of "D10" in the storage key
        let d1 = contract::slot("D1");
        let d10 = contract::slot("D10");
        contract::book(&store, &d10, 2, 4);
        assert!(store.occupied_tables(&d1).unwrap().is_empty());
        assert_eq!(store.occupied_tables(&d10).unwrap().len(), 1);
    }
}
