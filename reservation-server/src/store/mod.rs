//! 预订存储层
//!
//! # 实现
//!
//! - [`MemoryStore`] - 进程内存储 (测试 / `STORE_BACKEND=memory`)
//! - [`RedbStore`] - redb 持久化存储
//!
//! # 原子性
//!
//! [`ReservationStore::create`] 在同一个单元内完成
//! `读取占用 → 分配决策 → 写入预订`。两个实现都先获取该时段的
//! [`SlotLocks`] 锁，同一时段串行，不同时段互不阻塞。
//! 决策本身由调用方以闭包传入，存储层不依赖分配策略。

mod locks;
mod memory;
mod redb_store;

pub use locks::SlotLocks;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use chrono::NaiveDate;
use shared::models::{CustomerInfo, Reservation, ReservationId, SlotKey, TableId};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::allocation::{AllocationError, Occupancy};

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Reservation not found: {0}")]
    NotFound(ReservationId),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything needed to persist a reservation except the table
#[derive(Debug, Clone)]
pub struct ReservationDraft {
    pub slot: SlotKey,
    pub party_size: u32,
    pub customer: CustomerInfo,
}

impl ReservationDraft {
    fn into_reservation(self, id: ReservationId, table_id: TableId) -> Reservation {
        Reservation {
            id,
            customer_name: self.customer.name,
            email: self.customer.email,
            phone: self.customer.phone,
            party_size: self.party_size,
            slot: self.slot,
            table_id,
            created_at: shared::util::now_millis(),
        }
    }
}

/// Allocation callback run inside the store's atomic unit
pub type Decide<'a> = &'a dyn Fn(&Occupancy) -> Result<TableId, AllocationError>;

/// Durable record of committed reservations
pub trait ReservationStore: Send + Sync {
    /// Backend name for logs and health checks
    fn backend(&self) -> &'static str;

    /// Tables with at least one reservation in `slot`
    fn occupied_tables(&self, slot: &SlotKey) -> StoreResult<Occupancy>;

    /// Booked seats per table in `slot` (tables without bookings are absent)
    fn seat_usage(&self, slot: &SlotKey) -> StoreResult<BTreeMap<TableId, u32>>;

    /// Atomic read-decide-write
    ///
    /// The outer `Result` carries store failures, the inner one the
    /// allocation decision. A rejected decision writes nothing.
    fn create(
        &self,
        draft: ReservationDraft,
        decide: Decide<'_>,
    ) -> StoreResult<Result<Reservation, AllocationError>>;

    fn get(&self, id: ReservationId) -> StoreResult<Option<Reservation>>;

    /// Delete by id, returning the removed reservation
    fn cancel(&self, id: ReservationId) -> StoreResult<Reservation>;

    /// All reservations, optionally restricted to one date (unordered)
    fn list(&self, date: Option<NaiveDate>) -> StoreResult<Vec<Reservation>>;
}

#[cfg(test)]
mod contract;
