use chrono::NaiveDate;
use shared::models::{
    CustomerInfo, MealPeriod, Reservation, ReservationId, SlotCatalogView, SlotKey, Table, TableId,
    TableSeatStatus,
};
use std::sync::Arc;

use super::ReservationError;
use crate::allocation::{self, Occupancy};
use crate::catalog::Catalog;
use crate::store::{ReservationDraft, ReservationStore, StoreResult};

/// Reservation use cases over an immutable catalog and a store
#[derive(Clone)]
pub struct ReservationService {
    catalog: Arc<Catalog>,
    store: Arc<dyn ReservationStore>,
}

impl std::fmt::Debug for ReservationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReservationService")
            .field("tables", &self.catalog.tables.len())
            .field("backend", &self.store.backend())
            .finish()
    }
}

impl ReservationService {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn ReservationStore>) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub fn tables(&self) -> Vec<Table> {
        self.catalog.tables.all().to_vec()
    }

    pub fn slot_catalog(&self) -> SlotCatalogView {
        self.catalog.slots.view()
    }

    /// Validate a raw time identifier into a slot key
    pub fn slot_key(
        &self,
        date: NaiveDate,
        meal_period: MealPeriod,
        time_id: &str,
    ) -> Result<SlotKey, ReservationError> {
        Ok(self.catalog.slots.slot_key(date, meal_period, time_id)?)
    }

    /// Run a store call on the blocking pool
    async fn with_store<T, F>(&self, f: F) -> Result<T, ReservationError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ReservationStore) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| ReservationError::StoreUnavailable(format!("store task failed: {e}")))?;
        Ok(result?)
    }

    pub async fn occupied_tables(&self, slot: &SlotKey) -> Result<Occupancy, ReservationError> {
        self.catalog.slots.ensure(slot)?;
        let slot = slot.clone();
        self.with_store(move |store| store.occupied_tables(&slot)).await
    }

    /// Free tables for a slot, optionally only those seating `party_size`
    pub async fn availability(
        &self,
        slot: &SlotKey,
        party_size: Option<u32>,
    ) -> Result<Vec<Table>, ReservationError> {
        let occupied = self.occupied_tables(slot).await?;
        Ok(allocation::free_tables(
            self.catalog.tables.all(),
            &occupied,
            party_size,
        ))
    }

    /// Booked seats per table for a slot; every table is listed
    pub async fn table_status(
        &self,
        slot: &SlotKey,
    ) -> Result<Vec<TableSeatStatus>, ReservationError> {
        self.catalog.slots.ensure(slot)?;
        let key = slot.clone();
        let usage = self.with_store(move |store| store.seat_usage(&key)).await?;

        Ok(self
            .catalog
            .tables
            .all()
            .iter()
            .map(|table| TableSeatStatus {
                table_id: table.id,
                capacity: table.capacity,
                reserved_seats: usage.get(&table.id).copied().unwrap_or(0),
            })
            .collect())
    }

    /// Allocate a table and persist the reservation atomically
    pub async fn create_reservation(
        &self,
        slot: SlotKey,
        party_size: u32,
        requested_table: Option<TableId>,
        customer: CustomerInfo,
    ) -> Result<Reservation, ReservationError> {
        let catalog = Arc::clone(&self.catalog);
        let draft = ReservationDraft {
            slot: slot.clone(),
            party_size,
            customer,
        };
        let key = slot.clone();

        let outcome = self
            .with_store(move |store| {
                let decide = |occupied: &Occupancy| {
                    allocation::allocate(&catalog, &key, party_size, occupied, requested_table)
                        .map(|table| table.id)
                };
                store.create(draft, &decide)
            })
            .await?;

        match outcome {
            Ok(reservation) => {
                tracing::info!(
                    reservation_id = reservation.id,
                    table_id = reservation.table_id,
                    slot = %reservation.slot,
                    party_size,
                    "Reservation created"
                );
                Ok(reservation)
            }
            Err(e) => {
                tracing::warn!(
                    slot = %slot,
                    party_size,
                    requested_table = ?requested_table,
                    error = %e,
                    "Reservation rejected"
                );
                Err(e.into())
            }
        }
    }

    /// Delete a reservation; an unknown id is [`ReservationError::NotFound`]
    pub async fn cancel_reservation(
        &self,
        id: ReservationId,
    ) -> Result<Reservation, ReservationError> {
        let reservation = self.with_store(move |store| store.cancel(id)).await?;
        tracing::info!(
            reservation_id = id,
            table_id = reservation.table_id,
            slot = %reservation.slot,
            "Reservation cancelled"
        );
        Ok(reservation)
    }

    /// Reservations ordered by date, time identifier, table
    pub async fn list_reservations(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Reservation>, ReservationError> {
        let mut reservations = self.with_store(move |store| store.list(date)).await?;
        reservations.sort_by(|a, b| {
            (a.slot.date, a.slot.time_id.as_str(), a.table_id, a.id).cmp(&(
                b.slot.date,
                b.slot.time_id.as_str(),
                b.table_id,
                b.id,
            ))
        });
        Ok(reservations)
    }
}
