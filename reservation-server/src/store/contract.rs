//! Behaviour shared by every [`ReservationStore`] backend

use chrono::NaiveDate;
use shared::models::{CustomerInfo, MealPeriod, Reservation, SlotKey, TableId, TimeId};

use super::{ReservationDraft, ReservationStore, StoreError};
use crate::allocation::{AllocationError, Occupancy};

pub fn slot(time_id: &str) -> SlotKey {
    slot_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), time_id)
}

pub fn slot_on(date: NaiveDate, time_id: &str) -> SlotKey {
    SlotKey::new(date, MealPeriod::Dinner, TimeId::new(time_id))
}

pub fn draft(slot: &SlotKey, party_size: u32) -> ReservationDraft {
    ReservationDraft {
        slot: slot.clone(),
        party_size,
        customer: CustomerInfo::new("Ada").with_phone("555-0100"),
    }
}

/// Book `table_id` unconditionally
pub fn book(
    store: &dyn ReservationStore,
    slot: &SlotKey,
    party_size: u32,
    table_id: TableId,
) -> Reservation {
    store
        .create(draft(slot, party_size), &|_: &Occupancy| Ok(table_id))
        .unwrap()
        .unwrap()
}

pub fn create_and_occupancy(store: &dyn ReservationStore) {
    let d1 = slot("D1");
    let d2 = slot("D2");

    let r = book(store, &d1, 3, 2);
    assert_eq!(r.table_id, 2);
    assert_eq!(r.customer_name, "Ada");
    assert_eq!(r.phone.as_deref(), Some("555-0100"));
    assert!(r.created_at > 0);

    // the decision sees what is already booked
    let seen = store
        .create(draft(&d1, 2), &|occupied: &Occupancy| {
            assert!(occupied.contains(&2));
            Ok(1)
        })
        .unwrap()
        .unwrap();
    assert_eq!(seen.table_id, 1);

    assert_eq!(
        store.occupied_tables(&d1).unwrap().into_iter().collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert!(store.occupied_tables(&d2).unwrap().is_empty());

    assert_eq!(store.get(r.id).unwrap(), Some(r));
    assert_eq!(store.get(9_999).unwrap(), None);
}

pub fn rejected_decision_writes_nothing(store: &dyn ReservationStore) {
    let d1 = slot("D1");
    let outcome = store
        .create(draft(&d1, 4), &|_: &Occupancy| {
            Err(AllocationError::NoTableAvailable(4))
        })
        .unwrap();
    assert_eq!(outcome, Err(AllocationError::NoTableAvailable(4)));
    assert!(store.occupied_tables(&d1).unwrap().is_empty());
    assert!(store.list(None).unwrap().is_empty());
}

pub fn cancel_twice(store: &dyn ReservationStore) {
    let d1 = slot("D1");
    let r = book(store, &d1, 2, 3);

    let removed = store.cancel(r.id).unwrap();
    assert_eq!(removed, r);
    assert!(store.occupied_tables(&d1).unwrap().is_empty());
    assert!(matches!(store.cancel(r.id), Err(StoreError::NotFound(id)) if id == r.id));
    assert_eq!(store.get(r.id).unwrap(), None);

    // table is free again
    let again = book(store, &d1, 2, 3);
    assert_ne!(again.id, r.id);
}

pub fn seat_usage_sums_party_sizes(store: &dyn ReservationStore) {
    let d1 = slot("D1");
    book(store, &d1, 2, 5);
    book(store, &d1, 1, 5);
    book(store, &d1, 4, 6);
    book(store, &slot("D2"), 3, 5);

    let usage = store.seat_usage(&d1).unwrap();
    assert_eq!(usage.get(&5), Some(&3));
    assert_eq!(usage.get(&6), Some(&4));
    assert_eq!(usage.get(&1), None);
}

pub fn list_filters_by_date(store: &dyn ReservationStore) {
    let june_1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let june_2 = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
    let a = book(store, &slot_on(june_1, "D1"), 2, 1);
    let b = book(store, &slot_on(june_2, "D1"), 2, 1);

    assert_eq!(store.list(None).unwrap().len(), 2);
    assert_eq!(store.list(Some(june_1)).unwrap(), vec![a]);
    assert_eq!(store.list(Some(june_2)).unwrap(), vec![b]);
    assert!(
        store
            .list(Some(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()))
            .unwrap()
            .is_empty()
    );
}

pub fn ids_are_monotonic(store: &dyn ReservationStore) {
    let d1 = slot("D1");
    let first = book(store, &d1, 2, 1);
    store.cancel(first.id).unwrap();
    let second = book(store, &d1, 2, 1);
    let third = book(store, &d1, 2, 2);
    assert!(second.id > first.id);
    assert!(third.id > second.id);
}
