//! 集成测试公共工具
#![allow(dead_code)]

use chrono::NaiveDate;
use reservation_server::catalog::{Catalog, SlotCatalog, TableRegistry};
use reservation_server::{MemoryStore, RedbStore, ReservationService, ReservationStore};
use shared::models::{DinnerRound, MealPeriod, SlotKey, TimeId};
use std::sync::Arc;
use std::time::Duration;

pub const TIMEOUT: Duration = Duration::from_secs(10);

pub fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub fn dinner(time_id: &str) -> SlotKey {
    SlotKey::new(date(), MealPeriod::Dinner, TimeId::new(time_id))
}

/// Catalog with the given capacities and D1..D3 dinner rounds
pub fn catalog(capacities: &[u32]) -> Arc<Catalog> {
    let rounds = ["D1", "D2", "D3"]
        .into_iter()
        .map(|id| DinnerRound {
            id: id.into(),
            label: id.into(),
        })
        .collect();
    Arc::new(Catalog::new(
        TableRegistry::from_capacities(capacities).unwrap(),
        SlotCatalog::new(vec!["11:30-12:30".into()], rounds).unwrap(),
    ))
}

/// Each backend under test, labelled
pub fn backends() -> Vec<(&'static str, Arc<dyn ReservationStore>)> {
    vec![
        ("memory", Arc::new(MemoryStore::new(TIMEOUT))),
        ("redb", Arc::new(RedbStore::open_in_memory(TIMEOUT).unwrap())),
    ]
}

pub fn service(catalog: Arc<Catalog>, store: Arc<dyn ReservationStore>) -> ReservationService {
    ReservationService::new(catalog, store)
}
