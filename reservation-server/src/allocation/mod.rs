//! 桌台分配引擎
//!
//! 纯函数: 给定占用集合、人数和可选的指定桌号，决定分配哪张桌台。
//! 不读写存储，不加锁；原子性由存储层的 read-decide-write 事务保证。
//!
//! # 校验顺序
//!
//! 1. 时段属于该餐段的目录 → 否则 `InvalidSlot`
//! 2. 指定桌号存在 → 否则 `UnknownTable`
//! 3. `1 <= party_size <= max_capacity` → 否则 `PartyTooLarge`
//! 4. 指定桌号: 容量足够 → `CapacityExceeded`；未被占用 → `TableAlreadyReserved`
//! 5. 自动分配: 最佳适配 (容量最小，其次桌号最小) → 无候选时 `NoTableAvailable`

use shared::models::{MealPeriod, SlotKey, Table, TableId, TimeId};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::catalog::Catalog;

/// Tables already reserved for one slot
pub type Occupancy = BTreeSet<TableId>;

/// Allocation rejections
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("time slot '{time_id}' is not offered for {meal_period}")]
    InvalidSlot {
        meal_period: MealPeriod,
        time_id: TimeId,
    },

    #[error("party size {party_size} is outside 1..={max_capacity}")]
    PartyTooLarge { party_size: u32, max_capacity: u32 },

    #[error("table {0} does not exist")]
    UnknownTable(TableId),

    #[error("party size {party_size} exceeds capacity {capacity} of table {table_id}")]
    CapacityExceeded {
        table_id: TableId,
        capacity: u32,
        party_size: u32,
    },

    #[error("table {0} is already reserved for this time slot")]
    TableAlreadyReserved(TableId),

    #[error("no table available for a party of {0} at the chosen time")]
    NoTableAvailable(u32),
}

/// Decide which table serves the request
pub fn allocate(
    catalog: &Catalog,
    slot: &SlotKey,
    party_size: u32,
    occupied: &Occupancy,
    requested_table: Option<TableId>,
) -> Result<Table, AllocationError> {
    catalog.slots.ensure(slot)?;

    let requested = match requested_table {
        Some(id) => Some(
            *catalog
                .tables
                .get(id)
                .ok_or(AllocationError::UnknownTable(id))?,
        ),
        None => None,
    };

    let max_capacity = catalog.tables.max_capacity();
    if party_size == 0 || party_size > max_capacity {
        return Err(AllocationError::PartyTooLarge {
            party_size,
            max_capacity,
        });
    }

    match requested {
        Some(table) => {
            if !table.seats(party_size) {
                return Err(AllocationError::CapacityExceeded {
                    table_id: table.id,
                    capacity: table.capacity,
                    party_size,
                });
            }
            if occupied.contains(&table.id) {
                return Err(AllocationError::TableAlreadyReserved(table.id));
            }
            Ok(table)
        }
        None => best_fit(catalog.tables.all(), party_size, occupied)
            .ok_or(AllocationError::NoTableAvailable(party_size)),
    }
}

/// Smallest free table that seats the party; ties go to the lowest id
pub fn best_fit(tables: &[Table], party_size: u32, occupied: &Occupancy) -> Option<Table> {
    tables
        .iter()
        .filter(|t| t.seats(party_size) && !occupied.contains(&t.id))
        .min_by_key(|t| (t.capacity, t.id))
        .copied()
}

/// Free tables for a slot, optionally only those that seat `party_size`
pub fn free_tables(tables: &[Table], occupied: &Occupancy, party_size: Option<u32>) -> Vec<Table> {
    tables
        .iter()
        .filter(|t| !occupied.contains(&t.id))
        .filter(|t| party_size.is_none_or(|size| t.seats(size)))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SlotCatalog, TableRegistry};
    use chrono::NaiveDate;

    fn catalog(capacities: &[u32]) -> Catalog {
        Catalog::new(
            TableRegistry::from_capacities(capacities).unwrap(),
            Catalog::builtin().slots,
        )
    }

    fn dinner(time_id: &str) -> SlotKey {
        SlotKey::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            MealPeriod::Dinner,
            TimeId::new(time_id),
        )
    }

    fn occupied(ids: &[TableId]) -> Occupancy {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_best_fit_picks_smallest_sufficient_table() {
        let catalog = catalog(&[2, 4, 6]);
        let table = allocate(&catalog, &dinner("D1"), 3, &Occupancy::new(), None).unwrap();
        assert_eq!(table, Table::new(2, 4));
    }

    #[test]
    fn test_best_fit_tie_breaks_on_lowest_id() {
        let tied = catalog(&[4, 4]);
        let table = allocate(&tied, &dinner("D1"), 2, &Occupancy::new(), None).unwrap();
        assert_eq!(table.id, 1);

        let mixed = catalog(&[6, 4, 4]);
        let table = allocate(&mixed, &dinner("D1"), 2, &Occupancy::new(), None).unwrap();
        assert_eq!(table.id, 2);
    }

    #[test]
    fn test_best_fit_skips_occupied_tables() {
        let catalog = catalog(&[2, 4, 10]);
        let table = allocate(&catalog, &dinner("D1"), 3, &occupied(&[2]), None).unwrap();
        assert_eq!(table, Table::new(3, 10));
    }

    #[test]
    fn test_no_table_available() {
        let catalog = catalog(&[2, 4, 10]);
        assert_eq!(
            allocate(&catalog, &dinner("D1"), 1, &occupied(&[1, 2, 3]), None),
            Err(AllocationError::NoTableAvailable(1))
        );
        // only a too-small table is free
        assert_eq!(
            allocate(&catalog, &dinner("D1"), 3, &occupied(&[2, 3]), None),
            Err(AllocationError::NoTableAvailable(3))
        );
    }

    #[test]
    fn test_never_returns_table_below_party_size() {
        let caps = [2, 2, 4, 4, 6, 10];
        let catalog = catalog(&caps);
        for party_size in 1..=10 {
            for mask in 0u32..(1 << caps.len()) {
                let occ: Occupancy = (0..caps.len() as u32)
                    .filter(|i| mask & (1 << i) != 0)
                    .map(|i| i + 1)
                    .collect();
                if let Ok(table) = allocate(&catalog, &dinner("D2"), party_size, &occ, None) {
                    assert!(table.capacity >= party_size);
                    assert!(!occ.contains(&table.id));
                }
            }
        }
    }

    #[test]
    fn test_invalid_slot_checked_first() {
        let catalog = catalog(&[2, 4]);
        let err = allocate(&catalog, &dinner("D9"), 99, &Occupancy::new(), Some(42)).unwrap_err();
        assert!(matches!(err, AllocationError::InvalidSlot { .. }));
    }

    #[test]
    fn test_party_size_bounds() {
        let catalog = catalog(&[2, 4, 10]);
        assert_eq!(
            allocate(&catalog, &dinner("D1"), 11, &Occupancy::new(), None),
            Err(AllocationError::PartyTooLarge {
                party_size: 11,
                max_capacity: 10
            })
        );
        assert!(matches!(
            allocate(&catalog, &dinner("D1"), 0, &Occupancy::new(), None),
            Err(AllocationError::PartyTooLarge { party_size: 0, .. })
        ));
        assert_eq!(
            allocate(&catalog, &dinner("D1"), 10, &Occupancy::new(), None).unwrap(),
            Table::new(3, 10)
        );
    }

    #[test]
    fn test_explicit_table_validation_order() {
        let catalog = catalog(&[2, 4, 10]);
        let slot = dinner("D1");

        // unknown table wins over an invalid party size
        assert_eq!(
            allocate(&catalog, &slot, 50, &Occupancy::new(), Some(9)),
            Err(AllocationError::UnknownTable(9))
        );
        assert_eq!(
            allocate(&catalog, &slot, 2, &Occupancy::new(), Some(0)),
            Err(AllocationError::UnknownTable(0))
        );

        // too small, even when also occupied
        assert_eq!(
            allocate(&catalog, &slot, 3, &occupied(&[1]), Some(1)),
            Err(AllocationError::CapacityExceeded {
                table_id: 1,
                capacity: 2,
                party_size: 3
            })
        );

        assert_eq!(
            allocate(&catalog, &slot, 3, &occupied(&[2]), Some(2)),
            Err(AllocationError::TableAlreadyReserved(2))
        );

        // explicit choice is honoured even when a better fit exists
        assert_eq!(
            allocate(&catalog, &slot, 2, &Occupancy::new(), Some(3)).unwrap(),
            Table::new(3, 10)
        );
    }

    #[test]
    fn test_booking_sequence_scenario() {
        let catalog = catalog(&[2, 4, 10]);
        let slot = dinner("D1");
        let mut occ = Occupancy::new();

        let first = allocate(&catalog, &slot, 3, &occ, None).unwrap();
        assert_eq!(first.id, 2);
        occ.insert(first.id);

        let second = allocate(&catalog, &slot, 3, &occ, None).unwrap();
        assert_eq!(second.id, 3);
        occ.insert(second.id);

        let third = allocate(&catalog, &slot, 2, &occ, None).unwrap();
        assert_eq!(third.id, 1);
        occ.insert(third.id);

        assert_eq!(
            allocate(&catalog, &slot, 1, &occ, None),
            Err(AllocationError::NoTableAvailable(1))
        );
    }

    #[test]
    fn test_free_tables_filter() {
        let tables = TableRegistry::from_capacities(&[2, 4, 6, 10]).unwrap();
        let occ = occupied(&[3]);

        let all_free = free_tables(tables.all(), &occ, None);
        assert_eq!(
            all_free.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2, 4]
        );

        let fits_five = free_tables(tables.all(), &occ, Some(5));
        assert_eq!(fits_five, vec![Table::new(4, 10)]);
    }

    #[test]
    fn test_lunch_slot_uses_own_catalog() {
        let catalog = Catalog::new(
            TableRegistry::from_capacities(&[4]).unwrap(),
            SlotCatalog::new(vec!["12:00-13:00".into()], vec![]).unwrap(),
        );
        let lunch = SlotKey::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            MealPeriod::Lunch,
            TimeId::new("12:00-13:00"),
        );
        assert!(allocate(&catalog, &lunch, 4, &Occupancy::new(), None).is_ok());
        assert!(matches!(
            allocate(&catalog, &dinner("D1"), 4, &Occupancy::new(), None),
            Err(AllocationError::InvalidSlot { .. })
        ));
    }
}
