//! Table Registry

use shared::models::{Table, TableId};
use std::collections::HashSet;

use super::{CatalogError, DEFAULT_TABLE_CAPACITIES};

/// 桌台目录
///
/// Ids are exactly `1..=N`, stored sorted so `tables[id - 1]` is table `id`.
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: Vec<Table>,
    max_capacity: u32,
}

impl TableRegistry {
    /// Validate and build a registry from an arbitrary list of tables
    pub fn new(mut tables: Vec<Table>) -> Result<Self, CatalogError> {
        if tables.is_empty() {
            return Err(CatalogError::EmptyRegistry);
        }

        let mut seen = HashSet::with_capacity(tables.len());
        for table in &tables {
            if !seen.insert(table.id) {
                return Err(CatalogError::DuplicateTableId(table.id));
            }
            if table.capacity == 0 {
                return Err(CatalogError::ZeroCapacity(table.id));
            }
        }

        tables.sort_by_key(|t| t.id);
        let expected = tables.len();
        for (idx, table) in tables.iter().enumerate() {
            if table.id as usize != idx + 1 {
                return Err(CatalogError::NonContiguousIds {
                    expected,
                    found: table.id,
                });
            }
        }

        Ok(Self::from_sorted(tables))
    }

    /// Ids assigned 1..=N in slice order
    pub fn from_capacities(capacities: &[u32]) -> Result<Self, CatalogError> {
        Self::new(
            capacities
                .iter()
                .enumerate()
                .map(|(i, &capacity)| Table::new(i as TableId + 1, capacity))
                .collect(),
        )
    }

    pub(super) fn builtin() -> Self {
        Self::from_sorted(
            DEFAULT_TABLE_CAPACITIES
                .iter()
                .enumerate()
                .map(|(i, &capacity)| Table::new(i as TableId + 1, capacity))
                .collect(),
        )
    }

    fn from_sorted(tables: Vec<Table>) -> Self {
        let max_capacity = tables.iter().map(|t| t.capacity).max().unwrap_or(0);
        Self {
            tables,
            max_capacity,
        }
    }

    pub fn get(&self, id: TableId) -> Option<&Table> {
        let idx = (id as usize).checked_sub(1)?;
        self.tables.get(idx)
    }

    /// All tables, ordered by id
    pub fn all(&self) -> &[Table] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Largest seating capacity of any table
    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }
}
