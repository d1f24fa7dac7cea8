//! Table Model

use serde::{Deserialize, Serialize};

use super::slot::DinnerRound;

pub type TableId = u32;

/// Dining table entity (桌台)
///
/// Loaded once from configuration at startup, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    /// 线上字段名沿用前端的 `max`
    #[serde(rename = "max", alias = "capacity")]
    pub capacity: u32,
}

impl Table {
    pub fn new(id: TableId, capacity: u32) -> Self {
        Self { id, capacity }
    }

    /// Whether a party of `party_size` fits at this table
    pub fn seats(&self, party_size: u32) -> bool {
        self.capacity >= party_size
    }
}

/// Per-table booked seat count for a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSeatStatus {
    pub table_id: TableId,
    #[serde(rename = "max", alias = "capacity")]
    pub capacity: u32,
    /// Sum of party sizes booked at this table in the slot
    pub reserved_seats: u32,
}

/// GET /availability 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub free_tables: Vec<Table>,
    pub count: usize,
    pub total_tables: usize,
}

/// GET /tableReservations 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusResponse {
    pub tables: Vec<TableSeatStatus>,
}

/// GET /config 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub total_tables: usize,
    pub tables: Vec<Table>,
    pub lunch_slots: Vec<String>,
    pub dinner_rounds: Vec<DinnerRound>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_wire_names() {
        let json = serde_json::to_value(Table::new(3, 10)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 3, "max": 10}));

        // 目录文件里写 capacity 也能读
        let table: Table = serde_json::from_str(r#"{"id": 1, "capacity": 2}"#).unwrap();
        assert_eq!(table, Table::new(1, 2));

        let status = TableSeatStatus {
            table_id: 2,
            capacity: 4,
            reserved_seats: 3,
        };
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            serde_json::json!({"tableId": 2, "max": 4, "reservedSeats": 3})
        );
    }
}
