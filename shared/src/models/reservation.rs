//! Reservation Model

use serde::{Deserialize, Serialize};

use super::slot::SlotKey;
use super::table::TableId;

pub type ReservationId = u64;

/// Committed reservation (预订)
///
/// Immutable once created. Cancellation removes it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    #[serde(rename = "name", alias = "customerName")]
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub party_size: u32,
    #[serde(flatten)]
    pub slot: SlotKey,
    pub table_id: TableId,
    /// Unix millis
    pub created_at: i64,
}

/// Contact details attached to a reservation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl CustomerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Create reservation payload (POST /reserve)
///
/// Slot fields arrive as raw strings and are checked against the catalog
/// before anything reaches the allocation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub party_size: u32,
    pub date: String,
    pub meal_type: String,
    pub time_slot: String,
    /// Explicit table choice; auto-assigned when absent
    #[serde(default)]
    pub table_id: Option<TableId>,
}

/// POST /reserve 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveResponse {
    pub success: bool,
    pub reservation: Reservation,
}

impl ReserveResponse {
    pub fn new(reservation: Reservation) -> Self {
        Self {
            success: true,
            reservation,
        }
    }
}

/// GET /reservations 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationListResponse {
    pub reservations: Vec<Reservation>,
}

/// DELETE /reservations/{id} 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelResponse {
    pub success: bool,
    pub deleted_id: ReservationId,
}

impl CancelResponse {
    pub fn new(deleted_id: ReservationId) -> Self {
        Self {
            success: true,
            deleted_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealPeriod, TimeId};

    #[test]
    fn test_reservation_wire_shape() {
        let reservation = Reservation {
            id: 7,
            customer_name: "Ada".into(),
            email: None,
            phone: Some("555-0100".into()),
            party_size: 3,
            slot: SlotKey::new(
                chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                MealPeriod::Dinner,
                TimeId::new("D1"),
            ),
            table_id: 2,
            created_at: 1_717_200_000_000,
        };

        let json = serde_json::to_value(&reservation).unwrap();
        assert_eq!(json["name"], "Ada");
        assert!(json.get("customerName").is_none());
        assert_eq!(json["partySize"], 3);
        assert_eq!(json["date"], "2024-06-01");
        assert_eq!(json["mealType"], "dinner");
        assert_eq!(json["timeSlot"], "D1");
        assert_eq!(json["tableId"], 2);
        assert!(json.get("email").is_none());

        let back: Reservation = serde_json::from_value(json).unwrap();
        assert_eq!(back, reservation);
    }

    #[test]
    fn test_create_payload_optional_fields() {
        let json = r#"{"name":"Bo","partySize":2,"date":"2024-06-01","mealType":"lunch","timeSlot":"11:30-12:30"}"#;
        let payload: ReservationCreate = serde_json::from_str(json).unwrap();
        assert_eq!(payload.name, "Bo");
        assert!(payload.table_id.is_none());
        assert!(payload.email.is_none());
    }
}
