use shared::models::ReservationId;
use thiserror::Error;

use crate::allocation::AllocationError;
use crate::store::StoreError;

/// Errors surfaced by [`super::ReservationService`]
#[derive(Debug, Error)]
pub enum ReservationError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("Reservation not found: {0}")]
    NotFound(ReservationId),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for ReservationError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ReservationError::NotFound(id),
            // 在 HTTP 边界按 System 类错误统一记录
            other => ReservationError::StoreUnavailable(other.to_string()),
        }
    }
}
