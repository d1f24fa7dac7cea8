//! 统一错误处理
//!
//! 错误类型来自 `shared::error`，这里负责把领域错误转换为 [`AppError`]。
//!
//! # 错误码
//!
//! | 范围 | 分类 | 示例 |
//! |------|------|------|
//! | 0xxx | 通用错误 | 2 验证失败 |
//! | 70xx | 桌台错误 | 7002 桌台已被预订 |
//! | 72xx | 预订错误 | 7201 无效时段 |
//! | 9xxx | 系统错误 | 9003 存储不可用 |
//!
//! # 使用示例
//!
//! ```ignore
//! let reservation = service.create_reservation(slot, 4, None, customer).await?;
//! Ok(Json(reservation))
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::allocation::AllocationError;
use crate::reservations::ReservationError;

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::Allocation(e) => allocation_error(e),
            ReservationError::NotFound(id) => {
                AppError::with_message(
                    ErrorCode::ReservationNotFound,
                    format!("Reservation {id} not found"),
                )
                .with_detail("id", id)
            }
            ReservationError::StoreUnavailable(msg) => AppError::store_unavailable(msg),
        }
    }
}

fn allocation_error(err: AllocationError) -> AppError {
    let message = err.to_string();
    match err {
        AllocationError::InvalidSlot {
            meal_period,
            time_id,
        } => AppError::with_message(ErrorCode::InvalidSlot, message)
            .with_detail("mealType", meal_period.as_str())
            .with_detail("timeSlot", time_id.as_str()),
        AllocationError::PartyTooLarge {
            party_size,
            max_capacity,
        } => AppError::with_message(ErrorCode::PartyTooLarge, message)
            .with_detail("partySize", party_size)
            .with_detail("maxCapacity", max_capacity),
        AllocationError::UnknownTable(table_id) => {
            AppError::with_message(ErrorCode::TableNotFound, message)
                .with_detail("tableId", table_id)
        }
        AllocationError::CapacityExceeded {
            table_id,
            capacity,
            party_size,
        } => AppError::with_message(ErrorCode::CapacityExceeded, message)
            .with_detail("tableId", table_id)
            .with_detail("capacity", capacity)
            .with_detail("partySize", party_size),
        AllocationError::TableAlreadyReserved(table_id) => {
            AppError::with_message(ErrorCode::TableAlreadyReserved, message)
                .with_detail("tableId", table_id)
        }
        AllocationError::NoTableAvailable(party_size) => {
            AppError::with_message(ErrorCode::NoTableAvailable, message)
                .with_detail("partySize", party_size)
        }
    }
}
