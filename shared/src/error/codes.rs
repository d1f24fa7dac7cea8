//! Unified error codes for the reservation service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 70xx: Table errors
//! - 72xx: Reservation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 70xx: Table ====================
    /// Table id is not in the registry
    TableNotFound = 7001,
    /// Table already has a reservation in this slot
    TableAlreadyReserved = 7002,
    /// Party does not fit the requested table
    CapacityExceeded = 7003,
    /// No free table fits the party
    NoTableAvailable = 7004,

    // ==================== 72xx: Reservation ====================
    /// Time identifier is not in the slot catalog for the meal period
    InvalidSlot = 7201,
    /// Party size is outside what any table can seat
    PartyTooLarge = 7202,
    /// Reservation not found
    ReservationNotFound = 7203,

    // ==================== 9xxx: System ====================
    /// Reservation store unreachable or lock wait timed out
    StoreUnavailable = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableAlreadyReserved => "Table is already reserved for this time slot",
            ErrorCode::CapacityExceeded => "Party size exceeds table capacity",
            ErrorCode::NoTableAvailable => {
                "No table available for this party size at chosen time"
            }

            // Reservation
            ErrorCode::InvalidSlot => "Invalid time slot for meal period",
            ErrorCode::PartyTooLarge => "Party size too large",
            ErrorCode::ReservationNotFound => "Reservation not found",

            // System
            ErrorCode::StoreUnavailable => "Reservation store unavailable, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7002 => Ok(ErrorCode::TableAlreadyReserved),
            7003 => Ok(ErrorCode::CapacityExceeded),
            7004 => Ok(ErrorCode::NoTableAvailable),

            // Reservation
            7201 => Ok(ErrorCode::InvalidSlot),
            7202 => Ok(ErrorCode::PartyTooLarge),
            7203 => Ok(ErrorCode::ReservationNotFound),

            // System
            9003 => Ok(ErrorCode::StoreUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
