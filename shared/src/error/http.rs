//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::ReservationNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::TableAlreadyReserved
            | Self::CapacityExceeded
            | Self::NoTableAvailable
            | Self::PartyTooLarge => StatusCode::CONFLICT,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 400 Bad Request (validation errors, unknown tables, bad slots)
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::TableNotFound
            | Self::InvalidSlot => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            ErrorCode::RequiredField.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::ReservationNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::TableAlreadyReserved.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ErrorCode::PartyTooLarge.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::TableNotFound.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::InvalidSlot.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::StoreUnavailable.http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
