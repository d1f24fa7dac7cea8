//! Shared types for the reservation service
//!
//! Common types used by the server and its clients: catalog and
//! reservation models, the unified error system and response envelope.

pub mod error;
pub mod models;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
