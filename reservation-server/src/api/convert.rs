//! 类型转换模块
//!
//! 将原始请求参数 (字符串) 转换为领域类型。
//! 转换只在边界发生一次，核心只接收目录内合法的值。

use chrono::NaiveDate;
use shared::models::{CustomerInfo, MealPeriod, ReservationCreate, SlotKey};

use crate::reservations::ReservationService;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, normalize_optional, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Missing required parameter
pub fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::RequiredField, format!("{field} is required"))
                .with_detail("field", field)
        })
}

pub fn parse_date(raw: &str, field: &str) -> AppResult<NaiveDate> {
    shared::util::parse_date(raw).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{field} must be a date in YYYY-MM-DD format"),
        )
        .with_detail("field", field)
        .with_detail("value", raw)
    })
}

pub fn parse_meal(raw: &str, field: &str) -> AppResult<MealPeriod> {
    raw.parse::<MealPeriod>().map_err(|e| {
        AppError::validation(e.to_string())
            .with_detail("field", field)
            .with_detail("value", raw)
    })
}

/// Raw `(date, meal, timeSlot)` → catalog-valid [`SlotKey`]
pub fn parse_slot(
    service: &ReservationService,
    date: Option<&str>,
    meal: Option<&str>,
    time_slot: Option<&str>,
    meal_field: &str,
) -> AppResult<SlotKey> {
    let date = parse_date(required(date, "date")?, "date")?;
    let meal_period = parse_meal(required(meal, meal_field)?, meal_field)?;
    let time_slot = required(time_slot, "timeSlot")?;
    Ok(service.slot_key(date, meal_period, time_slot)?)
}

/// Optional party size filter; present values must be a positive integer
pub fn parse_party_size(raw: Option<&str>) -> AppResult<Option<u32>> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<u32>() {
        Ok(size) if size > 0 => Ok(Some(size)),
        _ => Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "partySize must be a positive integer",
        )
        .with_detail("field", "partySize")
        .with_detail("value", raw)),
    }
}

/// Validated pieces of a create request
#[derive(Debug)]
pub struct CreateRequest {
    pub slot: SlotKey,
    pub party_size: u32,
    pub table_id: Option<u32>,
    pub customer: CustomerInfo,
}

pub fn create_request(
    service: &ReservationService,
    payload: ReservationCreate,
) -> AppResult<CreateRequest> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    if payload.party_size == 0 {
        return Err(AppError::validation("partySize must be at least 1")
            .with_detail("field", "partySize"));
    }

    let slot = parse_slot(
        service,
        Some(&payload.date),
        Some(&payload.meal_type),
        Some(&payload.time_slot),
        "mealType",
    )?;

    let customer = CustomerInfo {
        name: payload.name.trim().to_string(),
        email: normalize_optional(payload.email),
        phone: normalize_optional(payload.phone),
    };

    Ok(CreateRequest {
        slot,
        party_size: payload.party_size,
        table_id: payload.table_id,
        customer,
    })
}
