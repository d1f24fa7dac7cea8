//! Slot Model
//!
//! A slot is the `(date, meal period, time identifier)` tuple that groups
//! reservations. Two reservations conflict only when their slots are equal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Meal period (餐段)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealPeriod {
    Lunch,
    Dinner,
}

impl MealPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealPeriod::Lunch => "lunch",
            MealPeriod::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown meal period: {0}")]
pub struct ParseMealPeriodError(pub String);

impl FromStr for MealPeriod {
    type Err = ParseMealPeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lunch" => Ok(MealPeriod::Lunch),
            "dinner" => Ok(MealPeriod::Dinner),
            _ => Err(ParseMealPeriodError(s.to_string())),
        }
    }
}

/// Time identifier within a meal period
///
/// A lunch range such as `11:30-12:30` or a dinner round id such as `D1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeId(String);

impl TimeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite key `(date, meal period, time identifier)`
///
/// Field order gives the natural `(date, meal, time)` ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    #[serde(rename = "mealType")]
    pub meal_period: MealPeriod,
    #[serde(rename = "timeSlot")]
    pub time_id: TimeId,
}

impl SlotKey {
    pub fn new(date: NaiveDate, meal_period: MealPeriod, time_id: TimeId) -> Self {
        Self {
            date,
            meal_period,
            time_id,
        }
    }

    /// Stable textual form used as storage index prefix: `2024-06-01/dinner/D1`
    pub fn storage_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.date.format("%Y-%m-%d"),
            self.meal_period,
            self.time_id
        )
    }
}

/// Dinner round (晚市轮次)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DinnerRound {
    pub id: String,
    pub label: String,
}

/// Client view of the slot catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotCatalogView {
    pub lunch_slots: Vec<String>,
    pub dinner_rounds: Vec<DinnerRound>,
}
