//! Slot Catalog

use chrono::NaiveDate;
use shared::models::{DinnerRound, MealPeriod, SlotCatalogView, SlotKey, TimeId};
use std::collections::HashSet;

use super::{CatalogError, DEFAULT_DINNER_ROUNDS, DEFAULT_LUNCH_SLOTS};
use crate::allocation::AllocationError;

/// 餐段时段目录
///
/// Lunch is a list of time ranges; dinner is a list of labelled rounds whose
/// `id` is the time identifier.
#[derive(Debug, Clone)]
pub struct SlotCatalog {
    lunch_slots: Vec<TimeId>,
    dinner_rounds: Vec<DinnerRound>,
}

impl SlotCatalog {
    pub fn new(
        lunch_slots: Vec<String>,
        dinner_rounds: Vec<DinnerRound>,
    ) -> Result<Self, CatalogError> {
        if lunch_slots.is_empty() && dinner_rounds.is_empty() {
            return Err(CatalogError::NoSlots);
        }

        check_ids(MealPeriod::Lunch, lunch_slots.iter().map(String::as_str))?;
        check_ids(
            MealPeriod::Dinner,
            dinner_rounds.iter().map(|r| r.id.as_str()),
        )?;

        Ok(Self {
            lunch_slots: lunch_slots.into_iter().map(TimeId::new).collect(),
            dinner_rounds,
        })
    }

    pub(super) fn builtin() -> Self {
        Self {
            lunch_slots: DEFAULT_LUNCH_SLOTS.iter().map(|s| TimeId::new(*s)).collect(),
            dinner_rounds: DEFAULT_DINNER_ROUNDS
                .iter()
                .map(|(id, label)| DinnerRound {
                    id: id.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    /// Whether `time_id` is offered for `meal_period`
    pub fn contains(&self, meal_period: MealPeriod, time_id: &TimeId) -> bool {
        match meal_period {
            MealPeriod::Lunch => self.lunch_slots.contains(time_id),
            MealPeriod::Dinner => self.dinner_rounds.iter().any(|r| r.id == time_id.as_str()),
        }
    }

    /// Build a catalog-valid slot key from a raw time identifier
    pub fn slot_key(
        &self,
        date: NaiveDate,
        meal_period: MealPeriod,
        raw_time_id: &str,
    ) -> Result<SlotKey, AllocationError> {
        let time_id = TimeId::new(raw_time_id.trim());
        let slot = SlotKey::new(date, meal_period, time_id);
        self.ensure(&slot)?;
        Ok(slot)
    }

    /// Reject slot keys whose time identifier is not offered for their meal period
    pub fn ensure(&self, slot: &SlotKey) -> Result<(), AllocationError> {
        if self.contains(slot.meal_period, &slot.time_id) {
            Ok(())
        } else {
            Err(AllocationError::InvalidSlot {
                meal_period: slot.meal_period,
                time_id: slot.time_id.clone(),
            })
        }
    }

    pub fn view(&self) -> SlotCatalogView {
        SlotCatalogView {
            lunch_slots: self.lunch_slots.iter().map(|t| t.to_string()).collect(),
            dinner_rounds: self.dinner_rounds.clone(),
        }
    }
}

fn check_ids<'a>(
    meal_period: MealPeriod,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err(CatalogError::EmptySlotId(meal_period));
        }
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateSlot {
                meal_period,
                time_id: id.to_string(),
            });
        }
    }
    Ok(())
}
