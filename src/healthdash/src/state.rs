use chrono::NaiveDate;
use healthdash_provider::ProviderError;
use healthdash_types::{
    AsyncValue, activities::ActivityRecord, heat_map::HeatMapDatum, ui::RecordUiModel,
};

pub type Async<T> = AsyncValue<T, ProviderError>;

/// Snapshot published to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub selected_date: NaiveDate,
    pub is_provider_available: Async<bool>,
    pub is_permission_granted: Async<bool>,
    pub today_records: Async<Vec<RecordUiModel>>,
    pub activities: Async<Vec<ActivityRecord>>,
    pub heat_map: Async<Vec<HeatMapDatum>>,
    /// Why the provider is unavailable, when it is.
    pub provider_error: Option<ProviderError>,
}

impl HomeState {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            selected_date,
            is_provider_available: AsyncValue::Uninitialized,
            is_permission_granted: AsyncValue::Uninitialized,
            today_records: AsyncValue::Uninitialized,
            activities: AsyncValue::Uninitialized,
            heat_map: AsyncValue::Uninitialized,
            provider_error: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.is_provider_available.value() == Some(&true)
            && self.is_permission_granted.value() == Some(&true)
    }

    /// Nothing more will change without a new event.
    pub fn is_settled(&self) -> bool {
        if !self.is_provider_available.is_complete() || !self.is_permission_granted.is_complete() {
            return false;
        }

        !self.is_ready()
            || (self.today_records.is_complete()
                && self.activities.is_complete()
                && self.heat_map.is_complete())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEvent {
    OnDateSelected(NaiveDate),
}
