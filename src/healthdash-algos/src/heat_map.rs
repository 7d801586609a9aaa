use std::collections::HashMap;

use chrono::NaiveDate;
use healthdash_types::{activities::ActivityRecord, heat_map::HeatMapDatum};

use crate::helpers::time_window::DateWindow;

/// One datum per day of `window`, ascending and gap free. Activities outside
/// the window are ignored.
pub fn build_heat_map(window: &DateWindow, activities: &[ActivityRecord]) -> Vec<HeatMapDatum> {
    let mut by_day: HashMap<NaiveDate, u32> = HashMap::new();
    for activity in activities {
        *by_day.entry(activity.day()).or_default() += 1;
    }

    window
        .days()
        .map(|date| HeatMapDatum::new(date, by_day.get(&date).copied().unwrap_or(0)))
        .collect()
}
