//! Plain-text rendering of a [`HomeState`] for the terminal.

use healthdash_algos::helpers::format_hms::FormatHMS;
use healthdash_types::{
    AsyncValue, activities::ActivityRecord, heat_map::HeatMapDatum, ui::RecordUiModel,
};

use crate::{Async, HomeState};

/// Rows of the heat-map grid, one per weekday.
pub const HEAT_MAP_ROWS: usize = 7;

pub fn stat_cards(records: &[RecordUiModel]) -> String {
    records
        .iter()
        .map(|record| format!("{:<16}{:>12}\n", record.name, record.value))
        .collect()
}

pub fn activity_list(activities: &[ActivityRecord]) -> String {
    activities.iter().map(activity_line).collect()
}

fn activity_line(activity: &ActivityRecord) -> String {
    let summary = activity
        .summary_records()
        .map(|record| {
            if record.unit.is_empty() {
                record.pretty_value.clone()
            } else {
                format!("{} {}", record.pretty_value, record.unit)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    format!(
        "{}  {:<20}{:>10}  {}\n",
        activity.timestamp.format("%Y-%m-%d %H:%M"),
        activity.activity_type,
        activity.duration.format_hms(),
        summary
    )
}

fn cell(datum: &HeatMapDatum) -> char {
    match datum.intensity() {
        i if i <= 0.0 => '.',
        i if i < 0.5 => '░',
        i if i < 1.0 => '▒',
        _ => '█',
    }
}

/// Days fill the grid column by column, seven to a column.
pub fn heat_map_grid(data: &[HeatMapDatum]) -> String {
    let columns = data.chunks(HEAT_MAP_ROWS).collect::<Vec<_>>();
    let mut out = String::new();
    for row in 0..HEAT_MAP_ROWS {
        let line = columns
            .iter()
            .filter_map(|column| column.get(row))
            .map(cell)
            .collect::<String>();
        if !line.is_empty() {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn section<T>(title: &str, value: &Async<T>, render: impl FnOnce(&T) -> String) -> String {
    let body = match value {
        AsyncValue::Uninitialized => "not loaded\n".to_owned(),
        AsyncValue::Loading => "loading...\n".to_owned(),
        AsyncValue::Success(value) => render(value),
        AsyncValue::Failure(error) => format!("unavailable: {error}\n"),
    };
    format!("== {title} ==\n{body}")
}

/// The message shown instead of the dashboard, if any.
pub fn blocker(state: &HomeState) -> Option<String> {
    match (&state.is_provider_available, &state.is_permission_granted) {
        (AsyncValue::Success(false), _) => Some(match &state.provider_error {
            Some(error) => format!("Health data is unavailable: {error}"),
            None => "Health data is unavailable".to_owned(),
        }),
        (AsyncValue::Success(true), AsyncValue::Success(false)) => {
            Some("Permission to read health data has not been granted".to_owned())
        }
        (AsyncValue::Success(true), AsyncValue::Success(true)) => None,
        _ => Some("Checking health data access...".to_owned()),
    }
}

pub fn today(state: &HomeState) -> String {
    section(
        &format!("Stats for {}", state.selected_date),
        &state.today_records,
        |records| stat_cards(records),
    )
}

pub fn activities(state: &HomeState) -> String {
    section("Activities", &state.activities, |activities| {
        if activities.is_empty() {
            "no activities\n".to_owned()
        } else {
            activity_list(activities)
        }
    })
}

pub fn heat_map(state: &HomeState) -> String {
    section("Last weeks", &state.heat_map, |data| heat_map_grid(data))
}

pub fn dashboard(state: &HomeState) -> String {
    [today(state), activities(state), heat_map(state)].join("\n")
}
