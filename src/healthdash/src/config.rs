#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeConfig {
    /// How far back the activity list reaches from the selected date.
    pub activity_lookback_months: u32,
    /// Full weeks covered by the heat map, counted back from today.
    pub heat_map_weeks: u32,
    /// Drop fetch results that belong to a date selection made before the
    /// latest one. Off by default, so a slow fetch can still overwrite newer
    /// data.
    pub discard_stale_results: bool,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            activity_lookback_months: 6,
            heat_map_weeks: 8,
            discard_stale_results: false,
        }
    }
}
