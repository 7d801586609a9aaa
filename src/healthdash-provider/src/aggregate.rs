use healthdash_types::records::{MetricKind, Record};

/// Totals a provider computed over one window. `None` means the store had no
/// data for that metric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DailyAggregate {
    pub steps: Option<u64>,
    pub calories: Option<f64>,
    pub distance_meters: Option<f64>,
    pub max_heart_rate: Option<u32>,
}

impl DailyAggregate {
    /// Always four records, in [`MetricKind::ALL`] order, missing metrics as zero.
    pub fn into_records(self) -> Vec<Record> {
        MetricKind::ALL
            .into_iter()
            .map(|kind| Record::from_kind(kind, self.value(kind)))
            .collect()
    }

    fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Steps => self.steps.map(|v| v as f64),
            MetricKind::CaloriesBurned => self.calories,
            MetricKind::DistanceCovered => self.distance_meters,
            MetricKind::PeakHeartRate => self.max_heart_rate.map(f64::from),
        }
        .unwrap_or(0.0)
    }
}
