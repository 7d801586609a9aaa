use serde::{Deserialize, Serialize};

/// The closed set of metrics a day (or a session) is summarised by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Steps,
    CaloriesBurned,
    DistanceCovered,
    PeakHeartRate,
}

impl MetricKind {
    /// Order in which a provider reports the daily stats.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Steps,
        MetricKind::CaloriesBurned,
        MetricKind::DistanceCovered,
        MetricKind::PeakHeartRate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Steps => "Steps",
            MetricKind::CaloriesBurned => "Calories",
            MetricKind::DistanceCovered => "Distance",
            MetricKind::PeakHeartRate => "Peak heart rate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub value: f64,
    pub kind: MetricKind,
    pub pretty_value: String,
    pub unit: String,
}

impl Record {
    pub fn new(name: impl Into<String>, value: f64, kind: MetricKind) -> Self {
        let name = name.into();
        Self {
            pretty_value: name.clone(),
            name,
            value,
            kind,
            unit: String::new(),
        }
    }

    pub fn from_kind(kind: MetricKind, value: f64) -> Self {
        Self::new(kind.label(), value, kind)
    }

    pub fn with_display(self, pretty_value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            pretty_value: pretty_value.into(),
            unit: unit.into(),
            ..self
        }
    }
}
