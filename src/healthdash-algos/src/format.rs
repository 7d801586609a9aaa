use healthdash_types::{
    records::{MetricKind, Record},
    ui::{Color, Icon, RecordUiModel},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Round,
    Truncate,
}

/// How a raw metric is scaled, rounded and labelled for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayPolicy {
    pub divisor: f64,
    pub precision: usize,
    pub unit: &'static str,
    /// Rounding used for the compact value shown in the activity list.
    pub compact_rounding: Rounding,
    pub icon: Icon,
}

pub fn display_policy(kind: MetricKind) -> DisplayPolicy {
    match kind {
        MetricKind::Steps => DisplayPolicy {
            divisor: 1.0,
            precision: 0,
            unit: "",
            compact_rounding: Rounding::Round,
            icon: Icon::Walk,
        },
        MetricKind::CaloriesBurned => DisplayPolicy {
            divisor: 1000.0,
            precision: 0,
            unit: "kcal",
            compact_rounding: Rounding::Round,
            icon: Icon::FireDepartment,
        },
        MetricKind::DistanceCovered => DisplayPolicy {
            divisor: 1000.0,
            precision: 3,
            unit: "km",
            compact_rounding: Rounding::Round,
            icon: Icon::Map,
        },
        MetricKind::PeakHeartRate => DisplayPolicy {
            divisor: 1.0,
            precision: 0,
            unit: "bpm",
            compact_rounding: Rounding::Truncate,
            icon: Icon::Chart,
        },
    }
}

impl DisplayPolicy {
    /// Scaled value with exactly `precision` decimals. Ties round away from zero.
    pub fn format_value(&self, raw: f64, rounding: Rounding) -> String {
        let factor = 10_f64.powi(self.precision as i32);
        let scaled = raw / self.divisor * factor;
        let rounded = match rounding {
            Rounding::Round => scaled.round(),
            Rounding::Truncate => scaled.trunc(),
        };
        // + 0.0 turns -0.0 into 0.0
        let value = rounded / factor + 0.0;
        format!("{value:.prec$}", prec = self.precision)
    }

    fn with_unit(&self, value: String) -> String {
        if self.unit.is_empty() {
            value
        } else {
            format!("{value} {}", self.unit)
        }
    }
}

/// Stat card for the day summary: value and unit in one string.
pub fn to_ui_model(record: &Record) -> RecordUiModel {
    let policy = display_policy(record.kind);
    RecordUiModel {
        name: record.name.clone(),
        value: policy.with_unit(policy.format_value(record.value, Rounding::Round)),
        background: Color::SURFACE,
        foreground: Color::ON_SURFACE,
        icon: policy.icon,
    }
}

/// Fills `pretty_value` and `unit` for the activity list.
pub fn to_compact_record(record: Record) -> Record {
    let policy = display_policy(record.kind);
    let pretty_value = policy.format_value(record.value, policy.compact_rounding);
    record.with_display(pretty_value, policy.unit)
}
