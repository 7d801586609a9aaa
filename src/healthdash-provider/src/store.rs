use std::iter::Sum;

use chrono::{DateTime, Utc};
use healthdash_algos::helpers::time_window::TimeWindow;
use healthdash_types::activities::ExerciseSession;
use serde::{Deserialize, Serialize};

use crate::DailyAggregate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample<T> {
    pub time: DateTime<Utc>,
    pub value: T,
}

impl<T> Sample<T> {
    pub fn new(time: DateTime<Utc>, value: T) -> Self {
        Self { time, value }
    }
}

/// Raw samples and sessions, the data a platform health store would hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStore {
    #[serde(default)]
    pub steps: Vec<Sample<u64>>,
    #[serde(default)]
    pub distance: Vec<Sample<f64>>,
    #[serde(default)]
    pub calories: Vec<Sample<f64>>,
    #[serde(default)]
    pub heart_rate: Vec<Sample<u32>>,
    #[serde(default)]
    pub sessions: Vec<ExerciseSession>,
}

impl HealthStore {
    pub fn aggregate(&self, window: &TimeWindow) -> DailyAggregate {
        DailyAggregate {
            steps: total(&self.steps, window),
            calories: total(&self.calories, window),
            distance_meters: total(&self.distance, window),
            max_heart_rate: in_window(&self.heart_rate, window).max(),
        }
    }

    /// Sessions overlapping `window`, newest first.
    pub fn sessions(&self, window: &TimeWindow) -> Vec<ExerciseSession> {
        let mut sessions = self
            .sessions
            .iter()
            .filter(|s| s.overlaps(window.start, window.end))
            .copied()
            .collect::<Vec<_>>();
        sessions.sort_by(|a, b| b.start.cmp(&a.start));
        sessions
    }
}

fn in_window<'a, T: Copy>(
    samples: &'a [Sample<T>],
    window: &'a TimeWindow,
) -> impl Iterator<Item = T> + 'a {
    samples
        .iter()
        .filter(|sample| window.contains(sample.time))
        .map(|sample| sample.value)
}

fn total<T: Copy + Sum<T>>(samples: &[Sample<T>], window: &TimeWindow) -> Option<T> {
    let mut values = in_window(samples, window).peekable();
    values.peek()?;
    Some(values.sum())
}
