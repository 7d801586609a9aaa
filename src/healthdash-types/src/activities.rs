use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr};

use crate::records::{MetricKind, Record};

/// Name shown for sessions whose exercise code is unknown.
pub const FALLBACK_ACTIVITY_NAME: &str = "Exercise";

/// Exercise codes as reported by the platform health store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, FromRepr)]
#[repr(i32)]
pub enum ExerciseType {
    #[strum(serialize = "Other workout")]
    OtherWorkout = 0,
    #[strum(serialize = "Badminton")]
    Badminton = 2,
    #[strum(serialize = "Baseball")]
    Baseball = 4,
    #[strum(serialize = "Basketball")]
    Basketball = 5,
    #[strum(serialize = "Biking")]
    Biking = 8,
    #[strum(serialize = "Stationary biking")]
    BikingStationary = 9,
    #[strum(serialize = "Boot camp")]
    BootCamp = 10,
    #[strum(serialize = "Boxing")]
    Boxing = 11,
    #[strum(serialize = "Calisthenics")]
    Calisthenics = 13,
    #[strum(serialize = "Cricket")]
    Cricket = 14,
    #[strum(serialize = "Dancing")]
    Dancing = 16,
    #[strum(serialize = "Elliptical")]
    Elliptical = 25,
    #[strum(serialize = "Exercise class")]
    ExerciseClass = 26,
    #[strum(serialize = "Fencing")]
    Fencing = 27,
    #[strum(serialize = "American football")]
    FootballAmerican = 28,
    #[strum(serialize = "Australian football")]
    FootballAustralian = 29,
    #[strum(serialize = "Frisbee")]
    FrisbeeDisc = 31,
    #[strum(serialize = "Golf")]
    Golf = 32,
    #[strum(serialize = "Guided breathing")]
    GuidedBreathing = 33,
    #[strum(serialize = "Gymnastics")]
    Gymnastics = 34,
    #[strum(serialize = "Handball")]
    Handball = 35,
    #[strum(serialize = "HIIT")]
    HighIntensityIntervalTraining = 36,
    #[strum(serialize = "Hiking")]
    Hiking = 37,
    #[strum(serialize = "Ice hockey")]
    IceHockey = 38,
    #[strum(serialize = "Ice skating")]
    IceSkating = 39,
    #[strum(serialize = "Martial arts")]
    MartialArts = 44,
    #[strum(serialize = "Paddling")]
    Paddling = 46,
    #[strum(serialize = "Paragliding")]
    Paragliding = 47,
    #[strum(serialize = "Pilates")]
    Pilates = 48,
    #[strum(serialize = "Racquetball")]
    Racquetball = 50,
    #[strum(serialize = "Rock climbing")]
    RockClimbing = 51,
    #[strum(serialize = "Roller hockey")]
    RollerHockey = 52,
    #[strum(serialize = "Rowing")]
    Rowing = 53,
    #[strum(serialize = "Rowing machine")]
    RowingMachine = 54,
    #[strum(serialize = "Rugby")]
    Rugby = 55,
    #[strum(serialize = "Running")]
    Running = 56,
    #[strum(serialize = "Treadmill running")]
    RunningTreadmill = 57,
    #[strum(serialize = "Sailing")]
    Sailing = 58,
    #[strum(serialize = "Scuba diving")]
    ScubaDiving = 59,
    #[strum(serialize = "Skating")]
    Skating = 60,
    #[strum(serialize = "Skiing")]
    Skiing = 61,
    #[strum(serialize = "Snowboarding")]
    Snowboarding = 62,
    #[strum(serialize = "Snowshoeing")]
    Snowshoeing = 63,
    #[strum(serialize = "Soccer")]
    Soccer = 64,
    #[strum(serialize = "Softball")]
    Softball = 65,
    #[strum(serialize = "Squash")]
    Squash = 66,
    #[strum(serialize = "Stair climbing")]
    StairClimbing = 68,
    #[strum(serialize = "Stair climbing machine")]
    StairClimbingMachine = 69,
    #[strum(serialize = "Strength training")]
    StrengthTraining = 70,
    #[strum(serialize = "Stretching")]
    Stretching = 71,
    #[strum(serialize = "Surfing")]
    Surfing = 72,
    #[strum(serialize = "Open water swimming")]
    SwimmingOpenWater = 73,
    #[strum(serialize = "Pool swimming")]
    SwimmingPool = 74,
    #[strum(serialize = "Table tennis")]
    TableTennis = 75,
    #[strum(serialize = "Tennis")]
    Tennis = 76,
    #[strum(serialize = "Volleyball")]
    Volleyball = 78,
    #[strum(serialize = "Walking")]
    Walking = 79,
    #[strum(serialize = "Water polo")]
    WaterPolo = 80,
    #[strum(serialize = "Weightlifting")]
    Weightlifting = 81,
    #[strum(serialize = "Wheelchair")]
    Wheelchair = 82,
    #[strum(serialize = "Yoga")]
    Yoga = 83,
}

impl ExerciseType {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn display_name(code: i32) -> String {
        Self::from_repr(code)
            .map(|exercise| exercise.to_string())
            .unwrap_or_else(|| FALLBACK_ACTIVITY_NAME.to_owned())
    }
}

/// A raw exercise session as the health store reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSession {
    pub exercise_type: i32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ExerciseSession {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn overlaps(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.start <= to && self.end >= from
    }
}

/// One exercise session together with the stats aggregated over its window.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub id: i32,
    pub activity_type: String,
    pub records: Vec<Record>,
    pub duration: TimeDelta,
    pub timestamp: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn from_session(session: &ExerciseSession, records: Vec<Record>) -> Self {
        Self {
            id: session.exercise_type,
            activity_type: ExerciseType::display_name(session.exercise_type),
            records,
            duration: session.duration(),
            timestamp: session.start,
        }
    }

    /// Calendar day (UTC) the session started on.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Records shown under an activity in the list; peak heart rate is left out.
    pub fn summary_records(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|record| record.kind != MetricKind::PeakHeartRate)
    }

    pub fn map_records<F>(self, f: F) -> Self
    where
        F: FnMut(Record) -> Record,
    {
        Self {
            records: self.records.into_iter().map(f).collect(),
            ..self
        }
    }
}
