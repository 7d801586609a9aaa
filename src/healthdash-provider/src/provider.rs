use async_trait::async_trait;
use healthdash_algos::helpers::time_window::{DateWindow, TimeWindow};
use healthdash_types::{
    activities::{ActivityRecord, ExerciseSession},
    records::Record,
};

use crate::{DailyAggregate, ProviderError};

/// Read access to a platform health store.
///
/// Implementors supply the raw calls (client status, permission check,
/// aggregate query, session read). The dashboard-level operations are
/// provided on top of them so every backend reports stats the same way:
/// four records in a fixed order, zero for metrics without data, and an
/// empty list when the aggregate query itself fails.
#[async_trait]
pub trait HealthProvider: Send + Sync {
    /// `Err(Unavailable)` or `Err(UpdateRequired)` when the client cannot be
    /// acquired.
    fn client_availability(&self) -> Result<(), ProviderError>;

    async fn is_permission_granted(&self) -> bool;

    async fn aggregate(&self, window: TimeWindow) -> Result<DailyAggregate, ProviderError>;

    /// Sessions overlapping `window`, newest first.
    async fn exercise_sessions(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<ExerciseSession>, ProviderError>;

    fn is_client_available(&self) -> bool {
        self.client_availability().is_ok()
    }

    async fn get_stats_for_day(&self, window: TimeWindow) -> Vec<Record> {
        match self.aggregate(window).await {
            Ok(aggregate) => aggregate.into_records(),
            Err(error) => {
                warn!(
                    "Aggregate query {} - {} failed: {}",
                    window.start, window.end, error
                );
                Vec::new()
            }
        }
    }

    /// One activity per session, each with stats aggregated over the
    /// session's own start and end.
    async fn get_recent_activities(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<ActivityRecord>, ProviderError> {
        let sessions = self.exercise_sessions(window).await?;
        debug!("Read {} sessions from {} to {}", sessions.len(), window.start, window.end);

        let mut activities = Vec::with_capacity(sessions.len());
        for session in sessions {
            let records = self
                .get_stats_for_day(TimeWindow::new(session.start, session.end))
                .await;
            activities.push(ActivityRecord::from_session(&session, records));
        }

        Ok(activities)
    }

    async fn get_heat_map_source_activities(
        &self,
        window: DateWindow,
    ) -> Result<Vec<ActivityRecord>, ProviderError> {
        self.get_recent_activities(window.time_window()).await
    }
}

/// Asks the platform for read permissions. The outcome is observed later
/// through [`HealthProvider::is_permission_granted`].
pub trait PermissionRequester: Send + Sync {
    fn request_permission(&self);
}
