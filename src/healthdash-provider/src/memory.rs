//! In-memory health store.
//!
//! Holds samples and sessions behind locks so tests and demos can change the
//! data, the client status and the permission state while a dashboard is
//! reading from it.

use std::sync::{
    RwLock,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use healthdash_algos::helpers::time_window::TimeWindow;
use healthdash_types::activities::ExerciseSession;

use crate::{DailyAggregate, HealthProvider, HealthStore, PermissionRequester, ProviderError};

pub struct InMemoryProvider {
    store: RwLock<HealthStore>,
    client_error: RwLock<Option<ProviderError>>,
    permission_granted: AtomicBool,
    fail_aggregates: AtomicBool,
}

impl InMemoryProvider {
    /// Available, permission granted.
    pub fn new(store: HealthStore) -> Self {
        Self {
            store: RwLock::new(store),
            client_error: RwLock::new(None),
            permission_granted: AtomicBool::new(true),
            fail_aggregates: AtomicBool::new(false),
        }
    }

    pub fn empty() -> Self {
        Self::new(HealthStore::default())
    }

    pub fn with_client_error(self, error: ProviderError) -> Self {
        self.set_client_error(Some(error));
        self
    }

    pub fn with_permission(self, granted: bool) -> Self {
        self.permission_granted.store(granted, Ordering::SeqCst);
        self
    }

    pub fn set_client_error(&self, error: Option<ProviderError>) {
        match self.client_error.write() {
            Ok(mut guard) => *guard = error,
            Err(poisoned) => *poisoned.into_inner() = error,
        }
    }

    pub fn grant_permission(&self) {
        self.permission_granted.store(true, Ordering::SeqCst);
    }

    pub fn revoke_permission(&self) {
        self.permission_granted.store(false, Ordering::SeqCst);
    }

    /// Makes every aggregate query fail until switched off again.
    pub fn fail_aggregates(&self, fail: bool) {
        self.fail_aggregates.store(fail, Ordering::SeqCst);
    }

    pub fn update_store<F>(&self, f: F) -> Result<(), ProviderError>
    where
        F: FnOnce(&mut HealthStore),
    {
        let mut store = self
            .store
            .write()
            .map_err(|e| ProviderError::Query(format!("store lock poisoned: {e}")))?;
        f(&mut store);
        Ok(())
    }

    fn readable(&self) -> Result<(), ProviderError> {
        self.client_availability()?;
        if self.permission_granted.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ProviderError::PermissionDenied)
        }
    }

    fn read_store<T, F>(&self, f: F) -> Result<T, ProviderError>
    where
        F: FnOnce(&HealthStore) -> T,
    {
        self.readable()?;
        let store = self
            .store
            .read()
            .map_err(|e| ProviderError::Query(format!("store lock poisoned: {e}")))?;
        Ok(f(&store))
    }
}

#[async_trait]
impl HealthProvider for InMemoryProvider {
    fn client_availability(&self) -> Result<(), ProviderError> {
        let error = match self.client_error.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        error.map_or(Ok(()), Err)
    }

    async fn is_permission_granted(&self) -> bool {
        self.client_availability().is_ok() && self.permission_granted.load(Ordering::SeqCst)
    }

    async fn aggregate(&self, window: TimeWindow) -> Result<DailyAggregate, ProviderError> {
        if self.fail_aggregates.load(Ordering::SeqCst) {
            return Err(ProviderError::Query("aggregate rejected".to_owned()));
        }
        self.read_store(|store| store.aggregate(&window))
    }

    async fn exercise_sessions(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<ExerciseSession>, ProviderError> {
        self.read_store(|store| store.sessions(&window))
    }
}

impl PermissionRequester for InMemoryProvider {
    fn request_permission(&self) {
        info!("Granting in-memory read permissions");
        self.grant_permission();
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeDelta, TimeZone, Utc};
    use healthdash_algos::helpers::time_window::DateWindow;
    use healthdash_types::records::MetricKind;

    use super::*;
    use crate::Sample;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn store() -> HealthStore {
        let at = |h| Utc.with_ymd_and_hms(2024, 3, 10, h, 0, 0).unwrap();
        HealthStore {
            steps: vec![Sample::new(at(8), 1200), Sample::new(at(17), 3800)],
            calories: vec![Sample::new(at(8), 250_000.0)],
            distance: vec![Sample::new(at(8), 1000.0), Sample::new(at(17), 2000.0)],
            heart_rate: vec![Sample::new(at(8), 131), Sample::new(at(17), 150)],
            sessions: vec![
                ExerciseSession {
                    exercise_type: 56,
                    start: at(7),
                    end: at(7) + TimeDelta::hours(2),
                },
                ExerciseSession {
                    exercise_type: 999,
                    start: at(17),
                    end: at(17) + TimeDelta::minutes(20),
                },
            ],
        }
    }

    #[tokio::test]
    async fn stats_for_day() {
        let provider = InMemoryProvider::new(store());
        let records = provider.get_stats_for_day(TimeWindow::day(date())).await;

        let values = records.iter().map(|r| r.value).collect::<Vec<_>>();
        assert_eq!(values, vec![5000.0, 250_000.0, 3000.0, 150.0]);
    }

    #[tokio::test]
    async fn stats_zero_filled_when_no_data() {
        let provider = InMemoryProvider::empty();
        let records = provider.get_stats_for_day(TimeWindow::day(date())).await;
        assert_eq!(
            records.iter().map(|r| r.kind).collect::<Vec<_>>(),
            MetricKind::ALL.to_vec()
        );
        assert!(records.iter().all(|r| r.value == 0.0));
    }

    #[tokio::test]
    async fn failed_aggregate_is_swallowed() {
        let provider = InMemoryProvider::new(store());
        provider.fail_aggregates(true);
        assert!(provider.get_stats_for_day(TimeWindow::day(date())).await.is_empty());
    }

    #[tokio::test]
    async fn activities_carry_session_stats() {
        let provider = InMemoryProvider::new(store());
        let activities = provider
            .get_recent_activities(TimeWindow::lookback(date(), 6))
            .await
            .unwrap();

        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].activity_type, "Exercise");
        assert_eq!(activities[1].activity_type, "Running");
        assert_eq!(activities[1].duration, TimeDelta::hours(2));
        assert!(activities.iter().all(|a| a.records.len() == 4));
        // only the 08:00 samples fall inside the running session
        assert_eq!(activities[1].records[0].value, 1200.0);
        assert_eq!(activities[1].records[3].value, 131.0);
    }

    #[tokio::test]
    async fn heat_map_source_uses_window() {
        let provider = InMemoryProvider::new(store());
        let outside = DateWindow::new(date() + TimeDelta::days(1), date() + TimeDelta::days(3));
        let inside = DateWindow::trailing_weeks(date(), 1);

        assert!(provider.get_heat_map_source_activities(outside).await.unwrap().is_empty());
        assert_eq!(provider.get_heat_map_source_activities(inside).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn client_errors_block_reads() {
        let provider =
            InMemoryProvider::new(store()).with_client_error(ProviderError::UpdateRequired);
        assert!(!provider.is_client_available());
        assert!(!provider.is_permission_granted().await);
        assert_eq!(
            provider
                .get_recent_activities(TimeWindow::day(date()))
                .await
                .unwrap_err(),
            ProviderError::UpdateRequired
        );

        provider.set_client_error(None);
        assert!(provider.is_client_available());
    }

    #[tokio::test]
    async fn permission_request_grants() {
        let provider = InMemoryProvider::new(store()).with_permission(false);
        assert!(!provider.is_permission_granted().await);
        assert_eq!(
            provider.exercise_sessions(TimeWindow::day(date())).await.unwrap_err(),
            ProviderError::PermissionDenied
        );

        provider.request_permission();
        assert!(provider.is_permission_granted().await);
    }
}
