use std::{
    future::Future,
    sync::{
        Arc, Mutex, MutexGuard,
        atomic::{AtomicU64, Ordering},
    },
};

use chrono::NaiveDate;
use healthdash_algos::{
    build_heat_map,
    helpers::time_window::{DateWindow, TimeWindow},
    to_compact_record, to_ui_model,
};
use healthdash_provider::{HealthProvider, PermissionRequester};
use healthdash_types::AsyncValue;
use tokio::{sync::watch, task::JoinSet};

use crate::{Clock, HomeConfig, HomeEvent, HomeState};

/// State holder behind the home screen.
///
/// On creation it checks the provider and, when read permission is granted,
/// loads the selected day's stats, the activity list and the heat map. Each
/// change is published as a new [`HomeState`] snapshot on a watch channel.
///
/// Every fetch runs as its own tokio task, bound to the date that was selected
/// when it was started. Tasks are aborted by [`HomeViewModel::close`] or when
/// the view model is dropped. Must be created inside a tokio runtime.
pub struct HomeViewModel {
    shared: Arc<Shared>,
    permission_requester: Option<Arc<dyn PermissionRequester>>,
}

struct Shared {
    provider: Arc<dyn HealthProvider>,
    clock: Arc<dyn Clock>,
    config: HomeConfig,
    state: watch::Sender<HomeState>,
    /// Bumped on every date change, under the state lock.
    generation: AtomicU64,
    tasks: Mutex<JoinSet<()>>,
}

/// The date and generation a batch of fetches was started for.
#[derive(Debug, Clone, Copy)]
struct Request {
    date: NaiveDate,
    generation: u64,
}

impl HomeViewModel {
    pub fn new(
        initial: HomeState,
        provider: Arc<dyn HealthProvider>,
        clock: Arc<dyn Clock>,
        config: HomeConfig,
    ) -> Self {
        let view_model = Self {
            shared: Shared::new(initial, provider, clock, config),
            permission_requester: None,
        };

        view_model.check_permission();
        view_model
    }

    pub fn with_permission_requester(mut self, requester: Arc<dyn PermissionRequester>) -> Self {
        self.permission_requester = Some(requester);
        self
    }

    pub fn state(&self) -> HomeState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.shared.state.subscribe()
    }

    /// Re-checks availability and permission, loading everything if allowed.
    pub fn check_permission(&self) {
        let shared = self.shared.clone();
        self.shared.spawn(async move { shared.initialize().await });
    }

    /// Hands off to the platform permission flow. Call
    /// [`HomeViewModel::check_permission`] once the user has answered.
    pub fn request_permission(&self) {
        match &self.permission_requester {
            Some(requester) => requester.request_permission(),
            None => warn!("No permission requester configured"),
        }
    }

    pub fn on_event(&self, event: HomeEvent) {
        match event {
            HomeEvent::OnDateSelected(date) => self.set_selected_date(date),
        }
    }

    /// Aborts every fetch still in flight.
    pub fn close(&self) {
        self.shared.lock_tasks().abort_all();
    }

    fn set_selected_date(&self, date: NaiveDate) {
        let mut generation = None;
        self.shared.state.send_if_modified(|state| {
            if state.selected_date == date {
                return false;
            }
            generation = Some(self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1);
            state.selected_date = date;
            true
        });

        let Some(generation) = generation else {
            debug!("{} is already selected", date);
            return;
        };

        info!("Selected {}", date);
        self.shared.refresh(Request { date, generation });
    }
}

impl Drop for HomeViewModel {
    fn drop(&mut self) {
        self.close();
    }
}

impl Shared {
    fn new(
        initial: HomeState,
        provider: Arc<dyn HealthProvider>,
        clock: Arc<dyn Clock>,
        config: HomeConfig,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(initial);
        Arc::new(Self {
            provider,
            clock,
            config,
            state,
            generation: AtomicU64::new(0),
            tasks: Mutex::new(JoinSet::new()),
        })
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.lock_tasks();
        while let Some(finished) = tasks.try_join_next() {
            if let Err(error) = finished {
                if error.is_panic() {
                    error!("Dashboard task panicked: {}", error);
                }
            }
        }
        tasks.spawn(task);
    }

    fn lock_tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        match self.tasks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn set_state<F>(&self, reducer: F)
    where
        F: FnOnce(&HomeState) -> HomeState,
    {
        self.state.send_modify(|state| *state = reducer(state));
    }

    fn is_stale(&self, request: Request) -> bool {
        self.config.discard_stale_results
            && request.generation != self.generation.load(Ordering::SeqCst)
    }

    /// Applies `reducer` unless stale results are discarded and the request
    /// has been superseded. The check runs under the state lock, so it cannot
    /// interleave with a date change.
    fn publish<F>(&self, request: Request, what: &str, reducer: F)
    where
        F: FnOnce(&HomeState) -> HomeState,
    {
        self.state.send_if_modified(|state| {
            if self.is_stale(request) {
                debug!(
                    "Dropping {} for {} from generation {}",
                    what, request.date, request.generation
                );
                return false;
            }
            *state = reducer(state);
            true
        });
    }

    async fn initialize(self: Arc<Self>) {
        if let Err(error) = self.provider.client_availability() {
            warn!("Health provider unavailable: {}", error);
            self.set_state(|state| HomeState {
                is_provider_available: AsyncValue::Success(false),
                is_permission_granted: AsyncValue::Success(false),
                provider_error: Some(error),
                ..state.clone()
            });
            return;
        }

        let granted = self.provider.is_permission_granted().await;
        let mut request = None;
        self.state.send_modify(|state| {
            request = Some(Request {
                date: state.selected_date,
                generation: self.generation.load(Ordering::SeqCst),
            });
            *state = HomeState {
                is_provider_available: AsyncValue::Success(true),
                is_permission_granted: AsyncValue::Success(granted),
                provider_error: None,
                ..state.clone()
            };
        });

        match request {
            Some(request) if granted => self.refresh(request),
            _ => info!("Health read permission not granted"),
        }
    }

    /// Starts the three fetches for `request`, each as its own task.
    fn refresh(self: &Arc<Self>, request: Request) {
        let shared = self.clone();
        self.spawn(async move { shared.fetch_today_stats(request).await });
        let shared = self.clone();
        self.spawn(async move { shared.fetch_activities(request).await });
        let shared = self.clone();
        self.spawn(async move { shared.fetch_heat_map(request).await });
    }

    async fn fetch_today_stats(&self, request: Request) {
        if self.is_stale(request) {
            return;
        }
        self.publish(request, "today's stats", |state| HomeState {
            today_records: AsyncValue::Loading,
            ..state.clone()
        });

        let records = self
            .provider
            .get_stats_for_day(TimeWindow::day(request.date))
            .await;
        let models = records.iter().map(to_ui_model).collect::<Vec<_>>();
        debug!("Loaded {} stats for {}", models.len(), request.date);

        self.publish(request, "today's stats", |state| HomeState {
            today_records: AsyncValue::Success(models),
            ..state.clone()
        });
    }

    async fn fetch_activities(&self, request: Request) {
        if self.is_stale(request) {
            return;
        }
        self.publish(request, "activities", |state| HomeState {
            activities: AsyncValue::Loading,
            ..state.clone()
        });

        let window = TimeWindow::lookback(request.date, self.config.activity_lookback_months);
        let activities = self
            .provider
            .get_recent_activities(window)
            .await
            .map(|activities| {
                activities
                    .into_iter()
                    .map(|activity| activity.map_records(to_compact_record))
                    .collect::<Vec<_>>()
            });

        match &activities {
            Ok(activities) => {
                debug!("Loaded {} activities up to {}", activities.len(), request.date)
            }
            Err(error) => error!("Unable to load activities: {}", error),
        }

        self.publish(request, "activities", |state| HomeState {
            activities: activities.into(),
            ..state.clone()
        });
    }

    async fn fetch_heat_map(&self, request: Request) {
        if self.is_stale(request) {
            return;
        }
        self.publish(request, "heat map", |state| HomeState {
            heat_map: AsyncValue::Loading,
            ..state.clone()
        });

        let window = DateWindow::trailing_weeks(self.clock.today(), self.config.heat_map_weeks);
        let heat_map = self
            .provider
            .get_heat_map_source_activities(window)
            .await
            .map(|activities| build_heat_map(&window, &activities));

        if let Err(error) = &heat_map {
            error!("Unable to load heat map: {}", error);
        }

        self.publish(request, "heat map", |state| HomeState {
            heat_map: heat_map.into(),
            ..state.clone()
        });
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use healthdash_provider::{HealthStore, InMemoryProvider, Sample};

    use super::*;
    use crate::FixedClock;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn shared(config: HomeConfig) -> Arc<Shared> {
        let store = HealthStore {
            steps: vec![
                Sample::new(Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap(), 800),
                Sample::new(Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(), 900),
            ],
            ..HealthStore::default()
        };
        Shared::new(
            HomeState::new(date(9)),
            Arc::new(InMemoryProvider::new(store)),
            Arc::new(FixedClock(date(10))),
            config,
        )
    }

    fn steps(shared: &Shared) -> Option<String> {
        let state = shared.state.borrow();
        state
            .today_records
            .value()
            .and_then(|records| records.first())
            .map(|card| card.value.clone())
    }

    #[tokio::test]
    async fn superseded_fetch_started_late_keeps_newer_result() {
        let shared = shared(HomeConfig {
            discard_stale_results: true,
            ..HomeConfig::default()
        });
        shared.generation.store(2, Ordering::SeqCst);

        let fresh = Request { date: date(9), generation: 2 };
        let stale = Request { date: date(8), generation: 1 };
        shared.fetch_today_stats(fresh).await;
        shared.fetch_today_stats(stale).await;

        assert_eq!(steps(&shared).as_deref(), Some("900"));
    }

    #[tokio::test]
    async fn superseded_fetch_overwrites_when_kept() {
        let shared = shared(HomeConfig::default());
        shared.generation.store(2, Ordering::SeqCst);

        shared.fetch_today_stats(Request { date: date(9), generation: 2 }).await;
        shared.fetch_today_stats(Request { date: date(8), generation: 1 }).await;

        assert_eq!(steps(&shared).as_deref(), Some("800"));
    }
}
