use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use healthdash_algos::helpers::time_window::TimeWindow;
use healthdash_types::activities::ExerciseSession;
use serde::Deserialize;

use crate::{DailyAggregate, HealthProvider, HealthStore, ProviderError};

fn yes() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct HealthExport {
    #[serde(default = "yes")]
    available: bool,
    #[serde(default)]
    update_required: bool,
    #[serde(default = "yes")]
    permissions_granted: bool,
    #[serde(flatten)]
    store: HealthStore,
}

/// Reads a JSON health export. The parsed store is the client handle and is
/// built once, when the provider is created.
#[derive(Debug)]
pub struct ExportProvider {
    client: Result<HealthStore, ProviderError>,
    permissions_granted: bool,
}

impl ExportProvider {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Unable to read health export `{}`", path.display()))?;
        let provider = Self::from_json(&json)
            .with_context(|| format!("Invalid health export `{}`", path.display()))?;
        info!("Loaded health export from {}", path.display());
        Ok(provider)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let export: HealthExport = serde_json::from_str(json)?;

        let client = if !export.available {
            Err(ProviderError::Unavailable)
        } else if export.update_required {
            Err(ProviderError::UpdateRequired)
        } else {
            Ok(export.store)
        };

        Ok(Self {
            client,
            permissions_granted: export.permissions_granted,
        })
    }

    fn client(&self) -> Result<&HealthStore, ProviderError> {
        self.client.as_ref().map_err(Clone::clone)
    }

    fn readable_client(&self) -> Result<&HealthStore, ProviderError> {
        let client = self.client()?;
        if !self.permissions_granted {
            return Err(ProviderError::PermissionDenied);
        }
        Ok(client)
    }
}

#[async_trait]
impl HealthProvider for ExportProvider {
    fn client_availability(&self) -> Result<(), ProviderError> {
        self.client().map(|_| ())
    }

    async fn is_permission_granted(&self) -> bool {
        self.client().is_ok() && self.permissions_granted
    }

    async fn aggregate(&self, window: TimeWindow) -> Result<DailyAggregate, ProviderError> {
        Ok(self.readable_client()?.aggregate(&window))
    }

    async fn exercise_sessions(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<ExerciseSession>, ProviderError> {
        Ok(self.readable_client()?.sessions(&window))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const EXPORT: &str = r#"{
        "steps": [
            {"time": "2024-03-10T08:00:00Z", "value": 5000}
        ],
        "calories": [
            {"time": "2024-03-10T08:00:00Z", "value": 250000.0}
        ],
        "distance": [
            {"time": "2024-03-10T08:00:00Z", "value": 3000.0}
        ],
        "heart_rate": [
            {"time": "2024-03-10T08:00:00Z", "value": 150}
        ],
        "sessions": [
            {"exercise_type": 56, "start": "2024-03-10T07:30:00Z", "end": "2024-03-10T08:30:00Z"}
        ]
    }"#;

    fn day() -> TimeWindow {
        TimeWindow::day(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
    }

    #[tokio::test]
    async fn reads_export() {
        let provider = ExportProvider::from_json(EXPORT).unwrap();
        assert!(provider.is_client_available());
        assert!(provider.is_permission_granted().await);

        let values = provider
            .get_stats_for_day(day())
            .await
            .iter()
            .map(|r| r.value)
            .collect::<Vec<_>>();
        assert_eq!(values, vec![5000.0, 250_000.0, 3000.0, 150.0]);

        let activities = provider.get_recent_activities(day()).await.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].activity_type, "Running");
    }

    #[tokio::test]
    async fn missing_lists_default_to_empty() {
        let provider = ExportProvider::from_json("{}").unwrap();
        assert!(provider.is_client_available());
        assert!(provider.get_recent_activities(day()).await.unwrap().is_empty());
        assert!(provider.get_stats_for_day(day()).await.iter().all(|r| r.value == 0.0));
    }

    #[test]
    fn keeps_client_error_kind() {
        let unavailable = ExportProvider::from_json(r#"{"available": false}"#).unwrap();
        assert_eq!(unavailable.client_availability(), Err(ProviderError::Unavailable));

        let outdated = ExportProvider::from_json(r#"{"update_required": true}"#).unwrap();
        assert_eq!(outdated.client_availability(), Err(ProviderError::UpdateRequired));
    }

    #[tokio::test]
    async fn permission_denied_blocks_reads() {
        let provider = ExportProvider::from_json(r#"{"permissions_granted": false}"#).unwrap();
        assert!(provider.is_client_available());
        assert!(!provider.is_permission_granted().await);
        assert_eq!(
            provider.exercise_sessions(day()).await.unwrap_err(),
            ProviderError::PermissionDenied
        );
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(ExportProvider::from_json("{\"steps\": 4}").is_err());
        assert!(ExportProvider::open("/nonexistent/export.json").is_err());
    }
}
