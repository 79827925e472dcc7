use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{ActivityItem, ProviderError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub description: String,
    pub project: String,
    /// Seconds logged so far.
    pub duration: u64,
    pub is_running: bool,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntriesSnapshot {
    pub entries: Vec<TimeEntry>,
    pub active_entry: Option<TimeEntry>,
    pub connected: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimerRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedTimer {
    pub success: bool,
    pub entry: TimeEntry,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoppedTimer {
    pub success: bool,
    pub entry_id: String,
    /// Seconds on the stopped entry.
    pub final_duration: u64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeTrackingStats {
    pub active_timers: u32,
    pub week_hours: f64,
    pub recent_entries: Vec<ActivityItem>,
}

/// Time-tracking capability seam; a real Clockify client replaces the mock
/// behind the same trait.
#[async_trait]
pub trait TimeTrackingProvider: Send + Sync {
    async fn entries(&self) -> Result<TimeEntriesSnapshot, ProviderError>;
    async fn start(&self, request: StartTimerRequest) -> Result<StartedTimer, ProviderError>;
    async fn stop(&self, entry_id: String) -> Result<StoppedTimer, ProviderError>;
    async fn stats(&self) -> Result<TimeTrackingStats, ProviderError>;
}

#[derive(Default)]
pub struct MockTimeTrackingProvider;

#[async_trait]
impl TimeTrackingProvider for MockTimeTrackingProvider {
    async fn entries(&self) -> Result<TimeEntriesSnapshot, ProviderError> {
        let now = Utc::now();
        Ok(TimeEntriesSnapshot {
            entries: vec![
                TimeEntry {
                    id: "1".into(),
                    description: "Development work".into(),
                    project: "AI Assistant".into(),
                    duration: 7200,
                    is_running: false,
                    start_time: now - Duration::hours(2),
                },
                TimeEntry {
                    id: "2".into(),
                    description: "Code review".into(),
                    project: "AI Assistant".into(),
                    duration: 1800,
                    is_running: false,
                    start_time: now - Duration::hours(3),
                },
            ],
            active_entry: None,
            connected: false,
        })
    }

    async fn start(&self, request: StartTimerRequest) -> Result<StartedTimer, ProviderError> {
        let now = Utc::now();
        let entry = TimeEntry {
            id: now.timestamp_millis().to_string(),
            description: request.description.unwrap_or_else(|| "New Task".into()),
            project: request.project.unwrap_or_else(|| "General".into()),
            duration: 0,
            is_running: true,
            start_time: now,
        };
        Ok(StartedTimer {
            success: true,
            entry,
            message: "Timer started successfully".into(),
        })
    }

    async fn stop(&self, entry_id: String) -> Result<StoppedTimer, ProviderError> {
        Ok(StoppedTimer {
            success: true,
            entry_id,
            final_duration: 3600,
            message: "Timer stopped successfully".into(),
        })
    }

    async fn stats(&self) -> Result<TimeTrackingStats, ProviderError> {
        let now = Utc::now();
        Ok(TimeTrackingStats {
            active_timers: 0,
            week_hours: 42.5,
            recent_entries: vec![
                ActivityItem {
                    kind: "time".into(),
                    title: "Timer Started".into(),
                    description: "Development work on AI Assistant project".into(),
                    timestamp: now - Duration::minutes(5),
                    source: "Clockify".into(),
                },
                ActivityItem {
                    kind: "time".into(),
                    title: "Timer Stopped".into(),
                    description: "2h 15m logged for code review".into(),
                    timestamp: now - Duration::minutes(15),
                    source: "Clockify".into(),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn snapshot_lists_finished_entries_only() {
        let snapshot = MockTimeTrackingProvider.entries().await.unwrap();
        assert_eq!(snapshot.entries.len(), 2);
        assert!(snapshot.active_entry.is_none());
        assert!(snapshot.entries.iter().all(|entry| !entry.is_running));
        assert_eq!(snapshot.entries[0].duration, 7200);
    }

    #[tokio::test]
    async fn start_defaults_description_and_project() {
        let started = MockTimeTrackingProvider
            .start(StartTimerRequest::default())
            .await
            .unwrap();
        assert!(started.success);
        assert_eq!(started.entry.description, "New Task");
        assert_eq!(started.entry.project, "General");
        assert!(started.entry.is_running);
        assert_eq!(started.entry.duration, 0);
    }

    #[tokio::test]
    async fn stop_echoes_entry_id() {
        let stopped = MockTimeTrackingProvider.stop("42".into()).await.unwrap();
        assert!(stopped.success);
        assert_eq!(stopped.entry_id, "42");
        assert_eq!(stopped.final_duration, 3600);
    }

    #[tokio::test]
    async fn stats_serialize_with_camel_case_fields() {
        let stats = MockTimeTrackingProvider.stats().await.unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["activeTimers"], 0);
        assert_eq!(json["weekHours"], 42.5);
        assert_eq!(json["recentEntries"][1]["title"], "Timer Stopped");
    }
}
