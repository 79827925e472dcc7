mod calendar;
mod time_tracking;

use thiserror::Error;

pub use calendar::{
    CalendarEvent, CalendarFeed, CalendarProvider, CalendarStats, CreatedEvent, EventDraft,
    MockCalendarProvider,
};
pub use time_tracking::{
    MockTimeTrackingProvider, StartTimerRequest, StartedTimer, StoppedTimer, TimeEntriesSnapshot,
    TimeEntry, TimeTrackingProvider, TimeTrackingStats,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider is not connected")]
    NotConnected,
    #[error("provider call failed: {0}")]
    Upstream(String),
}

/// One line in the recent-activity feeds, shared by both integrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}
