use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{ActivityItem, ProviderError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarFeed {
    pub events: Vec<CalendarEvent>,
    pub connected: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEvent {
    pub success: bool,
    pub event_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarStats {
    pub today_events: u32,
    pub upcoming_meetings: u32,
    pub recent_events: Vec<ActivityItem>,
}

/// Calendar capability seam. The mock below is the only implementation for
/// now; a real Google Calendar client slots in behind the same trait without
/// touching any caller.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    async fn events(&self) -> Result<CalendarFeed, ProviderError>;
    async fn create_event(&self, draft: EventDraft) -> Result<CreatedEvent, ProviderError>;
    async fn stats(&self) -> Result<CalendarStats, ProviderError>;
}

/// Fixture-backed stand-in. Timestamps are shifted relative to the call so
/// the feed always looks current.
#[derive(Default)]
pub struct MockCalendarProvider;

#[async_trait]
impl CalendarProvider for MockCalendarProvider {
    async fn events(&self) -> Result<CalendarFeed, ProviderError> {
        let now = Utc::now();
        Ok(CalendarFeed {
            events: vec![
                CalendarEvent {
                    id: "1".into(),
                    title: "Team Standup".into(),
                    start: now,
                    end: now + Duration::minutes(30),
                    location: "Conference Room A".into(),
                },
                CalendarEvent {
                    id: "2".into(),
                    title: "Project Review".into(),
                    start: now + Duration::hours(2),
                    end: now + Duration::hours(3),
                    location: "Online".into(),
                },
            ],
            connected: false,
            timestamp: now,
        })
    }

    async fn create_event(&self, draft: EventDraft) -> Result<CreatedEvent, ProviderError> {
        tracing::info!(title = %draft.title, "creating calendar event");
        Ok(CreatedEvent {
            success: true,
            event_id: Utc::now().timestamp_millis().to_string(),
            message: "Event created successfully".into(),
        })
    }

    async fn stats(&self) -> Result<CalendarStats, ProviderError> {
        let now = Utc::now();
        Ok(CalendarStats {
            today_events: 3,
            upcoming_meetings: 7,
            recent_events: vec![
                ActivityItem {
                    kind: "calendar".into(),
                    title: "Team Meeting Completed".into(),
                    description: "30 min meeting with development team".into(),
                    timestamp: now,
                    source: "Google Calendar".into(),
                },
                ActivityItem {
                    kind: "calendar".into(),
                    title: "Calendar Event Created".into(),
                    description: "Project review scheduled for tomorrow".into(),
                    timestamp: now - Duration::minutes(10),
                    source: "Google Calendar".into(),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_feed_reports_disconnected_fixtures() {
        let feed = MockCalendarProvider.events().await.unwrap();
        assert_eq!(feed.events.len(), 2);
        assert!(!feed.connected);
        assert_eq!(feed.events[0].title, "Team Standup");
        assert!(feed.events[1].start > feed.events[0].start);
    }

    #[tokio::test]
    async fn created_event_acknowledges_draft() {
        let draft = EventDraft {
            title: "Planning".into(),
            start: None,
            end: None,
            location: None,
            description: None,
        };
        let created = MockCalendarProvider.create_event(draft).await.unwrap();
        assert!(created.success);
        assert_eq!(created.message, "Event created successfully");
    }

    #[tokio::test]
    async fn stats_serialize_with_camel_case_fields() {
        let stats = MockCalendarProvider.stats().await.unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["todayEvents"], 3);
        assert_eq!(json["upcomingMeetings"], 7);
        assert_eq!(json["recentEvents"][0]["type"], "calendar");
        assert_eq!(json["recentEvents"][0]["source"], "Google Calendar");
    }
}
