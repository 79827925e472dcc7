use serde::Serialize;

use crate::providers::{ActivityItem, CalendarProvider, TimeTrackingProvider};

const RECENT_ACTIVITY_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub today_events: u32,
    pub active_timers: u32,
    pub week_hours: f64,
    pub upcoming_meetings: u32,
    pub recent_activity: Vec<ActivityItem>,
}

/// Combines both integrations' stats. Either provider failing degrades its
/// half of the numbers to zero instead of failing the dashboard; the recent
/// feeds are merged newest-first and capped.
pub async fn collect_stats(
    calendar: &dyn CalendarProvider,
    time_tracking: &dyn TimeTrackingProvider,
) -> DashboardStats {
    let calendar_stats = match calendar.stats().await {
        Ok(stats) => Some(stats),
        Err(err) => {
            tracing::warn!("calendar stats unavailable: {err}");
            None
        }
    };
    let time_stats = match time_tracking.stats().await {
        Ok(stats) => Some(stats),
        Err(err) => {
            tracing::warn!("time tracking stats unavailable: {err}");
            None
        }
    };

    let mut recent_activity: Vec<ActivityItem> = calendar_stats
        .iter()
        .flat_map(|stats| stats.recent_events.iter().cloned())
        .chain(
            time_stats
                .iter()
                .flat_map(|stats| stats.recent_entries.iter().cloned()),
        )
        .collect();
    recent_activity.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    recent_activity.truncate(RECENT_ACTIVITY_LIMIT);

    DashboardStats {
        today_events: calendar_stats
            .as_ref()
            .map_or(0, |stats| stats.today_events),
        upcoming_meetings: calendar_stats
            .as_ref()
            .map_or(0, |stats| stats.upcoming_meetings),
        active_timers: time_stats.as_ref().map_or(0, |stats| stats.active_timers),
        week_hours: time_stats.as_ref().map_or(0.0, |stats| stats.week_hours),
        recent_activity,
    }
}
