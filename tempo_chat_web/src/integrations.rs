//! HTTP surface over the calendar and time-tracking providers. These stay
//! thin: deserialize, delegate, and collapse provider failures into the
//! static messages the front-end expects.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use assist::dashboard::{self, DashboardStats};
use assist::providers::{
    CalendarFeed, CalendarStats, CreatedEvent, EventDraft, StartTimerRequest, StartedTimer,
    StoppedTimer, TimeEntriesSnapshot, TimeTrackingStats,
};

use crate::error::ApiError;
use crate::AppState;

pub async fn calendar_events(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CalendarFeed>, ApiError> {
    state.calendar.events().await.map(Json).map_err(|err| {
        tracing::error!("calendar events failed: {err}");
        ApiError::Internal("Failed to fetch calendar events")
    })
}

pub async fn calendar_create_event(
    State(state): State<Arc<AppState>>,
    body: Option<Json<EventDraft>>,
) -> Result<Json<CreatedEvent>, ApiError> {
    let Some(Json(draft)) = body else {
        return Err(ApiError::Internal("Failed to create calendar event"));
    };
    state
        .calendar
        .create_event(draft)
        .await
        .map(Json)
        .map_err(|err| {
            tracing::error!("calendar event creation failed: {err}");
            ApiError::Internal("Failed to create calendar event")
        })
}

pub async fn calendar_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CalendarStats>, ApiError> {
    state.calendar.stats().await.map(Json).map_err(|err| {
        tracing::error!("calendar stats failed: {err}");
        ApiError::Internal("Failed to fetch calendar statistics")
    })
}

pub async fn clockify_entries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimeEntriesSnapshot>, ApiError> {
    state.time_tracking.entries().await.map(Json).map_err(|err| {
        tracing::error!("time entries failed: {err}");
        ApiError::Internal("Failed to fetch time entries")
    })
}

pub async fn clockify_start(
    State(state): State<Arc<AppState>>,
    body: Option<Json<StartTimerRequest>>,
) -> Result<Json<StartedTimer>, ApiError> {
    let Some(Json(request)) = body else {
        return Err(ApiError::Internal("Failed to start timer"));
    };
    state
        .time_tracking
        .start(request)
        .await
        .map(Json)
        .map_err(|err| {
            tracing::error!("timer start failed: {err}");
            ApiError::Internal("Failed to start timer")
        })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTimerBody {
    entry_id: String,
}

pub async fn clockify_stop(
    State(state): State<Arc<AppState>>,
    body: Option<Json<StopTimerBody>>,
) -> Result<Json<StoppedTimer>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(ApiError::Internal("Failed to stop timer"));
    };
    state
        .time_tracking
        .stop(body.entry_id)
        .await
        .map(Json)
        .map_err(|err| {
            tracing::error!("timer stop failed: {err}");
            ApiError::Internal("Failed to stop timer")
        })
}

pub async fn clockify_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimeTrackingStats>, ApiError> {
    state.time_tracking.stats().await.map(Json).map_err(|err| {
        tracing::error!("time tracking stats failed: {err}");
        ApiError::Internal("Failed to fetch Clockify statistics")
    })
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardStats> {
    Json(dashboard::collect_stats(state.calendar.as_ref(), state.time_tracking.as_ref()).await)
}
