use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderName, StatusCode},
    response::{AppendHeaders, Html},
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use assist::gateway::Completions;
use assist::prompt::{FilePromptStore, PromptStore};
use assist::providers::{
    CalendarProvider, MockCalendarProvider, MockTimeTrackingProvider, TimeTrackingProvider,
};

use crate::gateway::HttpCompletionGateway;

mod chat;
mod error;
mod gateway;
mod integrations;
mod logging;
mod settings;

mod env {
    pub const API_PORT: &str = "TEMPO_API_PORT";
    pub const COMPLETIONS_URL: &str = "TEMPO_COMPLETIONS_URL";
    pub const COMPLETIONS_API_KEY: &str = "TEMPO_COMPLETIONS_API_KEY";
    pub const MODEL: &str = "TEMPO_MODEL";
    pub const DATA_DIR: &str = "TEMPO_DATA_DIR";
}

const DEFAULT_MODEL: &str = "openrouter/claude-sonnet-4";
const PROMPT_FILE: &str = "system_prompt.txt";

pub struct AppState {
    pub completions: Arc<dyn Completions>,
    pub prompts: Arc<dyn PromptStore>,
    pub calendar: Arc<dyn CalendarProvider>,
    pub time_tracking: Arc<dyn TimeTrackingProvider>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::configure_logging();

    let app = router(configure_app_state()?);

    let port = std::env::var(env::API_PORT).ok();
    let port = port.and_then(|x| x.parse().ok()).unwrap_or(3000_u16);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .context("server terminated")?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/chat", get(chat::chat_status).post(chat::chat_completion))
        .route(
            "/api/chat",
            get(chat::chat_status).post(chat::chat_completion),
        )
        .route(
            "/api/calendar/events",
            get(integrations::calendar_events).post(integrations::calendar_create_event),
        )
        .route("/api/calendar/stats", get(integrations::calendar_stats))
        .route("/api/clockify/entries", get(integrations::clockify_entries))
        .route("/api/clockify/start", post(integrations::clockify_start))
        .route("/api/clockify/stop", post(integrations::clockify_stop))
        .route("/api/clockify/stats", get(integrations::clockify_stats))
        .route("/api/dashboard", get(integrations::dashboard))
        .route(
            "/api/prompt",
            get(settings::current_prompt)
                .put(settings::save_prompt)
                .delete(settings::reset_prompt),
        )
        .nest_service("/scripts", ServeDir::new("public/scripts"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn configure_app_state() -> anyhow::Result<Arc<AppState>> {
    let endpoint = std::env::var(env::COMPLETIONS_URL).with_context(|| {
        format!(
            "the {} environment variable must be set",
            env::COMPLETIONS_URL
        )
    })?;
    let api_key = std::env::var(env::COMPLETIONS_API_KEY).ok();
    let model = std::env::var(env::MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let data_dir = std::env::var(env::DATA_DIR).unwrap_or_else(|_| "data".to_string());

    Ok(Arc::new(AppState {
        completions: Arc::new(HttpCompletionGateway::new(endpoint, api_key, model)),
        prompts: Arc::new(FilePromptStore::new(Path::new(&data_dir).join(PROMPT_FILE))),
        calendar: Arc::new(MockCalendarProvider),
        time_tracking: Arc::new(MockTimeTrackingProvider),
    }))
}

async fn index() -> (
    StatusCode,
    AppendHeaders<Vec<(HeaderName, &'static str)>>,
    Html<String>,
) {
    match std::fs::read_to_string("public/index.html") {
        Ok(html) => (
            StatusCode::OK,
            AppendHeaders(vec![
                (header::CACHE_CONTROL, "no-cache, no-store"),
                (header::EXPIRES, "-1"),
            ]),
            Html(html),
        ),
        Err(err) => (
            StatusCode::NOT_FOUND,
            AppendHeaders(vec![]),
            Html(err.to_string()),
        ),
    }
}
