// HTTP request handlers
use crate::application::diagnostics::ProbeReport;
use crate::application::farm_service::{FarmMap, RiskOverview};
use crate::application::view_model::ReadModel;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard read model
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<ReadModel> {
    Json(state.view_model.snapshot())
}

/// Run one refresh cycle and return the resulting read model
pub async fn refresh_dashboard(State(state): State<Arc<AppState>>) -> Json<ReadModel> {
    state.view_model.refresh().await;
    Json(state.view_model.snapshot())
}

/// Farm locations for the map
pub async fn list_farms(State(state): State<Arc<AppState>>) -> Json<FarmMap> {
    match state.farm_service.farm_map().await {
        Ok(map) => Json(map),
        Err(e) => {
            tracing::error!("Error fetching farm locations: {:#}", e);
            // Return empty map on error
            Json(FarmMap {
                farms: Vec::new(),
                overview: RiskOverview::default(),
            })
        }
    }
}

/// Server-sent stream of transient notifications
pub async fn stream_notifications(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.notifications.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(notification) => {
                    match Event::default().event("notification").json_data(&notification) {
                        Ok(event) => {
                            yield Ok(event);
                        }
                        Err(e) => {
                            tracing::warn!("Failed to encode notification: {}", e);
                        }
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Notification stream lagged, skipped {}", skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Probe the upstream API endpoint families
pub async fn probe_api(State(state): State<Arc<AppState>>) -> Json<ProbeReport> {
    Json(state.diagnostics.probe_api().await)
}
