// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use anyhow::Context;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::application::diagnostics::DiagnosticsService;
use crate::application::environmental_repository::EnvironmentalRepository;
use crate::application::farm_service::FarmService;
use crate::application::session::{AccessPolicy, Session};
use crate::application::view_model::EnvironmentalViewModel;
use crate::infrastructure::api_repository::ApiRepository;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::mock_repository::MockRepository;
use crate::infrastructure::notification_feed::NotificationFeed;
use crate::presentation::access::require_session;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, health_check, list_farms, probe_api, refresh_dashboard, stream_notifications,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tomato_expert=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create repositories (infrastructure layer)
    let api = Arc::new(ApiRepository::new(
        config.api.base_url.clone(),
        config.api.token.clone(),
        config.api.timeout_secs.map(Duration::from_secs),
    )?);

    let repository: Arc<dyn EnvironmentalRepository> = if config.api.offline {
        tracing::info!("Offline mode: serving generated environmental data");
        Arc::new(MockRepository::new(config.mock.seed, config.mock.farm_count))
    } else {
        api.clone()
    };

    let session = Arc::new(Session::new(config.api.initial_session()));
    let notifications = NotificationFeed::new();

    // Create services (application layer)
    let view_model = Arc::new(EnvironmentalViewModel::new(
        repository.clone(),
        Arc::new(notifications.clone()),
        session.clone(),
        config.api.history_window,
    ));
    let farm_service = FarmService::new(repository);
    let diagnostics = DiagnosticsService::new(api);

    // Create application state
    let state = Arc::new(AppState {
        view_model: view_model.clone(),
        farm_service,
        diagnostics,
        notifications,
        session,
        access: AccessPolicy::new(config.access.allow_unauthenticated_for.clone()),
    });

    // First load runs in the background so the server is up immediately
    tokio::spawn({
        let view_model = view_model.clone();
        async move { view_model.mount().await }
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/farms", get(list_farms))
        .route("/notifications", get(stream_notifications))
        .route("/admin/diagnostics/api", get(probe_api))
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting tomato-expert service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal(view_model))
        .await?;

    Ok(())
}

async fn shutdown_signal(view_model: Arc<EnvironmentalViewModel>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
    view_model.unmount();
}
