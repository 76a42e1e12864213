// Application state for HTTP handlers
use crate::application::diagnostics::DiagnosticsService;
use crate::application::farm_service::FarmService;
use crate::application::session::{AccessPolicy, Session};
use crate::application::view_model::EnvironmentalViewModel;
use crate::infrastructure::notification_feed::NotificationFeed;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub view_model: Arc<EnvironmentalViewModel>,
    pub farm_service: FarmService,
    pub diagnostics: DiagnosticsService,
    pub notifications: NotificationFeed,
    pub session: Arc<Session>,
    pub access: AccessPolicy,
}
