// Route access middleware
use crate::application::session::AccessDenied;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        let status = match self {
            AccessDenied::SessionLoading => StatusCode::SERVICE_UNAVAILABLE,
            AccessDenied::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Evaluate the injected access policy against the current session.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AccessDenied> {
    let session = state.session.snapshot();
    if let Err(denied) = state.access.check(request.uri().path(), &session) {
        tracing::debug!("Denied {}: {}", request.uri().path(), denied);
        return Err(denied);
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denial_status_codes() {
        assert_eq!(
            AccessDenied::SessionLoading.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AccessDenied::Unauthenticated("/dashboard".to_string())
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
