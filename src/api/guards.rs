use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;

use crate::api::errors::ApiError;
use crate::core::{redis::ai_rate_limit_key, reference::Role, state::AppState};

/// Identity is asserted by the fronting proxy.
pub(crate) const USER_EMAIL_HEADER: &str = "x-user-email";

#[derive(Debug, Clone)]
pub(crate) struct Viewer {
    pub(crate) email: String,
    pub(crate) role: Role,
}

pub(crate) struct CurrentViewer(pub(crate) Viewer);
pub(crate) struct CurrentTeacher(pub(crate) Viewer);
pub(crate) struct CurrentAdmin(pub(crate) Viewer);

#[async_trait]
impl FromRequestParts<AppState> for CurrentViewer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty())
            .ok_or(ApiError::Unauthorized("Missing user identity"))?;

        let role = app_state.reference().role_for_email(&email);
        Ok(CurrentViewer(Viewer { email, role }))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentTeacher {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentViewer(viewer) = CurrentViewer::from_request_parts(parts, state).await?;

        if viewer.role.can_teach() {
            Ok(CurrentTeacher(viewer))
        } else {
            Err(ApiError::Forbidden("Teacher access required"))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentViewer(viewer) = CurrentViewer::from_request_parts(parts, state).await?;

        if viewer.role == Role::Admin {
            Ok(CurrentAdmin(viewer))
        } else {
            Err(ApiError::Forbidden("Admin access required"))
        }
    }
}

/// Per-caller fixed window on AI endpoints. Redis errors let the call through.
pub(crate) async fn enforce_ai_rate_limit(state: &AppState, viewer: &Viewer) -> Result<(), ApiError> {
    let limits = state.settings().rate_limit();
    let key = ai_rate_limit_key(&viewer.email);

    let allowed = match state
        .redis()
        .rate_limit(&key, limits.ai_requests_per_window, limits.ai_window_seconds)
        .await
    {
        Ok(allowed) => allowed,
        Err(error) => {
            tracing::error!(error = %error, rate_limit_key = %key, "Failed to check AI rate limit");
            true
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(ApiError::TooManyRequests("AI request limit reached, try again shortly"))
    }
}
