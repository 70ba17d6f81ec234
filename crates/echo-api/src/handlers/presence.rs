//! Admin presence read API.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use echo_core::AppError;
use echo_core::types::UserId;
use echo_realtime::presence::PresenceEntry;

use crate::dto::response::{ApiResponse, PresenceResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/admin/presence
pub async fn online_users(State(state): State<AppState>) -> Json<ApiResponse<PresenceResponse>> {
    let online_users = state.realtime.registry.online_user_ids();
    let count = online_users.len();
    Json(ApiResponse::ok(PresenceResponse {
        online_users,
        count,
    }))
}

/// Online flag for a single user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPresence {
    /// User id.
    pub user_id: UserId,
    /// Whether the user has a live connection.
    pub is_online: bool,
    /// Current registration, when online.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<PresenceEntry>,
}

/// GET /api/admin/presence/{id}
pub async fn user_presence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserPresence>>, ApiError> {
    let user_id =
        UserId::parse(&id).ok_or_else(|| AppError::validation("Identifiant utilisateur invalide"))?;
    let session = state.realtime.registry.entry(&user_id);
    Ok(Json(ApiResponse::ok(UserPresence {
        user_id,
        is_online: session.is_some(),
        session,
    })))
}
