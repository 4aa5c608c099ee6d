use axum::{body::Bytes, extract::State, http::HeaderMap, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{DocumentPath, TriggerPayload};
use crate::security::trigger_authorized;
use crate::state::AppState;

/// Response returned to the triggering platform after a successful send
#[derive(Debug, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation_id: Option<String>,
}

/// Trigger routes
pub fn trigger_routes() -> Router<AppState> {
    Router::new().route("/invitations", post(invitation_created))
}

/// Event id from the CloudEvents binding header, or a fresh one
fn event_id(headers: &HeaderMap) -> String {
    headers
        .get("ce-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// POST /api/v1/triggers/invitations - "document created" on invitations/{invitationId}
async fn invitation_created(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<TriggerResponse>> {
    if !trigger_authorized(&headers, state.config.trigger_token.as_deref()) {
        return Err(AppError::Unauthorized("Invalid trigger token".to_string()));
    }

    let (name, record) = TriggerPayload::from_slice(&body)?.into_parts();

    // A resource name, when present, must be a top-level invitations document
    let invitation_id = match name.as_deref() {
        None => None,
        Some(name) => Some(DocumentPath::invitation_id(name).ok_or_else(|| {
            AppError::BadRequest(format!("Not an invitations document: {}", name))
        })?),
    };

    let span = tracing::info_span!(
        "invitation_created",
        event_id = %event_id(&headers),
        invitation_id = invitation_id.as_deref().unwrap_or("-"),
    );

    state.notifier.notify(&record).instrument(span).await?;

    Ok(Json(TriggerResponse {
        status: "sent".to_string(),
        invitation_id,
    }))
}
