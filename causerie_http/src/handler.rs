//! Request handlers.

use axum::Json;
use axum::extract::State;
use causerie_conversation::RawTurnRequest;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::routes::AppState;

/// Successful turn payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReply {
    pub response: String,
    pub conversation_id: String,
}

/// POST /generate — run one conversational turn.
pub async fn generate(
    State(state): State<AppState>,
    Json(raw): Json<RawTurnRequest>,
) -> Result<Json<GenerateReply>, ApiError> {
    let outcome = state.manager.process_turn(&raw).await?;
    info!("Turn completed for conversation {}", outcome.conversation_id);

    Ok(Json(GenerateReply {
        response: outcome.response,
        conversation_id: outcome.conversation_id,
    }))
}

/// GET /health — liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
