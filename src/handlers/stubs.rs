//! Placeholder endpoints for client screens that have no backing store yet.
//! They acknowledge (and, for POSTs, echo) the input without keeping it.

use axum::Json;
use validator::Validate;

use crate::dto::{MessageResponse, MoodRequest, VoiceCommandRequest};
use crate::error::{AppError, AppResult};

pub async fn dashboard() -> Json<MessageResponse> {
    Json(MessageResponse::new("Dashboard data fetched successfully!"))
}

pub async fn record_mood(Json(body): Json<MoodRequest>) -> AppResult<Json<MessageResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!(mood = %body.mood, "Mood received");
    Ok(Json(MessageResponse::new(format!(
        "Mood '{}' recorded successfully!",
        body.mood
    ))))
}

pub async fn voice_command(
    Json(body): Json<VoiceCommandRequest>,
) -> AppResult<Json<MessageResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    tracing::debug!(command = %body.command, "Voice command received");
    Ok(Json(MessageResponse::new(format!(
        "Voice command '{}' processed successfully!",
        body.command
    ))))
}

pub async fn history() -> Json<MessageResponse> {
    Json(MessageResponse::new("History data fetched successfully!"))
}

pub async fn risk_alerts() -> Json<MessageResponse> {
    Json(MessageResponse::new("Risk alerts fetched successfully!"))
}
