//! Request/response bodies for the JSON API.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Response` → serialized to client JSON
//! - Field names follow the web client (camelCase)

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::daily_log::DailyLogRecord;

/// Acknowledgement used by the health probe and the stub endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// POST /api/daily-log
#[derive(Debug, Serialize)]
pub struct DailyLogResponse {
    pub message: String,
    pub data: DailyLogRecord,
}

/// POST /api/mood-tracker
#[derive(Debug, Deserialize, Validate)]
pub struct MoodRequest {
    #[validate(length(min = 1, max = 500, message = "Mood must be 1-500 characters"))]
    pub mood: String,
}

/// POST /api/voice-assistant
#[derive(Debug, Deserialize, Validate)]
pub struct VoiceCommandRequest {
    #[validate(length(min = 1, max = 500, message = "Command must be 1-500 characters"))]
    pub command: String,
}
