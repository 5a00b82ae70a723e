use axum::Json;

use crate::dto::MessageResponse;

pub async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse::new("Server is healthy!"))
}
