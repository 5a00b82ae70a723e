use axum::{
    extract::{Request, State},
    http::header::ORIGIN,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::AppState;

/// Rejects browser requests from origins outside the allow-list before they
/// reach any handler or the static file service. Requests without an
/// `Origin` header (curl, native clients, same-origin navigation) pass.
pub async fn enforce_allowed_origin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let origin = req
        .headers()
        .get(ORIGIN)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).trim().to_string())
        .unwrap_or_default();

    if !origin.is_empty() && !state.config.is_origin_allowed(&origin) {
        return Err(AppError::OriginNotAllowed(origin));
    }

    Ok(next.run(req).await)
}
