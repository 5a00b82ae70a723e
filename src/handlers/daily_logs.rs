use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::{SecondsFormat, Utc};

use crate::dto::DailyLogResponse;
use crate::error::{AppError, AppResult};
use crate::models::daily_log::{parse_products_used, DailyLogRecord};
use crate::services::insight::request_insight;
use crate::AppState;

const IMAGE_FIELD: &str = "image";
const PRODUCTS_FIELD: &str = "productsUsed";

/// Image part of the form, still in memory.
#[derive(Debug)]
struct ImagePart {
    file_name: Option<String>,
    content_type: String,
    bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct DailyLogForm {
    image: Option<ImagePart>,
    products_used: Option<String>,
}

pub async fn submit_daily_log(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<DailyLogResponse>> {
    // The whole form is read and validated before anything touches disk.
    let form = read_form(multipart).await?;

    let image = form
        .image
        .ok_or_else(|| AppError::Validation("Please upload an image.".into()))?;
    let products = parse_products_used(form.products_used.as_deref())?;

    let uploaded = state
        .uploads
        .save(
            IMAGE_FIELD,
            image.file_name.as_deref(),
            &image.content_type,
            image.bytes,
        )
        .await?;

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    tracing::info!(
        path = %uploaded.stored_path.display(),
        products = ?products,
        timestamp = %timestamp,
        image_url = %uploaded.public_url,
        "Daily log received"
    );

    let insight = request_insight(
        state.insights.as_ref(),
        &uploaded.bytes,
        &uploaded.mime_type,
        &products,
    )
    .await;

    let record = DailyLogRecord::assemble(timestamp, uploaded.public_url, products, Some(insight));
    tracing::info!(record = ?record, "Daily log assembled");

    Ok(Json(DailyLogResponse {
        message: "Daily log saved successfully!".into(),
        data: record,
    }))
}

async fn read_form(mut multipart: Multipart) -> AppResult<DailyLogForm> {
    let mut form = DailyLogForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            IMAGE_FIELD => {
                let file_name = field.file_name().map(String::from);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;

                if bytes.is_empty() {
                    continue;
                }
                if form.image.is_some() {
                    return Err(AppError::Validation(
                        "Only one image may be uploaded.".into(),
                    ));
                }
                form.image = Some(ImagePart {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            PRODUCTS_FIELD => {
                form.products_used = Some(field.text().await.map_err(multipart_error)?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unexpected form field");
            }
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
    }
}
