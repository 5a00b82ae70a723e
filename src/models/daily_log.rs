use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// The record returned for one daily-log submission. Built per request and
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogRecord {
    pub timestamp: String,
    pub image_url: String,
    pub products_used: Vec<String>,
    pub ai_insight: Option<String>,
}

impl DailyLogRecord {
    pub fn assemble(
        timestamp: impl Into<String>,
        image_url: impl Into<String>,
        products_used: Vec<String>,
        ai_insight: Option<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            image_url: image_url.into(),
            products_used,
            ai_insight,
        }
    }
}

/// Normalizes the `productsUsed` form field into a list of product names.
///
/// The client sends a JSON-encoded array, but a single JSON scalar is accepted
/// and wrapped into a one-element list. An absent or blank field yields an
/// empty list. Anything else is a validation error.
pub fn parse_products_used(raw: Option<&str>) -> AppResult<Vec<String>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(Vec::new()),
        Some(raw) => raw,
    };

    let value: Value = serde_json::from_str(raw).map_err(|_| {
        AppError::Validation("productsUsed must be a JSON array of product names".into())
    })?;

    match value {
        Value::Array(items) => items.into_iter().map(product_name).collect(),
        scalar @ (Value::String(_) | Value::Number(_) | Value::Bool(_)) => {
            Ok(vec![product_name(scalar)?])
        }
        Value::Null | Value::Object(_) => Err(AppError::Validation(
            "productsUsed must be a JSON array of product names".into(),
        )),
    }
}

fn product_name(value: Value) -> AppResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(AppError::Validation(format!(
            "Invalid product name in productsUsed: {}",
            other
        ))),
    }
}
