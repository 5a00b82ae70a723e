use base64::{engine::general_purpose, Engine as _};

use crate::models::insight::InsightRequest;
use crate::services::InsightProvider;

pub const NO_INSIGHT_FALLBACK: &str = "Could not generate AI insight.";
pub const INSIGHT_ERROR_FALLBACK: &str = "Error generating AI insight.";

pub fn build_prompt(products: &[String]) -> String {
    format!(
        "Analyze the user's selfie. Based on visual cues, provide a brief (1-2 sentences) \
         insight into their potential mood or general well-being. Consider aspects like facial \
         expression, skin appearance (e.g., tiredness, radiance), and anything else visually \
         apparent. If the user mentioned using specific products ({}), also briefly consider \
         how these products might relate to the observed visual cues. The output should be \
         strictly in the JSON format.",
        products.join(", ")
    )
}

/// Asks the provider for a short well-being insight about the image.
///
/// Never fails: provider errors and empty replies turn into fixed fallback
/// strings so the daily log is returned regardless. The reply text is passed
/// through as-is, even though the prompt asks for JSON.
pub async fn request_insight(
    provider: &dyn InsightProvider,
    image: &[u8],
    mime_type: &str,
    products: &[String],
) -> String {
    let request = InsightRequest {
        prompt_text: build_prompt(products),
        image_data: general_purpose::STANDARD.encode(image),
        mime_type: mime_type.to_string(),
    };

    match provider.generate(&request).await {
        Ok(Some(text)) => {
            tracing::info!(insight = %text, "AI insight generated");
            text
        }
        Ok(None) => {
            tracing::warn!("Insight provider returned no text");
            NO_INSIGHT_FALLBACK.to_string()
        }
        Err(e) => {
            tracing::error!(error = %e, "Error generating AI insight");
            INSIGHT_ERROR_FALLBACK.to_string()
        }
    }
}
