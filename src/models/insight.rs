/// One call to the insight provider: the prompt plus the inline image.
#[derive(Debug, Clone)]
pub struct InsightRequest {
    pub prompt_text: String,
    /// Base64-encoded image bytes.
    pub image_data: String,
    pub mime_type: String,
}
