use std::path::PathBuf;

/// An image written to the upload directory during one request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub stored_path: PathBuf,
    pub public_url: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}
