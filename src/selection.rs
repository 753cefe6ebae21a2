//! File selection: content-type validation and preview decoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{AppError, AppResult};

/// Fallback for files whose type cannot be determined
pub const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// The photo currently chosen by the user
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    /// `data:` URL ready to be used as an `<img src>`
    pub preview_url: String,
}

impl SelectedImage {
    /// Validate and decode a freshly picked or dropped file.
    ///
    /// `content_type` is whatever the selection surface declared; when it is
    /// missing or blank the type is guessed from the file name.
    pub fn from_file(
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> AppResult<Self> {
        let content_type = declared_content_type(file_name, content_type);
        if !is_image_type(&content_type) {
            return Err(AppError::InvalidFileType { content_type });
        }

        let file_name = if file_name.trim().is_empty() {
            "unknown".to_string()
        } else {
            file_name.to_string()
        };
        let preview_url = to_data_url(&content_type, &bytes);

        Ok(Self {
            file_name,
            content_type,
            bytes,
            preview_url,
        })
    }
}

pub fn is_image_type(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with("image/")
}

pub fn declared_content_type(file_name: &str, provided: Option<&str>) -> String {
    match provided.map(str::trim) {
        Some(content_type) if !content_type.is_empty() => content_type.to_string(),
        _ => content_type_from_extension(file_name).to_string(),
    }
}

fn content_type_from_extension(file_name: &str) -> &'static str {
    let extension = match file_name.rsplit_once('.') {
        Some((_, extension)) => extension.to_ascii_lowercase(),
        None => return UNKNOWN_CONTENT_TYPE,
    };

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => UNKNOWN_CONTENT_TYPE,
    }
}

fn to_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}
