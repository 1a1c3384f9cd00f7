//! Uploaded assets are stored inline as data urls

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

/// Guess a mime type from a file name's extension
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("avif") => "image/avif",
        Some("ico") => "image/x-icon",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Encode file contents as a `data:` url
pub fn encode_data_url(file_name: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(file_name), STANDARD.encode(bytes))
}
