//! Image Pipeline
//!
//! Decode, scale down so neither dimension exceeds the bound (never
//! up), re-encode as bounded-quality JPEG, and wrap in a data URI. No
//! network involved; identical input yields identical output.

use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use regex::Regex;

use museboard_backend::domain::Template;

/// Neither output dimension exceeds this
pub const MAX_DIMENSION: u32 = 800;
/// JPEG quality, 0-100
pub const JPEG_QUALITY: u8 = 70;

#[derive(Debug)]
pub enum ImageError {
    Decode(String),
    Encode(String),
    /// Not a base64 image data URI
    InvalidDataUri,
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
            ImageError::Encode(msg) => write!(f, "Failed to encode image: {}", msg),
            ImageError::InvalidDataUri => write!(f, "Not an image data URI"),
        }
    }
}

impl std::error::Error for ImageError {}

/// Target dimensions: scale the long side down to the bound, keep the
/// aspect ratio, never scale up.
pub fn bounded_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width <= MAX_DIMENSION && height <= MAX_DIMENSION {
        return (width, height);
    }
    if width > height {
        let scaled = (height as f64 * MAX_DIMENSION as f64 / width as f64).round() as u32;
        (MAX_DIMENSION, scaled.max(1))
    } else {
        let scaled = (width as f64 * MAX_DIMENSION as f64 / height as f64).round() as u32;
        (scaled.max(1), MAX_DIMENSION)
    }
}

/// Compress raw image bytes into a self-contained JPEG data URI
pub fn compress_to_data_uri(bytes: &[u8]) -> Result<String, ImageError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| ImageError::Decode(e.to_string()))?;

    let (width, height) = (decoded.width(), decoded.height());
    let (target_w, target_h) = bounded_dimensions(width, height);
    let resized = if (target_w, target_h) != (width, height) {
        decoded.resize_exact(target_w, target_h, FilterType::Triangle)
    } else {
        decoded
    };

    // JPEG has no alpha channel
    let rgb = resized.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY)
        .encode_image(&rgb)
        .map_err(|e| ImageError::Encode(e.to_string()))?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(&encoded)
    ))
}

fn data_uri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^data:image/[a-z+.-]+;base64,([A-Za-z0-9+/=]+)$")
            .expect("data URI pattern is valid")
    })
}

/// Extract the raw bytes back out of a stored image data URI
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, ImageError> {
    let captures = data_uri_pattern()
        .captures(uri)
        .ok_or(ImageError::InvalidDataUri)?;
    STANDARD
        .decode(&captures[1])
        .map_err(|_| ImageError::InvalidDataUri)
}

/// Re-run a previously stored data URI through the pipeline
pub fn recompress_data_uri(uri: &str) -> Result<String, ImageError> {
    compress_to_data_uri(&decode_data_uri(uri)?)
}

/// Pipeline-level masking: compression failure falls back to the
/// template's built-in cover, logged
pub fn compress_or_default(bytes: &[u8], template: Template) -> String {
    match compress_to_data_uri(bytes) {
        Ok(uri) => uri,
        Err(e) => {
            log::warn!("Image compression failed ({}), using template default", e);
            template.default_cover().to_string()
        }
    }
}
