//! School image resolution
//!
//! Image paths are relative to the asset origin. When an image is missing
//! or fails to load, a generated placeholder is shown instead.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;

const PLACEHOLDER_SVG: &str = concat!(
    r##"<svg width="300" height="200" xmlns="http://www.w3.org/2000/svg">"##,
    r##"<rect width="300" height="200" fill="#f3f4f6"/>"##,
    r##"<text x="150" y="100" font-family="Arial, sans-serif" font-size="16" fill="#9ca3af" "##,
    r##"text-anchor="middle" dominant-baseline="middle">School Image</text>"##,
    r##"</svg>"##,
);

/// Where a card's image comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "src", rename_all = "lowercase")]
pub enum ImageSource {
    /// Served by the asset origin
    Remote(String),
    /// Inline placeholder data URI
    Placeholder(String),
}

impl ImageSource {
    /// Resolve an image path.
    ///
    /// `load_failed` is the caller's report that the remote image could not
    /// be displayed.
    pub fn resolve(asset_base: &str, image: &str, load_failed: bool) -> Self {
        match image_url(asset_base, image) {
            Some(url) if !load_failed => ImageSource::Remote(url),
            _ => ImageSource::Placeholder(placeholder_data_uri()),
        }
    }

    /// The `src` to render
    pub fn src(&self) -> &str {
        match self {
            ImageSource::Remote(url) | ImageSource::Placeholder(url) => url,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder(_))
    }
}

/// Absolute URL for an image path, `None` if there is no image
pub fn image_url(asset_base: &str, image: &str) -> Option<String> {
    let image = image.trim();
    if image.is_empty() {
        return None;
    }
    if image.starts_with("http://") || image.starts_with("https://") {
        return Some(image.to_string());
    }
    Some(format!(
        "{}/{}",
        asset_base.trim_end_matches('/'),
        image.trim_start_matches('/')
    ))
}

/// The placeholder graphic as a `data:` URI
pub fn placeholder_data_uri() -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(PLACEHOLDER_SVG))
}
