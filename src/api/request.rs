//! Create-school request body
//!
//! Six text parts followed by one binary `image` part carrying the file's
//! name and MIME type.

use reqwest::multipart::{Form, Part};

use super::errors::{ApiError, ApiResult};
use crate::schema::{Field, ValidatedSchool};

/// Build the multipart body for `POST /api/schools`
pub fn multipart_form(school: &ValidatedSchool) -> ApiResult<Form> {
    let mut form = Form::new();
    for (name, value) in school.text_parts() {
        form = form.text(name, value.to_string());
    }

    let image = school.image();
    let part = Part::bytes(image.data.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.content_type)
        .map_err(|e| {
            ApiError::InvalidPayload(format!("content type '{}': {}", image.content_type, e))
        })?;

    Ok(form.part(Field::Image.wire_name(), part))
}
