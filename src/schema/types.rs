//! Form input types
//!
//! `SchoolInput` is the client-authored record the schema validates. It is
//! transient: it lives in the form until it is submitted or reset.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::validator::MAX_IMAGE_BYTES;

/// The seven fields of the school form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Address,
    City,
    State,
    Contact,
    EmailId,
    Image,
}

impl Field {
    /// All fields in the order they are validated and submitted
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Address,
        Field::City,
        Field::State,
        Field::Contact,
        Field::EmailId,
        Field::Image,
    ];

    /// Multipart part name / JSON key for this field
    pub fn wire_name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Address => "address",
            Field::City => "city",
            Field::State => "state",
            Field::Contact => "contact",
            Field::EmailId => "email_id",
            Field::Image => "image",
        }
    }

    /// Index into `ALL`
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name sent with the multipart part
    pub file_name: String,
    /// Declared MIME type
    pub content_type: String,
    /// Raw file contents
    pub data: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a file from disk.
    ///
    /// When `content_type` is `None` the MIME type is inferred from the
    /// file extension. At most `MAX_IMAGE_BYTES + 1` bytes are read, so an
    /// oversized file still fails the size rule without being loaded whole.
    pub fn from_path(path: &Path, content_type: Option<&str>) -> std::io::Result<Self> {
        let mut data = Vec::new();
        File::open(path)?
            .take(MAX_IMAGE_BYTES + 1)
            .read_to_end(&mut data)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        let content_type = match content_type {
            Some(ct) => ct.to_string(),
            None => mime_from_extension(path).to_string(),
        };
        Ok(Self {
            file_name,
            content_type,
            data,
        })
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

// Raw bytes are omitted: image payloads can be megabytes.
impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.data.len())
            .finish()
    }
}

/// Guess a MIME type from a file extension
pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// The school form's current values.
///
/// Empty strings and `image: None` represent untouched fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: Option<ImageFile>,
}

impl SchoolInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text value of a field, `None` for the image field
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Address => Some(&self.address),
            Field::City => Some(&self.city),
            Field::State => Some(&self.state),
            Field::Contact => Some(&self.contact),
            Field::EmailId => Some(&self.email_id),
            Field::Image => None,
        }
    }

    /// Mutable text slot of a field, `None` for the image field
    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Name => Some(&mut self.name),
            Field::Address => Some(&mut self.address),
            Field::City => Some(&mut self.city),
            Field::State => Some(&mut self.state),
            Field::Contact => Some(&mut self.contact),
            Field::EmailId => Some(&mut self.email_id),
            Field::Image => None,
        }
    }

    /// True when every field is at its empty value
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A `SchoolInput` that passed validation.
///
/// Only `SchoolSchema::validated` constructs one, so holding a
/// `ValidatedSchool` means every rule held when it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSchool {
    pub(crate) name: String,
    pub(crate) address: String,
    pub(crate) city: String,
    pub(crate) state: String,
    pub(crate) contact: String,
    pub(crate) email_id: String,
    pub(crate) image: ImageFile,
}

impl ValidatedSchool {
    /// Text parts in submission order
    pub fn text_parts(&self) -> [(&'static str, &str); 6] {
        [
            (Field::Name.wire_name(), &self.name),
            (Field::Address.wire_name(), &self.address),
            (Field::City.wire_name(), &self.city),
            (Field::State.wire_name(), &self.state),
            (Field::Contact.wire_name(), &self.contact),
            (Field::EmailId.wire_name(), &self.email_id),
        ]
    }

    pub fn image(&self) -> &ImageFile {
        &self.image
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
