//! Content categories and encodings
//!
//! A file's declared MIME type decides how its content is fetched:
//!
//! | Category | Fetch | Representation |
//! |----------|-------|----------------|
//! | Native document | export | per [`NativeKind`] |
//! | Anything else | raw download | text if [`is_textual`], else base64 |

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Prefix shared by all native Google document types
pub const NATIVE_PREFIX: &str = "application/vnd.google-apps.";

/// MIME type assumed when the provider reports none
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Recognized native document sub-types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeKind {
    Document,
    Spreadsheet,
    Presentation,
    Drawing,
    /// Any native type without a dedicated export (forms, sites, ...)
    Other,
}

impl NativeKind {
    /// Classify a MIME type already known to be native
    fn from_native(mime_type: &str) -> Self {
        match mime_type.strip_prefix(NATIVE_PREFIX) {
            Some("document") => NativeKind::Document,
            Some("spreadsheet") => NativeKind::Spreadsheet,
            Some("presentation") => NativeKind::Presentation,
            Some("drawing") => NativeKind::Drawing,
            _ => NativeKind::Other,
        }
    }

    /// MIME type to request when exporting for reading
    pub fn export_mime_type(&self) -> &'static str {
        match self {
            NativeKind::Document => "text/markdown",
            NativeKind::Spreadsheet => "text/csv",
            NativeKind::Presentation => "text/plain",
            NativeKind::Drawing => "image/png",
            NativeKind::Other => "text/plain",
        }
    }

    /// MIME type to request when exporting for text editing
    pub fn editable_export_mime_type(&self) -> &'static str {
        "text/plain"
    }
}

/// How a file's content is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCategory {
    /// Native document, exported to another representation
    Native(NativeKind),
    /// Stored bytes, downloaded as-is
    Raw,
}

impl ContentCategory {
    pub fn of(mime_type: &str) -> Self {
        if mime_type.starts_with(NATIVE_PREFIX) {
            ContentCategory::Native(NativeKind::from_native(mime_type))
        } else {
            ContentCategory::Raw
        }
    }
}

/// Whether content of this MIME type is returned as UTF-8 text.
///
/// Textual: `text/*`, `application/json`, `application/xml`,
/// `application/javascript`, and any `+json` / `+xml` structured-syntax type.
/// Parameters such as `; charset=utf-8` are ignored.
pub fn is_textual(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence.starts_with("text/")
        || matches!(
            essence.as_str(),
            "application/json" | "application/xml" | "application/javascript"
        )
        || essence.ends_with("+json")
        || essence.ends_with("+xml")
}

/// Content ready to hand to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Base64(String),
}

impl FileContent {
    /// Encode downloaded bytes according to their MIME type.
    ///
    /// Textual bytes that are not valid UTF-8 are decoded lossily.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        if is_textual(mime_type) {
            FileContent::Text(String::from_utf8_lossy(bytes).into_owned())
        } else {
            FileContent::Base64(STANDARD.encode(bytes))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FileContent::Text(s) | FileContent::Base64(s) => s,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FileContent::Text(_))
    }
}

/// Decode base64 supplied by a caller
pub fn decode_base64(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(data.trim())
}
