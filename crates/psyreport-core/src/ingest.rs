//! Conversion of an uploaded file into a payload the extraction client can
//! send: base64 for images, decoded text for CSV exports.
//!
//! Size and type are checked from the handle's metadata first; the file body
//! is read at most once, and only after both checks pass.

use std::future::Future;
use std::pin::Pin;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::info;

use crate::error::IngestError;

/// Largest accepted upload: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub const CSV_MIME_TYPE: &str = "text/csv";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An uploaded file: metadata up front, body on demand.
///
/// Methods return boxed futures for dyn compatibility.
pub trait FileHandle: Send + Sync {
    fn name(&self) -> &str;

    /// Declared MIME type, e.g. `image/png` or `text/csv`.
    fn mime_type(&self) -> &str;

    /// Size in bytes, known without reading the body.
    fn size(&self) -> u64;

    fn read_bytes(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>>;
}

/// A file whose contents are already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }
}

impl FileHandle for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read_bytes(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>> {
        Box::pin(async move { Ok(self.bytes.clone()) })
    }
}

/// What an uploaded file becomes once ingested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestedPayload {
    /// Image bytes, standard base64 without a data-URL prefix.
    Image { mime_type: String, base64: String },
    /// Decoded CSV/text content.
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadKind {
    Image,
    Csv,
}

pub async fn ingest(file: &dyn FileHandle) -> Result<IngestedPayload, IngestError> {
    let size = file.size();
    if size > MAX_UPLOAD_BYTES {
        return Err(IngestError::FileTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let mime_type = essence(file.mime_type());
    let kind = classify(&mime_type)
        .ok_or_else(|| IngestError::UnsupportedFileType(file.mime_type().to_string()))?;

    let bytes = file.read_bytes().await.map_err(|source| IngestError::Read {
        name: file.name().to_string(),
        source,
    })?;

    info!(name = file.name(), mime_type = %mime_type, size, "ingested upload");

    Ok(match kind {
        UploadKind::Image => IngestedPayload::Image {
            base64: STANDARD.encode(&bytes),
            mime_type,
        },
        UploadKind::Csv => IngestedPayload::Text(decode_text(&bytes)),
    })
}

/// Lower-cased MIME type without parameters (`text/csv; charset=utf-8` → `text/csv`).
fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn classify(mime_type: &str) -> Option<UploadKind> {
    if mime_type == CSV_MIME_TYPE {
        Some(UploadKind::Csv)
    } else if mime_type
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
    {
        Some(UploadKind::Image)
    } else {
        None
    }
}

/// UTF-8 decode with replacement characters, dropping a leading BOM.
fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
