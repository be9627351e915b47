use std::path::{Path, PathBuf};

use psyreport_core::ingest::{BoxFuture, FileHandle};

/// A file on local disk, picked by the user for upload.
///
/// Metadata is captured when the file is opened; the body is only read when
/// ingestion asks for it.
#[derive(Debug, Clone)]
pub struct DiskFile {
    path: PathBuf,
    name: String,
    mime_type: String,
    size: u64,
}

impl DiskFile {
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            mime_type: mime_type_for_path(&path).to_string(),
            size: metadata.len(),
            name,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileHandle for DiskFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn read_bytes(&self) -> BoxFuture<'_, std::io::Result<Vec<u8>>> {
        Box::pin(tokio::fs::read(&self.path))
    }
}

/// Guess a MIME type from the file extension, the way a browser file picker
/// would report it. The body is not inspected.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}
