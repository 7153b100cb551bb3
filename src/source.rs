use crate::constants::{FALLBACK_MIME_TYPE, IMAGE_MIME_PREFIX, MAX_FILE_SIZE};
use crate::error::{CompressionError, Result};
use image::ImageFormat;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A file handed over by the picker: name, reported size, MIME type and the
/// raw bytes the codec will decode.
///
/// Size and MIME type are trusted as reported. The bytes are shared so the
/// codec can run on another thread without copying the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    size: u64,
    mime_type: String,
    data: Arc<[u8]>,
}

impl SourceFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Arc<[u8]>>,
    ) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            size: data.len() as u64,
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Overrides the size with the one the picker reported.
    pub fn with_reported_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Reads a file from disk the way a file picker would describe it.
    ///
    /// # Arguments
    /// * `path` - Path of the file to pick
    ///
    /// # Returns
    /// * `Ok(SourceFile)` with the on-disk size and a detected MIME type
    /// * `Err(CompressionError::FileNotFound)` if the path is not a readable file
    /// * `Err(CompressionError::FileTooLarge)` above the 100MB limit
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CompressionError::FileNotFound(path.to_path_buf()));
        }

        let canonical_path = path
            .canonicalize()
            .map_err(|_| CompressionError::FileNotFound(path.to_path_buf()))?;

        // Check file size before loading
        let file_size = fs::metadata(&canonical_path)?.len();
        if file_size > MAX_FILE_SIZE {
            return Err(CompressionError::FileTooLarge(file_size, MAX_FILE_SIZE));
        }

        let data = fs::read(&canonical_path)?;
        let name = canonical_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = detect_mime_type(&canonical_path, &data);

        Ok(Self {
            name,
            size: file_size,
            mime_type,
            data: Arc::from(data),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn shared_data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with(IMAGE_MIME_PREFIX)
    }
}

/// Detect a MIME type from the extension, then from the content.
pub fn detect_mime_type(path: &Path, data: &[u8]) -> String {
    ImageFormat::from_path(path)
        .or_else(|_| image::guess_format(data))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_MIME_TYPE.to_string())
}
