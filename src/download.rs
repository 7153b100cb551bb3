use crate::constants::OUTPUT_MIME_TYPE;
use crate::error::{CompressionError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A compressed image ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    file_name: String,
    bytes: Vec<u8>,
}

impl Download {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        OUTPUT_MIME_TYPE
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writes the image into `dir`, creating it if needed.
    ///
    /// # Arguments
    /// * `dir` - Target directory
    ///
    /// # Returns
    /// * `Ok(path)` - Where the file was written
    /// * `Err(CompressionError)` - If the directory or file cannot be written
    ///
    /// The bytes go to a temporary file in `dir` first and are renamed into
    /// place, so an interrupted save never leaves a truncated image behind.
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .map_err(|_| CompressionError::DirectoryCreationFailed(dir.to_path_buf()))?;

        let target = dir.join(self.safe_file_name());
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&self.bytes)?;
        temp.persist(&target).map_err(|e| CompressionError::Io(e.error))?;

        Ok(target)
    }

    // Only the final component, so a name like "../x.jpg" stays inside `dir`.
    fn safe_file_name(&self) -> PathBuf {
        Path::new(&self.file_name)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("image_Compressed.jpg"))
    }
}
