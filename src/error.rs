use crate::session::Stage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Invalid base64 payload: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("Please select an image file (got MIME type '{0}')")]
    InvalidFileType(String),

    #[error("Please select an image first")]
    NoImageSelected,

    #[error("A compression is already in progress")]
    AlreadyInProgress,

    #[error("Image is already compressed. Reset the session to compress another image")]
    AlreadyCompressed,

    #[error("Invalid compression rate: {0}. Must be between {1} and {2}")]
    InvalidCompressionRate(i64, u8, u8),

    #[error("Compression rate is locked once compression has started")]
    CompressionRateLocked,

    #[error("Cannot {operation} while the session is {stage}")]
    InvalidTransition {
        operation: &'static str,
        stage: Stage,
    },

    #[error("Codec failure: {0}")]
    CodecFailure(String),

    #[error("Discarded codec result for stale compression #{0}")]
    StaleCodecResult(u64),

    #[error("Nothing to download: no compressed image in this session")]
    NotCompressed,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("Unknown command: {0}. Type 'help' for the list of commands")]
    InvalidCommand(String),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

pub type Result<T> = std::result::Result<T, CompressionError>;
