pub const DEFAULT_COMPRESSION_RATE: u8 = 70;
pub const MIN_COMPRESSION_RATE: u8 = 10;
pub const MAX_COMPRESSION_RATE: u8 = 100;

/// Rates strictly above this raise the quality-loss advisory.
pub const HIGH_COMPRESSION_THRESHOLD: u8 = 85;

pub const MAX_QUALITY: u8 = 100;
/// The JPEG encoder rejects quality 0.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum accepted source file size in bytes (100MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

pub const BYTES_PER_KB: u64 = 1024;
pub const BYTES_PER_MB: u64 = 1024 * 1024;

pub const IMAGE_MIME_PREFIX: &str = "image/";
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";
pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";
pub const OUTPUT_EXTENSION: &str = "jpg";
pub const COMPRESSED_SUFFIX: &str = "_Compressed";

pub const PREVIEW_URI_SCHEME: &str = "blob:img-compressor/";
pub const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";

pub const HIGH_COMPRESSION_WARNING: &str =
    "Warning: High compression (more than 85%) may lead to significant quality loss and distortion!";

// Common output message prefixes
pub const ORIGINAL_SIZE_PREFIX: &str = "📊 Original size:";
pub const COMPRESSED_SIZE_PREFIX: &str = "📈 Compressed size:";
pub const COMPRESSION_RATIO_PREFIX: &str = "🎯 Compression ratio:";
pub const SUCCESS_PREFIX: &str = "✅";
pub const INFO_PREFIX: &str = "📋";
