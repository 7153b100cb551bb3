pub mod cli;
pub mod codec;
pub mod config;
pub mod constants;
pub mod controller;
pub mod download;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod preview;
pub mod progress;
pub mod rate;
pub mod report;
pub mod session;
pub mod shell;
pub mod source;

pub use codec::{Codec, CodecRequest, EncodedImage, ImageCodec};
pub use config::SessionOptions;
pub use controller::{CodecOutcome, Controller, PendingCompression};
pub use download::Download;
pub use error::{CompressionError, Result};
pub use metrics::{
    build_file_name, calculate_compression_ratio, estimate_decoded_size, format_size,
};
pub use preview::{PreviewHandle, PreviewKind, PreviewRegistry};
pub use rate::{needs_quality_warning, quality_param, CompressionRate, Quality, QualityWarning};
pub use report::SessionReport;
pub use session::{Session, Stage};
pub use source::SourceFile;
