use crate::constants::{
    COMPRESSED_SIZE_PREFIX, COMPRESSION_RATIO_PREFIX, INFO_PREFIX, ORIGINAL_SIZE_PREFIX,
};
use crate::metrics::{calculate_compression_ratio, format_size};
use crate::rate::{CompressionRate, Quality, QualityWarning};
use crate::session::{Session, Stage};
use std::fmt;

/// Display snapshot of a session. Every size is already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub stage: Stage,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub original_size: Option<String>,
    pub rate: Option<CompressionRate>,
    pub quality: Option<Quality>,
    pub warning: Option<QualityWarning>,
    pub compressed_size: Option<String>,
    pub compression_ratio: Option<f64>,
    pub preview_uri: Option<String>,
}

impl SessionReport {
    pub fn from_session(session: &Session) -> Self {
        let source = session.source();
        let rate = session.compression_rate();

        let compression_ratio = match (session.original_size_bytes(), session.compressed_size_bytes()) {
            (Some(original), Some(compressed)) => {
                Some(calculate_compression_ratio(original, compressed))
            }
            _ => None,
        };

        Self {
            stage: session.stage(),
            file_name: source.map(|s| s.file().name().to_string()),
            mime_type: source.map(|s| s.file().mime_type().to_string()),
            original_size: session.original_size_bytes().map(format_size),
            rate,
            quality: rate.map(CompressionRate::quality),
            warning: session.warning(),
            compressed_size: session.compressed_size_bytes().map(format_size),
            compression_ratio,
            preview_uri: session.preview_uri().map(str::to_string),
        }
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Stage: {}", INFO_PREFIX, self.stage)?;

        if let (Some(name), Some(mime)) = (&self.file_name, &self.mime_type) {
            write!(f, "\n🖼️  Image: {} ({})", name, mime)?;
        }
        if let Some(size) = &self.original_size {
            write!(f, "\n{} {}", ORIGINAL_SIZE_PREFIX, size)?;
        }
        if let (Some(rate), Some(quality)) = (self.rate, self.quality) {
            write!(f, "\n🎚️  Compression rate: {} (quality {})", rate, quality)?;
        }
        if let Some(warning) = &self.warning {
            write!(f, "\n⚠️  {}", warning)?;
        }
        if let Some(size) = &self.compressed_size {
            write!(f, "\n{} {}", COMPRESSED_SIZE_PREFIX, size)?;
        }
        if let Some(ratio) = self.compression_ratio {
            write!(f, "\n{} {:.1}%", COMPRESSION_RATIO_PREFIX, ratio)?;
        }
        if let Some(uri) = &self.preview_uri {
            write!(f, "\n👁️  Preview: {}", uri)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::EncodedImage;
    use crate::preview::{PreviewKind, PreviewRegistry};
    use crate::session::{CompressedArtifact, CompressionJob, Selection};
    use crate::source::SourceFile;

    #[test]
    fn test_idle_report() {
        let report = SessionReport::from_session(&Session::default());
        assert_eq!(report.stage, Stage::Idle);
        assert!(report.file_name.is_none());
        assert!(report.rate.is_none());
        assert_eq!(report.to_string(), "📋 Stage: idle");
    }

    #[test]
    fn test_selected_report() {
        let mut registry = PreviewRegistry::new();
        let file = SourceFile::new("photo.png", "image/jpeg", vec![0u8; 8]).with_reported_size(2_097_152);
        let session = Session::ImageSelected {
            source: Selection::new(file, registry.create(PreviewKind::Source)),
            rate: CompressionRate::default(),
        };

        let report = SessionReport::from_session(&session);

        assert_eq!(report.original_size.as_deref(), Some("2.00 MB"));
        assert_eq!(report.quality, Some(Quality::new(30)));
        assert!(report.compressed_size.is_none());
        let text = report.to_string();
        assert!(text.contains("photo.png (image/jpeg)"));
        assert!(text.contains("70% (quality 30)"));
    }

    #[test]
    fn test_compressed_report_with_warning() {
        let mut registry = PreviewRegistry::new();
        let file = SourceFile::new("big.jpg", "image/jpeg", vec![0u8; 4096]);
        let artifact = CompressedArtifact::new(
            EncodedImage::from_jpeg_bytes(&[0u8; 512]),
            registry.create(PreviewKind::Artifact),
        );
        let artifact_uri = artifact.preview().uri().to_string();
        let session = Session::Compressed {
            source: Selection::new(file, registry.create(PreviewKind::Source)),
            job: CompressionJob::freeze(1, CompressionRate::new(90).unwrap()),
            artifact,
        };

        let report = SessionReport::from_session(&session);

        assert!(report.warning.is_some());
        assert!(report.compressed_size.is_some());
        assert!(report.compression_ratio.unwrap() > 0.0);
        assert_eq!(report.preview_uri.as_deref(), Some(artifact_uri.as_str()));
        assert!(report.to_string().contains("High compression"));
    }
}
