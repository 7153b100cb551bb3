//! The single state container for one image's compression task.
//!
//! Each stage carries exactly the data that is legal in it, so an artifact
//! without a finished compression, or a mutable rate during compression,
//! cannot be represented.

use crate::codec::EncodedImage;
use crate::error::CompressionError;
use crate::metrics::estimate_decoded_size;
use crate::preview::PreviewHandle;
use crate::rate::{CompressionRate, Quality, QualityWarning};
use crate::source::SourceFile;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Idle,
    ImageSelected,
    Compressing,
    Compressed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::ImageSelected => "image selected",
            Stage::Compressing => "compressing",
            Stage::Compressed => "compressed",
        };
        f.write_str(name)
    }
}

/// The picked file together with its display handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    file: SourceFile,
    original_size_bytes: u64,
    preview: PreviewHandle,
}

impl Selection {
    pub(crate) fn new(file: SourceFile, preview: PreviewHandle) -> Self {
        Self {
            original_size_bytes: file.size(),
            file,
            preview,
        }
    }

    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub fn original_size_bytes(&self) -> u64 {
        self.original_size_bytes
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }
}

/// Parameters frozen when compression starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionJob {
    ticket: u64,
    rate: CompressionRate,
    quality: Quality,
    warning: Option<QualityWarning>,
}

impl CompressionJob {
    pub(crate) fn freeze(ticket: u64, rate: CompressionRate) -> Self {
        Self {
            ticket,
            rate,
            quality: rate.quality(),
            warning: rate.warning(),
        }
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn rate(&self) -> CompressionRate {
        self.rate
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn warning(&self) -> Option<QualityWarning> {
        self.warning
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedArtifact {
    encoded: EncodedImage,
    compressed_size_bytes: u64,
    preview: PreviewHandle,
}

impl CompressedArtifact {
    pub(crate) fn new(encoded: EncodedImage, preview: PreviewHandle) -> Self {
        Self {
            compressed_size_bytes: estimate_decoded_size(encoded.data_uri()),
            encoded,
            preview,
        }
    }

    pub fn encoded(&self) -> &EncodedImage {
        &self.encoded
    }

    /// Estimated from the encoded text length, see [`estimate_decoded_size`].
    pub fn compressed_size_bytes(&self) -> u64 {
        self.compressed_size_bytes
    }

    pub fn preview(&self) -> &PreviewHandle {
        &self.preview
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Idle,
    ImageSelected {
        source: Selection,
        rate: CompressionRate,
    },
    Compressing {
        source: Selection,
        job: CompressionJob,
    },
    Compressed {
        source: Selection,
        job: CompressionJob,
        artifact: CompressedArtifact,
    },
}

impl Session {
    pub fn stage(&self) -> Stage {
        match self {
            Session::Idle => Stage::Idle,
            Session::ImageSelected { .. } => Stage::ImageSelected,
            Session::Compressing { .. } => Stage::Compressing,
            Session::Compressed { .. } => Stage::Compressed,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Session::Idle)
    }

    pub fn source(&self) -> Option<&Selection> {
        match self {
            Session::Idle => None,
            Session::ImageSelected { source, .. }
            | Session::Compressing { source, .. }
            | Session::Compressed { source, .. } => Some(source),
        }
    }

    /// The editable rate, or the frozen one once compression has started.
    pub fn compression_rate(&self) -> Option<CompressionRate> {
        match self {
            Session::Idle => None,
            Session::ImageSelected { rate, .. } => Some(*rate),
            Session::Compressing { job, .. } | Session::Compressed { job, .. } => Some(job.rate()),
        }
    }

    pub fn job(&self) -> Option<&CompressionJob> {
        match self {
            Session::Compressing { job, .. } | Session::Compressed { job, .. } => Some(job),
            _ => None,
        }
    }

    pub fn artifact(&self) -> Option<&CompressedArtifact> {
        match self {
            Session::Compressed { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    pub fn warning(&self) -> Option<QualityWarning> {
        self.job().and_then(CompressionJob::warning)
    }

    pub fn original_size_bytes(&self) -> Option<u64> {
        self.source().map(Selection::original_size_bytes)
    }

    pub fn compressed_size_bytes(&self) -> Option<u64> {
        self.artifact().map(CompressedArtifact::compressed_size_bytes)
    }

    /// Whichever image is currently shown: the artifact once compressed,
    /// the source before that.
    pub fn preview_uri(&self) -> Option<&str> {
        match self {
            Session::Idle => None,
            Session::Compressed { artifact, .. } => Some(artifact.preview().uri()),
            Session::ImageSelected { source, .. } | Session::Compressing { source, .. } => {
                Some(source.preview().uri())
            }
        }
    }

    pub(crate) fn start_rejection(&self) -> CompressionError {
        match self {
            Session::Idle => CompressionError::NoImageSelected,
            Session::Compressing { .. } => CompressionError::AlreadyInProgress,
            Session::Compressed { .. } => CompressionError::AlreadyCompressed,
            Session::ImageSelected { .. } => CompressionError::InvalidTransition {
                operation: "start compression",
                stage: Stage::ImageSelected,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{PreviewKind, PreviewRegistry};

    fn selection(registry: &mut PreviewRegistry) -> Selection {
        let file = SourceFile::new("photo.png", "image/jpeg", vec![0u8; 16]);
        Selection::new(file, registry.create(PreviewKind::Source))
    }

    #[test]
    fn test_default_session_is_idle() {
        let session = Session::default();
        assert_eq!(session.stage(), Stage::Idle);
        assert!(session.is_idle());
        assert!(session.source().is_none());
        assert!(session.compression_rate().is_none());
        assert!(session.preview_uri().is_none());
    }

    #[test]
    fn test_selection_caches_original_size() {
        let mut registry = PreviewRegistry::new();
        let source = selection(&mut registry);
        assert_eq!(source.original_size_bytes(), 16);
        assert_eq!(source.file().name(), "photo.png");
    }

    #[test]
    fn test_job_freezes_rate_quality_and_warning() {
        let job = CompressionJob::freeze(7, CompressionRate::new(90).unwrap());
        assert_eq!(job.ticket(), 7);
        assert_eq!(job.rate().value(), 90);
        assert_eq!(job.quality().value(), 10);
        assert!(job.warning().is_some());

        let job = CompressionJob::freeze(8, CompressionRate::new(85).unwrap());
        assert!(job.warning().is_none());
    }

    #[test]
    fn test_artifact_size_is_estimated_from_text() {
        let mut registry = PreviewRegistry::new();
        let encoded = EncodedImage::new("data:image/jpeg;base64,QUJD");
        let uri_len = encoded.data_uri().len() as u64;
        let artifact = CompressedArtifact::new(encoded, registry.create(PreviewKind::Artifact));
        assert_eq!(artifact.compressed_size_bytes(), uri_len * 3 / 4);
    }

    #[test]
    fn test_preview_follows_stage() {
        let mut registry = PreviewRegistry::new();
        let source = selection(&mut registry);
        let source_uri = source.preview().uri().to_string();
        let job = CompressionJob::freeze(1, CompressionRate::default());

        let compressing = Session::Compressing {
            source: source.clone(),
            job,
        };
        assert_eq!(compressing.preview_uri(), Some(source_uri.as_str()));
        assert!(compressing.artifact().is_none());

        let artifact = CompressedArtifact::new(
            EncodedImage::new("data:image/jpeg;base64,QUJD"),
            registry.create(PreviewKind::Artifact),
        );
        let artifact_uri = artifact.preview().uri().to_string();
        let compressed = Session::Compressed {
            source,
            job,
            artifact,
        };
        assert_eq!(compressed.preview_uri(), Some(artifact_uri.as_str()));
        assert_eq!(compressed.compression_rate(), Some(CompressionRate::default()));
    }

    #[test]
    fn test_start_rejection_by_stage() {
        assert!(matches!(
            Session::Idle.start_rejection(),
            CompressionError::NoImageSelected
        ));

        let mut registry = PreviewRegistry::new();
        let compressing = Session::Compressing {
            source: selection(&mut registry),
            job: CompressionJob::freeze(1, CompressionRate::default()),
        };
        assert!(matches!(
            compressing.start_rejection(),
            CompressionError::AlreadyInProgress
        ));
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::ImageSelected.to_string(), "image selected");
        assert_eq!(Stage::Compressed.to_string(), "compressed");
    }
}
