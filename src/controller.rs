//! Workflow controller: owns the session and performs every transition.
//!
//! ```text
//! Idle --select--> ImageSelected --start--> Compressing --result--> Compressed
//!   ^                   |  ^                     |                      |
//!   |                   |  +------ failure ------+                      |
//!   +------------------ reset ------------------------------------------+
//! ```
//!
//! The codec runs off the caller's thread. [`Controller::start_compression`]
//! moves the session to `Compressing` before returning a
//! [`PendingCompression`], which resolves exactly once and is fed back through
//! [`Controller::on_codec_result`].

use crate::codec::{Codec, CodecRequest, EncodedImage, ImageCodec};
use crate::config::SessionOptions;
use crate::download::Download;
use crate::error::{CompressionError, Result};
use crate::metrics::build_file_name;
use crate::preview::{PreviewKind, PreviewRegistry};
use crate::rate::CompressionRate;
use crate::report::SessionReport;
use crate::session::{CompressedArtifact, CompressionJob, Selection, Session, Stage};
use crate::source::SourceFile;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// The single resolution of one codec invocation.
#[derive(Debug)]
pub struct CodecOutcome {
    pub ticket: u64,
    pub result: Result<EncodedImage>,
}

/// Handle on an in-flight compression. Consumed by [`PendingCompression::wait`],
/// so it yields at most one outcome.
#[derive(Debug)]
pub struct PendingCompression {
    ticket: u64,
    receiver: oneshot::Receiver<Result<EncodedImage>>,
    timeout: Option<Duration>,
}

impl PendingCompression {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub async fn wait(self) -> CodecOutcome {
        let received = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.receiver).await {
                Ok(received) => received,
                Err(_) => {
                    return CodecOutcome {
                        ticket: self.ticket,
                        result: Err(CompressionError::CodecFailure(format!(
                            "codec did not respond within {:?}",
                            limit
                        ))),
                    }
                }
            },
            None => self.receiver.await,
        };

        let result = received.unwrap_or_else(|_| {
            Err(CompressionError::CodecFailure(
                "codec stopped without producing a result".to_string(),
            ))
        });

        CodecOutcome {
            ticket: self.ticket,
            result,
        }
    }
}

pub struct Controller<C: Codec = ImageCodec> {
    session: Session,
    previews: PreviewRegistry,
    codec: Arc<C>,
    options: SessionOptions,
    next_ticket: u64,
}

impl Controller<ImageCodec> {
    pub fn new(options: SessionOptions) -> Self {
        Self::with_codec(ImageCodec, options)
    }
}

impl Default for Controller<ImageCodec> {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl<C: Codec + 'static> Controller<C> {
    pub fn with_codec(codec: C, options: SessionOptions) -> Self {
        Self {
            session: Session::default(),
            previews: PreviewRegistry::new(),
            codec: Arc::new(codec),
            options,
            next_ticket: 1,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Picks the image to compress.
    ///
    /// A non-image leaves the session untouched. Picking again before
    /// compressing discards the current session first, releasing its preview.
    pub fn select_image(&mut self, file: SourceFile) -> Result<()> {
        let stage = self.stage();
        if matches!(stage, Stage::Compressing | Stage::Compressed) {
            return Err(CompressionError::InvalidTransition {
                operation: "select an image",
                stage,
            });
        }

        if !file.is_image() {
            crate::warn!("Please select an image file ({} is {})", file.name(), file.mime_type());
            return Err(CompressionError::InvalidFileType(file.mime_type().to_string()));
        }

        if stage == Stage::ImageSelected {
            self.reset();
        }

        crate::verbose!(
            "Selected {} ({} bytes, {})",
            file.name(),
            file.size(),
            file.mime_type()
        );
        let preview = self.previews.create(PreviewKind::Source);
        self.session = Session::ImageSelected {
            source: Selection::new(file, preview),
            rate: self.options.default_rate,
        };
        Ok(())
    }

    pub fn set_compression_rate(&mut self, value: impl Into<i64>) -> Result<CompressionRate> {
        match &mut self.session {
            Session::ImageSelected { rate, .. } => {
                *rate = CompressionRate::new(value)?;
                crate::verbose!("Compression rate set to {}", rate);
                Ok(*rate)
            }
            Session::Idle => Err(CompressionError::NoImageSelected),
            Session::Compressing { .. } | Session::Compressed { .. } => {
                Err(CompressionError::CompressionRateLocked)
            }
        }
    }

    /// Freezes the rate, moves to `Compressing` and hands the image to the
    /// codec on a blocking worker.
    ///
    /// # Returns
    /// * `Ok(PendingCompression)` - Resolves once with the codec's outcome
    /// * `Err(CompressionError::NoImageSelected)` - Nothing selected yet
    /// * `Err(CompressionError::AlreadyInProgress)` - A compression is running
    /// * `Err(CompressionError::AlreadyCompressed)` - Reset first
    pub fn start_compression(&mut self) -> Result<PendingCompression> {
        let (source, rate) = match std::mem::take(&mut self.session) {
            Session::ImageSelected { source, rate } => (source, rate),
            other => {
                let rejection = other.start_rejection();
                self.session = other;
                return Err(rejection);
            }
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let job = CompressionJob::freeze(ticket, rate);
        if let Some(warning) = job.warning() {
            crate::warn!("{}", warning);
        }
        crate::verbose!(
            "Compression #{} started: rate {} -> quality {}",
            ticket,
            job.rate(),
            job.quality()
        );

        let request = CodecRequest::jpeg(source.file().shared_data(), job.quality());
        let receiver = self.dispatch(request);

        self.session = Session::Compressing { source, job };

        Ok(PendingCompression {
            ticket,
            receiver,
            timeout: self.options.codec_timeout,
        })
    }

    fn dispatch(&self, request: CodecRequest) -> oneshot::Receiver<Result<EncodedImage>> {
        let (sender, receiver) = oneshot::channel();
        let codec = Arc::clone(&self.codec);
        let task = move || {
            // The receiver is gone if the caller dropped the pending handle.
            let _ = sender.send(codec.encode(&request));
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(task);
            }
            Err(_) => {
                std::thread::spawn(task);
            }
        }
        receiver
    }

    /// Applies the codec's outcome.
    ///
    /// Success moves to `Compressed`. Failure reverts to `ImageSelected` with
    /// the same rate so the user can retry. Outcomes for a compression that
    /// was reset away are rejected as stale and change nothing.
    pub fn on_codec_result(&mut self, outcome: CodecOutcome) -> Result<()> {
        let (source, job) = match std::mem::take(&mut self.session) {
            Session::Compressing { source, job } if job.ticket() == outcome.ticket => (source, job),
            other => {
                self.session = other;
                crate::verbose!("Ignoring result of stale compression #{}", outcome.ticket);
                return Err(CompressionError::StaleCodecResult(outcome.ticket));
            }
        };

        match outcome.result {
            Ok(encoded) => {
                let preview = self.previews.create(PreviewKind::Artifact);
                let artifact = CompressedArtifact::new(encoded, preview);
                crate::verbose!(
                    "Compression #{} finished (~{} bytes)",
                    job.ticket(),
                    artifact.compressed_size_bytes()
                );
                self.session = Session::Compressed {
                    source,
                    job,
                    artifact,
                };
                Ok(())
            }
            Err(e) => {
                self.session = Session::ImageSelected {
                    source,
                    rate: job.rate(),
                };
                Err(match e {
                    CompressionError::CodecFailure(_) => e,
                    other => CompressionError::CodecFailure(other.to_string()),
                })
            }
        }
    }

    /// Starts a compression and waits for it to settle.
    pub async fn compress(&mut self) -> Result<()> {
        let pending = self.start_compression()?;
        let outcome = pending.wait().await;
        self.on_codec_result(outcome)
    }

    /// Discards the session and every preview handle it created.
    pub fn reset(&mut self) {
        if self.session.is_idle() {
            return;
        }
        let revoked = self.previews.revoke_all();
        self.session = Session::default();
        crate::verbose!("Session reset, {} preview handle(s) released", revoked);
    }

    pub fn download(&self) -> Result<Download> {
        match &self.session {
            Session::Compressed {
                source, artifact, ..
            } => Ok(Download::new(
                build_file_name(source.file().name()),
                artifact.encoded().decode()?,
            )),
            _ => Err(CompressionError::NotCompressed),
        }
    }

    pub fn status(&self) -> SessionReport {
        SessionReport::from_session(&self.session)
    }
}
