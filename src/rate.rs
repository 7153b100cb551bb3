//! Compression-rate slider values and the encoder quality they map to.
//!
//! The slider is an *inverse* intensity: a higher rate asks for a smaller,
//! lower-quality file. The codec is always handed `100 - rate`.

use crate::constants::{
    DEFAULT_COMPRESSION_RATE, HIGH_COMPRESSION_THRESHOLD, HIGH_COMPRESSION_WARNING,
    MAX_COMPRESSION_RATE, MAX_QUALITY, MIN_COMPRESSION_RATE,
};
use crate::error::{CompressionError, Result};
use std::fmt;

/// User-facing compression rate, always within 10..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionRate(u8);

impl CompressionRate {
    pub fn new(value: impl Into<i64>) -> Result<Self> {
        let value = value.into();
        match u8::try_from(value) {
            Ok(rate) if (MIN_COMPRESSION_RATE..=MAX_COMPRESSION_RATE).contains(&rate) => {
                Ok(Self(rate))
            }
            _ => Err(CompressionError::InvalidCompressionRate(
                value,
                MIN_COMPRESSION_RATE,
                MAX_COMPRESSION_RATE,
            )),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Encoder quality for this rate.
    pub fn quality(self) -> Quality {
        Quality(quality_param(self.0))
    }

    pub fn warning(self) -> Option<QualityWarning> {
        needs_quality_warning(self.0).then_some(QualityWarning { rate: self })
    }
}

impl Default for CompressionRate {
    fn default() -> Self {
        Self(DEFAULT_COMPRESSION_RATE)
    }
}

impl fmt::Display for CompressionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Encoder quality handed to the codec (0-100, higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    /// Clamped to 100.
    pub fn new(value: u8) -> Self {
        Self(value.min(MAX_QUALITY))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-blocking advisory raised when compression starts with a rate above 85.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityWarning {
    pub rate: CompressionRate,
}

impl QualityWarning {
    pub fn message(&self) -> &'static str {
        HIGH_COMPRESSION_WARNING
    }
}

impl fmt::Display for QualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Maps a slider rate to encoder quality: `100 - rate`.
///
/// # Example
/// ```
/// use img_compressor::rate::quality_param;
///
/// assert_eq!(quality_param(70), 30);
/// assert_eq!(quality_param(10), 90);
/// ```
pub fn quality_param(rate: u8) -> u8 {
    MAX_QUALITY.saturating_sub(rate)
}

pub fn needs_quality_warning(rate: u8) -> bool {
    rate > HIGH_COMPRESSION_THRESHOLD
}
