//! Size and naming helpers for displaying a compression session
//!
//! Everything here is pure: nothing reads or mutates the session.

use crate::constants::{BYTES_PER_KB, BYTES_PER_MB, COMPRESSED_SUFFIX, OUTPUT_EXTENSION};

/// Format a byte count the way the session reports sizes
///
/// # Arguments
/// * `bytes` - Size in bytes
///
/// # Returns
/// * `"{n:.2} KB"` below one mebibyte, `"{n:.2} MB"` otherwise
pub fn format_size(bytes: u64) -> String {
    if bytes < BYTES_PER_MB {
        format!("{:.2} KB", round_half_up(bytes as f64 / BYTES_PER_KB as f64))
    } else {
        format!("{:.2} MB", round_half_up(bytes as f64 / BYTES_PER_MB as f64))
    }
}

// `{:.2}` alone rounds exact ties to even (0.125 -> "0.12").
fn round_half_up(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Approximate decoded length of a base64-style payload
///
/// Takes three quarters of the text length and subtracts everything from the
/// first `=` to the end. The estimate is inexact: when given a full data URI
/// the `data:...;base64,` header is counted as payload, and any `=` that is
/// not trailing padding truncates the count. Callers must treat the result as
/// an estimate, not as the byte length of the artifact.
///
/// # Arguments
/// * `encoded_payload` - Base64 text, optionally with a data URI header
///
/// # Returns
/// * Estimated number of decoded bytes
pub fn estimate_decoded_size(encoded_payload: &str) -> u64 {
    let len = encoded_payload.len() as u64;
    let padding = match encoded_payload.find('=') {
        Some(index) if index > 0 => len - index as u64,
        _ => 0,
    };
    (len * 3 / 4).saturating_sub(padding)
}

/// Download file name for a compressed image
///
/// The output is always JPEG, so the original name is kept whole and
/// `_Compressed.jpg` appended.
pub fn build_file_name(original_name: &str) -> String {
    format!("{}{}.{}", original_name, COMPRESSED_SUFFIX, OUTPUT_EXTENSION)
}

/// Calculate compression ratio as a percentage
///
/// # Arguments
/// * `original_size` - Original file size in bytes
/// * `compressed_size` - Compressed file size in bytes
///
/// # Returns
/// * Compression ratio as percentage (positive means reduction, negative means increase)
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}
