//! Chart images attached to assistant replies.
//!
//! The service sends charts as base64 PNG. A terminal cannot show them, so
//! they are decoded and written to disk.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("chart image is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("failed to write chart image: {0}")]
    Io(#[from] std::io::Error),
}

/// Decode a base64 chart, tolerating a `data:` URL prefix and whitespace.
///
/// # Errors
///
/// Returns [`ChartError::Decode`] if the payload is not standard base64.
pub fn decode_chart(encoded: &str) -> Result<Vec<u8>, ChartError> {
    let encoded = encoded.trim();
    let encoded = encoded.strip_prefix(DATA_URL_PREFIX).unwrap_or(encoded);
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

#[must_use]
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

/// File name for the chart attached to the message at `index`.
#[must_use]
pub fn chart_file_name(index: usize) -> String {
    format!("chart-{index:03}.png")
}

/// Decode `encoded` and write it into `dir`, creating the directory if needed.
///
/// # Errors
///
/// Returns an error if decoding fails or the file cannot be written.
pub fn save_chart(dir: &Path, index: usize, encoded: &str) -> Result<PathBuf, ChartError> {
    let bytes = decode_chart(encoded)?;
    if !is_png(&bytes) {
        tracing::warn!(index, "chart image does not carry a PNG signature");
    }
    std::fs::create_dir_all(dir)?;
    let path = dir.join(chart_file_name(index));
    std::fs::write(&path, &bytes)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "chart saved");
    Ok(path)
}

#[cfg(test)]
#[path = "chart_test.rs"]
mod tests;
