//! Error types for WAV header parsing.

use thiserror::Error;

use crate::chunk::ChunkTag;

/// Result type for WAV parsing operations.
pub type WavResult<T> = Result<T, WavError>;

/// Errors that can occur while reading a RIFF/WAVE header.
#[derive(Debug, Error)]
pub enum WavError {
    /// I/O error from the underlying reader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream does not start with a `RIFF` tag.
    #[error("not a RIFF container (leading tag {})", format_tag_bytes(.0))]
    NotRiff([u8; 4]),

    /// The RIFF form type is not `WAVE`.
    #[error("not a WAVE form (form type {})", format_tag_bytes(.0))]
    NotWave([u8; 4]),

    /// More than one `fmt ` chunk in the file.
    #[error("duplicate fmt chunk; it must appear exactly once")]
    DuplicateFmtChunk,

    /// The stream ended without a `fmt ` chunk.
    #[error("missing fmt chunk; it must appear exactly once")]
    MissingFmtChunk,

    /// The stream ended without a `data` chunk.
    #[error("missing data chunk")]
    MissingDataChunk,

    /// A chunk payload is shorter than its declared contents.
    #[error("truncated {tag} chunk: needs {expected} bytes, found {found}")]
    TruncatedChunk {
        /// Tag of the offending chunk.
        tag: ChunkTag,
        /// Bytes required by the declared contents.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },

    /// The `fmt ` chunk declares a non-PCM encoding.
    #[error("unsupported codec (format tag {format_tag}); only PCM is supported")]
    UnsupportedCodec {
        /// The declared format tag.
        format_tag: u16,
    },

    /// A format field used as a divisor is zero.
    #[error("degenerate format: {field} is zero")]
    DegenerateFormat {
        /// Name of the zero field.
        field: &'static str,
    },
}

fn format_tag_bytes(bytes: &[u8; 4]) -> String {
    format!("{:?}", String::from_utf8_lossy(bytes))
}
