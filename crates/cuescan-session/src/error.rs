//! Error types for session reconstruction.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised while relating recorder files to each other.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A file name does not follow the recorder naming convention.
    #[error("file name {name:?} does not match the recorder naming convention")]
    NamingConvention {
        /// The offending file name.
        name: String,
    },

    /// A header computation failed (degenerate format fields).
    #[error(transparent)]
    Wav(#[from] cuescan_wav::WavError),
}

impl SessionError {
    /// Creates a naming-convention error for `name`.
    pub fn naming(name: impl Into<String>) -> Self {
        Self::NamingConvention { name: name.into() }
    }
}
