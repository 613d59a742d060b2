//! Crate-level error types.

use std::fmt;

use crate::gpu::context::GpuContextError;

/// Errors produced by the dna-helix crate.
#[derive(Debug)]
pub enum HelixError {
    /// Point-field generation or link parameters are unusable.
    InvalidConfiguration(String),
    /// A point index (or a link policy result) falls outside the field.
    LinkIndexOutOfRange {
        /// Offending point index.
        index: usize,
        /// Number of points the index was checked against.
        len: usize,
    },
    /// A flight request with empty, mismatched or unordered keyframes.
    InvalidKeyframes(String),
    /// Non-finite time fed to the orbit evaluator.
    InvalidTime(f32),
    /// GPU context or kernel failure.
    Gpu(GpuContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for HelixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {msg}")
            }
            Self::LinkIndexOutOfRange { index, len } => {
                write!(f, "point index {index} out of range for {len} points")
            }
            Self::InvalidKeyframes(msg) => {
                write!(f, "invalid keyframes: {msg}")
            }
            Self::InvalidTime(t) => write!(f, "non-finite orbit time: {t}"),
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for HelixError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GpuContextError> for HelixError {
    fn from(e: GpuContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for HelixError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
