//! Transcript error types and conversions.

use core::fmt::{self, Display};

/// Errors stemming from transcript operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptError {
    /// A challenge was squeezed without absorbing anything since the last one
    EmptyRound,
}

impl Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::EmptyRound => write!(f, "no data absorbed before squeezing"),
        }
    }
}
