//! Errors stemming from verifier operations

use core::fmt::{self, Display};

use crate::transcript::errors::TranscriptError;

/// Errors that cause verification to abort before reaching the pairing check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierError {
    /// An error that occurred when interpreting the verification inputs
    InvalidInputs,
    /// An error that occurred when computing the challenges
    TranscriptBackend,
    /// An error that occurred when computing a modular inverse
    Inversion,
    /// An error that occurred when doing an MSM over different-length scalar & point slices
    MsmLength,
    /// An error that occurred in the operations of the G1 arithmetic backend
    ArithmeticBackend,
}

impl Display for VerifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifierError::InvalidInputs => write!(f, "invalid verification inputs"),
            VerifierError::TranscriptBackend => write!(f, "failed to compute challenges"),
            VerifierError::Inversion => write!(f, "attempted to invert zero"),
            VerifierError::MsmLength => write!(f, "mismatched msm lengths"),
            VerifierError::ArithmeticBackend => write!(f, "curve arithmetic failed"),
        }
    }
}

impl From<TranscriptError> for VerifierError {
    fn from(_value: TranscriptError) -> Self {
        VerifierError::TranscriptBackend
    }
}
