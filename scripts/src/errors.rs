//! Definitions of errors that can occur during the execution of the CLI

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the CLI
#[derive(Debug)]
pub enum ScriptError {
    /// Error decoding a hex argument
    HexDecoding(String),
    /// An argument decodes, but is not a valid value for its position
    InvalidInput(String),
    /// Error loading the verification key
    VkeyLoading(String),
    /// Error verifying a proof
    Verification(String),
    /// Error inserting into a commitment tree
    TreeInsertion(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::HexDecoding(s) => write!(f, "error decoding hex: {}", s),
            ScriptError::InvalidInput(s) => write!(f, "invalid input: {}", s),
            ScriptError::VkeyLoading(s) => write!(f, "error loading verification key: {}", s),
            ScriptError::Verification(s) => write!(f, "error verifying proof: {}", s),
            ScriptError::TreeInsertion(s) => write!(f, "error inserting into tree: {}", s),
        }
    }
}

impl Error for ScriptError {}
