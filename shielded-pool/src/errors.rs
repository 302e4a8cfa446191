//! Definitions of errors that can occur while operating the pool

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use pool_core::crypto::merkle::MerkleError;

use crate::store::StoreError;

/// Errors that can occur during deposits & withdrawals.
///
/// A failed operation never modifies the pool's stored state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A proof, public input, or commitment has the wrong length or encoding
    MalformedInput(String),
    /// The proof does not verify against the public inputs
    ProofRejected,
    /// The commitment or nullifier has already been recorded
    ReplayRejected,
    /// The claimed root is not a historical root of the scope's tree
    UnknownAnchor,
    /// The proof's recipient is not the one the withdrawal pays out to
    WrongRecipient,
    /// The quantity is not one of the token's denominations
    InvalidQuantity,
    /// The token is not supported by the pool
    UnsupportedToken,
    /// Error loading or storing a scope's state
    Storage(String),
    /// Error inserting into the scope's commitment tree
    Tree(MerkleError),
    /// Error loading or validating the pool's configuration
    Config(String),
}

impl Display for PoolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::MalformedInput(s) => write!(f, "malformed input: {}", s),
            PoolError::ProofRejected => write!(f, "proof rejected"),
            PoolError::ReplayRejected => write!(f, "already recorded"),
            PoolError::UnknownAnchor => write!(f, "unknown anchor"),
            PoolError::WrongRecipient => write!(f, "wrong recipient"),
            PoolError::InvalidQuantity => write!(f, "invalid quantity"),
            PoolError::UnsupportedToken => write!(f, "unsupported token"),
            PoolError::Storage(s) => write!(f, "storage error: {}", s),
            PoolError::Tree(e) => write!(f, "commitment tree error: {}", e),
            PoolError::Config(s) => write!(f, "config error: {}", s),
        }
    }
}

impl Error for PoolError {}

impl From<MerkleError> for PoolError {
    fn from(e: MerkleError) -> Self {
        PoolError::Tree(e)
    }
}

impl From<StoreError> for PoolError {
    fn from(e: StoreError) -> Self {
        PoolError::Storage(e.to_string())
    }
}
