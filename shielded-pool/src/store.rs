//! Persistence of per-scope state.
//!
//! Each operation loads its scope's state, mutates a local copy, and writes it
//! back only once the operation has succeeded.

use std::{
    collections::HashMap,
    error::Error,
    fmt::{self, Display, Formatter},
};

use pool_core::{
    anchors::AnchorSets,
    crypto::merkle::{CommitmentTree, ProdMerkleParams},
};
use serde::{Deserialize, Serialize};

use crate::{errors::PoolError, scope::ScopeKey};

/// An error raised by a scope store backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError(pub String);

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for StoreError {}

/// A key-value store of serialized scope states
pub trait ScopeStore {
    /// Loads the serialized state of a scope, `None` if it has never been stored
    fn load(&self, scope: &ScopeKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores the serialized state of a scope, replacing any previous state
    fn store(&mut self, scope: &ScopeKey, state: Vec<u8>) -> Result<(), StoreError>;
}

/// An in-process scope store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    /// The serialized state of each scope
    scopes: HashMap<ScopeKey, Vec<u8>>,
}

impl MemoryStore {
    /// The number of scopes that have been stored
    pub fn num_scopes(&self) -> usize {
        self.scopes.len()
    }
}

impl ScopeStore for MemoryStore {
    fn load(&self, scope: &ScopeKey) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.scopes.get(scope).cloned())
    }

    fn store(&mut self, scope: &ScopeKey, state: Vec<u8>) -> Result<(), StoreError> {
        self.scopes.insert(scope.clone(), state);
        Ok(())
    }
}

/// The full state of a scope
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeState {
    /// The scope's commitment tree
    pub tree: CommitmentTree<ProdMerkleParams>,
    /// The scope's commitments, nullifiers & historical roots
    pub anchors: AnchorSets,
}

impl ScopeState {
    /// Loads a scope's state, starting from an empty state for a new scope
    pub fn load<S: ScopeStore>(store: &S, scope: &ScopeKey) -> Result<Self, PoolError> {
        let state = match store.load(scope)? {
            Some(bytes) => postcard::from_bytes::<ScopeState>(&bytes)
                .map_err(|e| PoolError::Storage(e.to_string()))?,
            None => ScopeState::default(),
        };

        state.tree.validate()?;
        Ok(state)
    }

    /// Writes the scope's state back to the store
    pub fn store<S: ScopeStore>(&self, store: &mut S, scope: &ScopeKey) -> Result<(), PoolError> {
        let bytes = postcard::to_allocvec(self).map_err(|e| PoolError::Storage(e.to_string()))?;
        store.store(scope, bytes)?;
        Ok(())
    }
}
