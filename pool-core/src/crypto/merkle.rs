//! An append-only incremental Merkle tree over commitments.
//!
//! Only the most recent left node at each level is kept, so a tree of height
//! `h` holds `O(h)` state. Every internal node is the sponge of its two
//! children and of the leaf whose insertion last wrote it.

use alloc::vec::Vec;
use core::{
    fmt::{self, Display},
    marker::PhantomData,
};
use pool_common::{
    backends::SpongeBackend,
    constants::{LEVEL_DEFAULTS, MERKLE_HEIGHT},
    field::Scalar,
};
use serde::{Deserialize, Serialize};

/// The parameters of a commitment tree
pub trait MerkleParams {
    /// The number of levels between the leaves & the root
    const HEIGHT: usize;
}

/// The parameters of the trees used by the pool
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProdMerkleParams;

impl MerkleParams for ProdMerkleParams {
    const HEIGHT: usize = MERKLE_HEIGHT;
}

/// Errors stemming from commitment tree operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleError {
    /// Every leaf of the tree has been filled
    TreeFull,
    /// The tree's cache does not match its height, or the height exceeds
    /// the table of empty subtree roots
    HeightMismatch,
}

impl Display for MerkleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerkleError::TreeFull => write!(f, "commitment tree is full"),
            MerkleError::HeightMismatch => write!(f, "commitment tree height mismatch"),
        }
    }
}

/// The root of an empty subtree at the given level, with the leaves at level 0
pub fn empty_subtree_root(level: usize) -> Option<Scalar> {
    LEVEL_DEFAULTS.get(level).map(|value| Scalar::from_uint_mod_order(*value))
}

/// An incremental Merkle tree of height `P::HEIGHT`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct CommitmentTree<P: MerkleParams> {
    /// The index at which the next leaf will be inserted
    next_leaf_index: u64,
    /// The most recent left node written at each level
    last_level_hash: Vec<Scalar>,
    #[doc(hidden)]
    #[serde(skip)]
    _phantom: PhantomData<P>,
}

impl<P: MerkleParams> Default for CommitmentTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MerkleParams> CommitmentTree<P> {
    /// Creates an empty tree
    pub fn new() -> Self {
        let last_level_hash =
            (0..P::HEIGHT).map(|level| empty_subtree_root(level).unwrap_or_default()).collect();

        Self { next_leaf_index: 0, last_level_hash, _phantom: PhantomData }
    }

    /// The maximum number of leaves, `2^HEIGHT`
    pub fn capacity() -> u64 {
        1 << P::HEIGHT
    }

    /// The index at which the next leaf will be inserted
    pub fn next_leaf_index(&self) -> u64 {
        self.next_leaf_index
    }

    /// The most recent left node written at each level
    pub fn last_level_hash(&self) -> &[Scalar] {
        &self.last_level_hash
    }

    /// Checks that the tree's state is consistent with its parameters
    pub fn validate(&self) -> Result<(), MerkleError> {
        if P::HEIGHT > LEVEL_DEFAULTS.len() || self.last_level_hash.len() != P::HEIGHT {
            return Err(MerkleError::HeightMismatch);
        }

        if self.next_leaf_index > Self::capacity() {
            return Err(MerkleError::HeightMismatch);
        }

        Ok(())
    }

    /// Appends a leaf, returning the new root.
    ///
    /// Fails without modifying the tree if it is full or inconsistent.
    pub fn insert<S: SpongeBackend>(&mut self, leaf: Scalar, sponge: &S) -> Result<Scalar, MerkleError> {
        self.validate()?;
        if self.next_leaf_index == Self::capacity() {
            return Err(MerkleError::TreeFull);
        }

        let mut index = self.next_leaf_index;
        let mut current = leaf;
        let levels = self.last_level_hash.iter_mut().zip(LEVEL_DEFAULTS.iter());
        for (cached, default) in levels {
            let (left, right) = if index % 2 == 0 {
                // Only left nodes are cached, a right node is never read again
                *cached = current;
                (current, Scalar::from_uint_mod_order(*default))
            } else {
                (*cached, current)
            };

            current = sponge.hash([left, right, leaf]);
            index >>= 1;
        }

        self.next_leaf_index += 1;
        Ok(current)
    }
}
