//! The uniqueness sets each scope keeps over 32-byte digests: deposited
//! commitments, spent nullifiers, and every root the tree has had

use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

/// A 32-byte digest
pub type Digest = [u8; 32];

/// An insert-only set of digests
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorSet {
    /// The digests inserted so far
    entries: BTreeSet<Digest>,
}

impl AnchorSet {
    /// Inserts the digest, returning `false` if it was already present
    pub fn insert_if_absent(&mut self, digest: Digest) -> bool {
        self.entries.insert(digest)
    }

    /// Whether the digest is present
    pub fn contains(&self, digest: &Digest) -> bool {
        self.entries.contains(digest)
    }

    /// The number of digests
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no digest has been inserted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The anchor sets of a single scope
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorSets {
    /// Commitments deposited into the scope's tree
    pub commitments: AnchorSet,
    /// Nullifiers revealed by accepted withdrawals
    pub nullifiers: AnchorSet,
    /// Every root the scope's tree has had after an insertion
    pub roots: AnchorSet,
}

#[cfg(test)]
mod tests {
    use super::{AnchorSet, AnchorSets};

    #[test]
    fn test_insert_if_absent() {
        let mut set = AnchorSet::default();
        assert!(set.is_empty());

        assert!(set.insert_if_absent([1; 32]));
        assert!(!set.insert_if_absent([1; 32]));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&[1; 32]));
        assert!(!set.contains(&[2; 32]));
    }

    #[test]
    fn test_membership_survives_unrelated_inserts() {
        let mut sets = AnchorSets::default();
        sets.commitments.insert_if_absent([1; 32]);
        sets.nullifiers.insert_if_absent([2; 32]);
        sets.roots.insert_if_absent([3; 32]);

        for i in 4..64u8 {
            sets.commitments.insert_if_absent([i; 32]);
            sets.roots.insert_if_absent([i; 32]);
        }

        assert!(sets.commitments.contains(&[1; 32]));
        assert!(sets.nullifiers.contains(&[2; 32]));
        assert!(sets.roots.contains(&[3; 32]));
        // The sets are independent
        assert!(!sets.nullifiers.contains(&[1; 32]));
        assert_eq!(sets.nullifiers.len(), 1);
    }

    #[test]
    fn test_postcard_roundtrip() {
        let mut sets = AnchorSets::default();
        sets.roots.insert_if_absent([9; 32]);

        let bytes = postcard::to_allocvec(&sets).unwrap();
        let decoded: AnchorSets = postcard::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, sets);
    }
}
